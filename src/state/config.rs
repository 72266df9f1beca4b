use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_FILE: &str = "solar_edge_data.log";
pub const DEFAULT_PLOT_DAYS: u32 = 3;
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;
/// Seconds between automatic reloads in the viewer.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 600;

/// Run configuration for one pass of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub log_path: PathBuf,
    /// Number of calendar days to keep, counted back from now.
    pub plot_days: u32,
    /// Samples averaged per smoothed point. Must be at least 1.
    pub smoothing_window: usize,
    /// Viewer reload period. 0 disables periodic reloads.
    pub refresh_interval_secs: u64,
}

impl PipelineConfig {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {e}", path.display()))?;
        let config: PipelineConfig = serde_json::from_str(&json)
            .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Cannot write config {}: {e}", path.display()))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.smoothing_window == 0 {
            return Err("smoothing_window must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            plot_days: DEFAULT_PLOT_DAYS,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}
