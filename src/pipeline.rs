use chrono::NaiveDateTime;
use crate::data::loader::{self, LoadError};
use crate::data::log_parser::{self, ParseDiagnostics};
use crate::processing::{derivative, projector, window};
use crate::state::config::PipelineConfig;
use crate::state::power_series::PowerSeries;
use crate::state::sample::SampleWithDerivative;

/// Everything one run produces.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Time-ordered samples with derived power, before projection.
    pub samples: Vec<SampleWithDerivative>,
    pub series: PowerSeries,
    pub diagnostics: ParseDiagnostics,
}

/// Run the pipeline with the local clock as "now".
pub fn run(config: &PipelineConfig) -> PipelineOutput {
    run_at(config, chrono::Local::now().naive_local())
}

/// Load, parse, window, differentiate, smooth and project one log.
///
/// Bad input never fails the run: a missing or unreadable file is treated as
/// an empty log and malformed lines are dropped, with both recorded in the
/// returned diagnostics. The config is expected to have passed
/// [`PipelineConfig::validate`].
pub fn run_at(config: &PipelineConfig, now: NaiveDateTime) -> PipelineOutput {
    let mut diagnostics = ParseDiagnostics::default();

    let text = match loader::load_log(&config.log_path) {
        Ok(text) => text,
        Err(LoadError::Missing) => {
            tracing::warn!("Log file {:?} not found", config.log_path);
            diagnostics.missing_file = true;
            String::new()
        }
        Err(e) => {
            tracing::error!("Failed to load {:?}: {e}", config.log_path);
            diagnostics.read_error = Some(e.to_string());
            String::new()
        }
    };

    let parsed = log_parser::parse_log(&text, Some(&mut diagnostics));
    let recent = window::filter_recent(parsed, config.plot_days, now);
    let samples = derivative::derive_power(recent, config.smoothing_window);
    let series = projector::project_all(&samples);

    tracing::info!(
        "Processed {:?}: {} lines, {} parsed, {} skipped, {} in last {} days",
        config.log_path,
        diagnostics.lines_read,
        diagnostics.parsed,
        diagnostics.total_skipped(),
        series.len(),
        config.plot_days
    );

    PipelineOutput {
        samples,
        series,
        diagnostics,
    }
}
