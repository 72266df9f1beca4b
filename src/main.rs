mod app;
mod ui;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use app::SolarPlotApp;
use clap::Parser;
use eframe::egui;
use solarplot::data::{export, loader};
use solarplot::processing::statistics::WindowSummary;
use solarplot::processing::window;
use solarplot::PipelineConfig;

/// Plot solar inverter power from a telemetry log.
#[derive(Parser, Debug)]
#[command(name = "solarplot", version)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Telemetry log to read
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Days of history to keep
    #[arg(short, long)]
    days: Option<u32>,

    /// Samples in the centered smoothing window
    #[arg(short, long)]
    window: Option<usize>,

    /// Write the projected series as CSV
    #[arg(long, value_name = "PATH")]
    export_csv: Option<PathBuf>,

    /// Write the projected series as JSON ("-" for stdout)
    #[arg(long, value_name = "PATH")]
    export_json: Option<PathBuf>,

    /// Write a copy of the log trimmed to the last --days days
    #[arg(long, value_name = "PATH")]
    trim_to: Option<PathBuf>,

    /// Print summary statistics for the window
    #[arg(long)]
    summary: bool,

    /// Do not open the viewer
    #[arg(long)]
    headless: bool,
}

impl Cli {
    fn wants_viewer(&self) -> bool {
        !self.headless
            && self.export_csv.is_none()
            && self.export_json.is_none()
            && self.trim_to.is_none()
            && !self.summary
    }

    fn resolve_config(&self) -> Result<PipelineConfig, String> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(log) = &self.log {
            config.log_path = log.clone();
        }
        if let Some(days) = self.days {
            config.plot_days = days;
        }
        if let Some(window) = self.window {
            config.smoothing_window = window;
        }
        config.validate()?;
        Ok(config)
    }
}

fn trim_log(config: &PipelineConfig, dest: &std::path::Path) -> Result<(), String> {
    let text = loader::load_log(&config.log_path).unwrap_or_else(|e| {
        tracing::warn!("{e}: {:?}", config.log_path);
        String::new()
    });
    let now = chrono::Local::now().naive_local();
    let trimmed = window::retain_recent_lines(&text, config.plot_days, now);
    std::fs::write(dest, trimmed).map_err(|e| format!("Cannot write {}: {e}", dest.display()))?;
    tracing::info!("Trimmed log to last {} days at {:?}", config.plot_days, dest);
    Ok(())
}

fn run_headless(cli: &Cli, config: &PipelineConfig) -> Result<(), String> {
    if let Some(dest) = &cli.trim_to {
        trim_log(config, dest)?;
    }

    let output = solarplot::run(config);

    if let Some(path) = &cli.export_csv {
        export::export_csv(&output.series, path)?;
    }
    if let Some(path) = &cli.export_json {
        if path.as_os_str() == "-" {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            export::write_json(&output.series, &mut lock)?;
            writeln!(lock).map_err(|e| format!("Cannot write to stdout: {e}"))?;
        } else {
            export::export_json(&output.series, path)?;
        }
    }
    if cli.summary {
        print!("{}", WindowSummary::compute(&output.samples).report());
        for (kind, count) in &output.diagnostics.skipped {
            println!("  skipped {kind}: {count}");
        }
    }
    Ok(())
}

fn run_viewer(config: PipelineConfig) -> Result<(), String> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Solar Power Monitor")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Solar Power Monitor",
        options,
        Box::new(|cc| Ok(Box::new(SolarPlotApp::new(cc, config)))),
    )
    .map_err(|e| format!("Viewer failed: {e}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.wants_viewer() {
        run_viewer(config)
    } else {
        run_headless(&cli, &config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
