//! Solar inverter telemetry: log parsing, windowing, energy-derived power
//! and chart-ready series.

pub mod data;
pub mod pipeline;
pub mod processing;
pub mod state;

pub use pipeline::{run, run_at, PipelineOutput};
pub use state::config::PipelineConfig;
pub use state::power_series::PowerSeries;
