pub mod config;
pub mod power_series;
pub mod sample;
