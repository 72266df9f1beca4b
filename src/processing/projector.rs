use crate::data::datetime::format_display_timestamp;
use crate::state::power_series::PowerSeries;
use crate::state::sample::{ProjectedPoint, SampleWithDerivative};

/// Upper bound of every projected power value, in kW.
pub const MAX_DISPLAY_KW: f64 = 5.0;

/// Watts to kilowatts, capped at [`MAX_DISPLAY_KW`]. Negative values pass
/// through unclipped. NaN stays NaN so the viewer leaves a gap.
pub fn to_display_kw(watts: f64) -> f64 {
    if watts.is_nan() {
        return watts;
    }
    (watts / 1000.0).min(MAX_DISPLAY_KW)
}

fn derived_kw(watts: f64) -> f64 {
    if watts.is_finite() { to_display_kw(watts) } else { 0.0 }
}

pub fn project(point: &SampleWithDerivative) -> ProjectedPoint {
    let sample = &point.sample;
    ProjectedPoint {
        timestamp: format_display_timestamp(&sample.timestamp),
        ac_kw: to_display_kw(sample.ac_power),
        dc_kw: to_display_kw(sample.dc_power),
        derived_kw: derived_kw(point.power_from_energy),
        smoothed_kw: derived_kw(point.power_from_energy_smoothed),
    }
}

pub fn project_all(points: &[SampleWithDerivative]) -> PowerSeries {
    points.iter().map(project).collect()
}
