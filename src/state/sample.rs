use chrono::NaiveDateTime;

/// One telemetry record as read from the inverter log.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    /// AC output power in watts.
    pub ac_power: f64,
    /// DC input power in watts.
    pub dc_power: f64,
    /// Inverter status text, passed through untouched.
    pub state: String,
    /// Lifetime energy counter in kWh.
    pub energy: f64,
}

/// A sample plus the power reconstructed from its energy counter.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleWithDerivative {
    pub sample: Sample,
    /// Watts, from the energy delta to the previous sample.
    pub power_from_energy: f64,
    /// Watts, centered moving average of `power_from_energy`.
    pub power_from_energy_smoothed: f64,
}

/// A single chart-ready point. All power values are kilowatts.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub timestamp: String,
    pub ac_kw: f64,
    pub dc_kw: f64,
    pub derived_kw: f64,
    pub smoothed_kw: f64,
}
