use crate::processing::smoothing::centered_moving_average;
use crate::state::sample::{Sample, SampleWithDerivative};

pub const KWH_TO_WH: f64 = 1000.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Instantaneous power (W) between two consecutive samples, from the change
/// of the lifetime energy counter.
///
/// Returns 0 when the interval is not positive or the quotient is not finite.
pub fn power_between(prev: &Sample, curr: &Sample) -> f64 {
    let dt = curr.timestamp - prev.timestamp;
    // Microsecond resolution matches the log timestamps.
    let time_diff_secs = match dt.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => dt.num_milliseconds() as f64 / 1000.0,
    };
    if time_diff_secs <= 0.0 {
        return 0.0;
    }

    let energy_diff_wh = (curr.energy - prev.energy) * KWH_TO_WH;
    let power = energy_diff_wh / (time_diff_secs / SECONDS_PER_HOUR);
    if power.is_finite() { power } else { 0.0 }
}

/// Sort by time, derive power from the energy counter and smooth it.
///
/// The sort is stable, so samples with equal timestamps keep their input
/// order and the later one gets a derived power of 0.
pub fn derive_power(mut samples: Vec<Sample>, window: usize) -> Vec<SampleWithDerivative> {
    samples.sort_by_key(|s| s.timestamp);

    let mut powers = Vec::with_capacity(samples.len());
    for (i, sample) in samples.iter().enumerate() {
        let power = match i.checked_sub(1) {
            Some(prev) => power_between(&samples[prev], sample),
            None => 0.0,
        };
        powers.push(power);
    }

    let smoothed = centered_moving_average(&powers, window);

    samples
        .into_iter()
        .zip(powers)
        .zip(smoothed)
        .map(|((sample, power_from_energy), power_from_energy_smoothed)| SampleWithDerivative {
            sample,
            power_from_energy,
            power_from_energy_smoothed,
        })
        .collect()
}
