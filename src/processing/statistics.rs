use chrono::NaiveDateTime;
use crate::data::datetime::format_display_timestamp;
use crate::state::sample::SampleWithDerivative;

/// Statistics for one power series, in kW.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl PowerStats {
    /// Compute statistics from watt values, skipping NaN and infinities.
    pub fn from_watts(watts: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut vals: Vec<f64> = watts
            .into_iter()
            .filter(|v| v.is_finite())
            .map(|w| w / 1000.0)
            .collect();
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = vals.iter().sum::<f64>() / count as f64;

        vals.sort_by(|a, b| a.total_cmp(b));
        let median = if count % 2 == 0 {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        } else {
            vals[count / 2]
        };

        let variance = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(PowerStats {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }

    fn report_line(&self, label: &str) -> String {
        format!(
            "  {label:<9} peak {:.3} kW, min {:.3} kW, mean {:.3} kW, median {:.3} kW, std dev {:.3}\n",
            self.max, self.min, self.mean, self.median, self.std_dev
        )
    }
}

/// Overview of the processed window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub samples: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    /// Lifetime counter increase across the window, kWh.
    pub energy_kwh: f64,
    pub ac: Option<PowerStats>,
    pub dc: Option<PowerStats>,
    pub derived: Option<PowerStats>,
}

impl WindowSummary {
    /// Summarize time-ordered samples, as returned by `derive_power`.
    pub fn compute(points: &[SampleWithDerivative]) -> Self {
        let first = points.first().map(|p| &p.sample);
        let last = points.last().map(|p| &p.sample);
        let energy_kwh = match (first, last) {
            (Some(a), Some(b)) if (b.energy - a.energy).is_finite() => b.energy - a.energy,
            _ => 0.0,
        };

        WindowSummary {
            samples: points.len(),
            first: first.map(|s| s.timestamp),
            last: last.map(|s| s.timestamp),
            energy_kwh,
            ac: PowerStats::from_watts(points.iter().map(|p| p.sample.ac_power)),
            dc: PowerStats::from_watts(points.iter().map(|p| p.sample.dc_power)),
            derived: PowerStats::from_watts(points.iter().map(|p| p.power_from_energy)),
        }
    }

    /// Format as a multi-line report string.
    pub fn report(&self) -> String {
        let mut out = String::new();
        match (self.first, self.last) {
            (Some(first), Some(last)) => out.push_str(&format!(
                "{} samples from {} to {}\n",
                self.samples,
                format_display_timestamp(&first),
                format_display_timestamp(&last)
            )),
            _ => {
                out.push_str("No samples in window\n");
                return out;
            }
        }
        out.push_str(&format!("  Energy    {:.3} kWh\n", self.energy_kwh));
        for (label, stats) in [("AC", &self.ac), ("DC", &self.dc), ("Derived", &self.derived)] {
            if let Some(stats) = stats {
                out.push_str(&stats.report_line(label));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datetime::parse_log_timestamp;
    use crate::state::sample::Sample;

    fn point(ts: &str, ac: f64, energy: f64, derived: f64) -> SampleWithDerivative {
        SampleWithDerivative {
            sample: Sample {
                timestamp: parse_log_timestamp(ts).unwrap(),
                ac_power: ac,
                dc_power: ac * 1.1,
                state: "Producing".to_string(),
                energy,
            },
            power_from_energy: derived,
            power_from_energy_smoothed: derived,
        }
    }

    #[test]
    fn stats_in_kilowatts() {
        let stats = PowerStats::from_watts([1000.0, 3000.0, f64::NAN, 2000.0, 4000.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert!((stats.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn no_finite_values_means_no_stats() {
        assert!(PowerStats::from_watts([f64::NAN]).is_none());
        assert!(PowerStats::from_watts(Vec::new()).is_none());
    }

    #[test]
    fn summary_covers_the_window() {
        let points = [
            point("2024-06-01T08:00:00.000000", 500.0, 100.0, 0.0),
            point("2024-06-01T09:00:00.000000", 1500.0, 101.0, 1000.0),
            point("2024-06-01T10:00:00.000000", 2500.0, 103.0, 2000.0),
        ];
        let summary = WindowSummary::compute(&points);
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.energy_kwh, 3.0);
        assert_eq!(summary.derived.as_ref().unwrap().max, 2.0);

        let report = summary.report();
        assert!(report.starts_with("3 samples from 2024-06-01 08:00:00 to 2024-06-01 10:00:00"));
        assert!(report.contains("Energy    3.000 kWh"));
        assert!(report.contains("peak 2.500 kW"));
    }

    #[test]
    fn empty_summary() {
        let summary = WindowSummary::compute(&[]);
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.energy_kwh, 0.0);
        assert_eq!(summary.report(), "No samples in window\n");
    }
}
