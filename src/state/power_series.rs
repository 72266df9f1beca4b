use serde::{Deserialize, Serialize};
use crate::state::sample::ProjectedPoint;

/// The five parallel arrays handed to a renderer or exporter.
///
/// Every vector has the same length; index `i` of each describes the same
/// sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerSeries {
    pub timestamps: Vec<String>,
    pub ac_kw: Vec<f64>,
    pub dc_kw: Vec<f64>,
    pub derived_kw: Vec<f64>,
    pub smoothed_kw: Vec<f64>,
}

impl PowerSeries {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(n),
            ac_kw: Vec::with_capacity(n),
            dc_kw: Vec::with_capacity(n),
            derived_kw: Vec::with_capacity(n),
            smoothed_kw: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, point: ProjectedPoint) {
        self.timestamps.push(point.timestamp);
        self.ac_kw.push(point.ac_kw);
        self.dc_kw.push(point.dc_kw);
        self.derived_kw.push(point.derived_kw);
        self.smoothed_kw.push(point.smoothed_kw);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

impl FromIterator<ProjectedPoint> for PowerSeries {
    fn from_iter<I: IntoIterator<Item = ProjectedPoint>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut series = PowerSeries::with_capacity(iter.size_hint().0);
        for point in iter {
            series.push(point);
        }
        series
    }
}
