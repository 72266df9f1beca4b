use std::collections::BTreeMap;
use std::fmt;
use crate::data::datetime::{format_log_timestamp, parse_log_timestamp};
use crate::state::sample::Sample;

/// Separator between the fields of one record.
pub const FIELD_SEPARATOR: &str = ", ";
/// Separator between a field label and its value.
pub const LABEL_SEPARATOR: &str = ": ";
/// Timestamp, AC power, DC power, state, energy.
pub const REQUIRED_FIELDS: usize = 5;
/// The energy counter is logged in MWh and stored in kWh.
pub const MWH_TO_KWH: f64 = 1000.0;

/// Why a log line did not produce a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Blank,
    TooFewFields { found: usize },
    BadTimestamp(String),
    MissingLabel { field: usize },
    BadNumber { field: usize, value: String },
}

impl SkipReason {
    /// Stable key used to bucket skips in [`ParseDiagnostics`].
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::Blank => "blank",
            SkipReason::TooFewFields { .. } => "too_few_fields",
            SkipReason::BadTimestamp(_) => "bad_timestamp",
            SkipReason::MissingLabel { .. } => "missing_label",
            SkipReason::BadNumber { .. } => "bad_number",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank line"),
            SkipReason::TooFewFields { found } => {
                write!(f, "expected {REQUIRED_FIELDS} fields, found {found}")
            }
            SkipReason::BadTimestamp(ts) => write!(f, "unparsable timestamp {ts:?}"),
            SkipReason::MissingLabel { field } => {
                write!(f, "field {field} has no {LABEL_SEPARATOR:?} separator")
            }
            SkipReason::BadNumber { field, value } => {
                write!(f, "field {field} value {value:?} is not a number")
            }
        }
    }
}

/// Counts of what happened to each line of one log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseDiagnostics {
    pub lines_read: usize,
    pub parsed: usize,
    /// Skipped line counts keyed by [`SkipReason::kind`].
    pub skipped: BTreeMap<&'static str, usize>,
    pub missing_file: bool,
    pub read_error: Option<String>,
}

impl ParseDiagnostics {
    pub fn record_skip(&mut self, reason: &SkipReason) {
        *self.skipped.entry(reason.kind()).or_insert(0) += 1;
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_for(&self, kind: &str) -> usize {
        self.skipped.get(kind).copied().unwrap_or(0)
    }
}

fn field_value(field: &str, index: usize) -> Result<&str, SkipReason> {
    field
        .split_once(LABEL_SEPARATOR)
        .map(|(_, value)| value)
        .ok_or(SkipReason::MissingLabel { field: index })
}

/// Parse `"<label>: <number> <unit>"`, ignoring the label and unit.
fn numeric_field(field: &str, index: usize) -> Result<f64, SkipReason> {
    let value = field_value(field, index)?;
    let token = value.split(' ').next().unwrap_or_default();
    token.parse::<f64>().map_err(|_| SkipReason::BadNumber {
        field: index,
        value: token.to_string(),
    })
}

/// Parse one log record.
pub fn parse_line(line: &str) -> Result<Sample, SkipReason> {
    let line = line.trim();
    if line.is_empty() {
        return Err(SkipReason::Blank);
    }

    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if parts.len() < REQUIRED_FIELDS {
        return Err(SkipReason::TooFewFields { found: parts.len() });
    }

    let timestamp = parse_log_timestamp(parts[0])
        .ok_or_else(|| SkipReason::BadTimestamp(parts[0].to_string()))?;
    let ac_power = numeric_field(parts[1], 1)?;
    let dc_power = numeric_field(parts[2], 2)?;
    let state = field_value(parts[3], 3)?.to_string();
    let energy = numeric_field(parts[4], 4)? * MWH_TO_KWH;

    Ok(Sample {
        timestamp,
        ac_power,
        dc_power,
        state,
        energy,
    })
}

/// Parse every line of a log, in file order.
///
/// Malformed lines are dropped. When `diagnostics` is given, every line is
/// counted there, including the reason each skipped line was dropped.
pub fn parse_log(text: &str, mut diagnostics: Option<&mut ParseDiagnostics>) -> Vec<Sample> {
    let mut samples = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if let Some(diag) = diagnostics.as_deref_mut() {
            diag.lines_read += 1;
        }
        match parse_line(line) {
            Ok(sample) => {
                if let Some(diag) = diagnostics.as_deref_mut() {
                    diag.parsed += 1;
                }
                samples.push(sample);
            }
            Err(reason) => {
                if reason != SkipReason::Blank {
                    tracing::debug!("Skipping log line {}: {reason}", line_no + 1);
                }
                if let Some(diag) = diagnostics.as_deref_mut() {
                    diag.record_skip(&reason);
                }
            }
        }
    }
    samples
}

/// Render a sample the way the inverter logger writes it.
///
/// [`parse_line`] reads the result back to the same timestamp, powers and
/// state, with energy equal up to float rounding of the MWh conversion. A
/// state containing `", "` splits into extra fields and does not survive.
pub fn format_log_line(sample: &Sample) -> String {
    format!(
        "{}, AC Power: {} W, DC Power: {} W, State: {}, Energy: {} MWh",
        format_log_timestamp(&sample.timestamp),
        sample.ac_power,
        sample.dc_power,
        sample.state,
        sample.energy / MWH_TO_KWH,
    )
}
