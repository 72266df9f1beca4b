use chrono::{Days, NaiveDateTime};
use crate::data::datetime::parse_log_timestamp;
use crate::state::sample::Sample;

/// Start of the window ending at `now`, `days` calendar days back.
/// `None` when the subtraction leaves chrono's date range.
pub fn cutoff(now: NaiveDateTime, days: u32) -> Option<NaiveDateTime> {
    now.checked_sub_days(Days::new(u64::from(days)))
}

/// Keep samples no older than `days` calendar days before `now`.
/// Relative order is preserved.
pub fn filter_recent(samples: Vec<Sample>, days: u32, now: NaiveDateTime) -> Vec<Sample> {
    let Some(cutoff) = cutoff(now, days) else {
        return samples;
    };
    samples
        .into_iter()
        .filter(|s| s.timestamp >= cutoff)
        .collect()
}

/// Trim raw log text to the lines stamped within the window.
///
/// The timestamp is everything before the first comma. Lines whose stamp
/// does not parse are dropped; the record body is not validated.
pub fn retain_recent_lines(text: &str, days: u32, now: NaiveDateTime) -> String {
    let cutoff = cutoff(now, days);
    let mut kept: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let stamp = line.split(',').next().unwrap_or_default();
        match parse_log_timestamp(stamp) {
            Some(ts) => {
                if cutoff.map_or(true, |c| ts >= c) {
                    kept.push(line);
                }
            }
            None => tracing::warn!("Dropping line without a valid timestamp: {line}"),
        }
    }

    if kept.is_empty() {
        return String::new();
    }
    let mut out = kept.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(ts: &str) -> Sample {
        Sample {
            timestamp: parse_log_timestamp(ts).unwrap(),
            ac_power: 0.0,
            dc_power: 0.0,
            state: "Producing".to_string(),
            energy: 0.0,
        }
    }

    fn now() -> NaiveDateTime {
        parse_log_timestamp("2024-03-02T12:00:00.000000").unwrap()
    }

    #[test]
    fn keeps_samples_inside_window_in_order() {
        let samples = vec![
            sample_at("2024-03-01T08:00:00.000000"),
            sample_at("2024-02-20T08:00:00.000000"),
            sample_at("2024-02-28T12:00:00.000000"),
            sample_at("2024-02-28T11:59:59.999999"),
        ];
        let kept = filter_recent(samples, 3, now());
        let stamps: Vec<String> = kept.iter().map(|s| s.timestamp.to_string()).collect();
        assert_eq!(stamps, vec!["2024-03-01 08:00:00", "2024-02-28 12:00:00"]);
    }

    #[test]
    fn window_crosses_leap_day() {
        // 2024-03-01 minus one calendar day is 2024-02-29.
        let now = parse_log_timestamp("2024-03-01T06:00:00.000000").unwrap();
        assert_eq!(
            cutoff(now, 1).unwrap(),
            parse_log_timestamp("2024-02-29T06:00:00.000000").unwrap()
        );
    }

    #[test]
    fn zero_days_drops_past_samples() {
        let samples = vec![
            sample_at("2024-03-02T11:59:59.000000"),
            sample_at("2024-01-01T00:00:00.000000"),
        ];
        assert!(filter_recent(samples, 0, now()).is_empty());
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(filter_recent(Vec::new(), 3, now()).is_empty());
    }

    #[test]
    fn huge_window_keeps_everything() {
        let samples = vec![sample_at("1999-01-01T00:00:00.000000")];
        assert_eq!(filter_recent(samples, u32::MAX, now()).len(), 1);
    }

    #[test]
    fn trims_raw_lines() {
        let text = "2024-03-01T08:00:00.000000, AC Power: 1 W, DC Power: 1 W, State: x, Energy: 1 MWh\n\
                    2024-01-01T08:00:00.000000, AC Power: 1 W, DC Power: 1 W, State: x, Energy: 1 MWh\n\
                    \n\
                    garbage\n\
                    2024-03-02T10:00:00.000000, partial";
        let trimmed = retain_recent_lines(text, 3, now());
        let lines: Vec<&str> = trimmed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2024-03-01T08"));
        assert_eq!(lines[1], "2024-03-02T10:00:00.000000, partial");
    }

    #[test]
    fn trimmed_text_ends_with_newline() {
        let text = "2024-03-01T08:00:00.000000, AC Power: 1 W, DC Power: 1 W, State: x, Energy: 1 MWh";
        let mut trimmed = retain_recent_lines(text, 3, now());
        assert!(trimmed.ends_with('\n'));

        // A line appended afterwards stays a separate record.
        trimmed.push_str("2024-03-02T11:00:00.000000, AC Power: 2 W");
        assert_eq!(trimmed.lines().count(), 2);

        let old = "2024-01-01T08:00:00.000000, AC Power: 1 W";
        assert_eq!(retain_recent_lines(old, 3, now()), "");
    }
}
