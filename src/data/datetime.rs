use chrono::NaiveDateTime;

/// Timestamp layout written by the logger, e.g. `2024-01-01T12:00:00.123456`.
/// `%.f` also accepts whole seconds, which the logger emits when the
/// microsecond part is zero.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Second-precision layout used for chart labels and exports.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_log_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), LOG_TIMESTAMP_FORMAT).ok()
}

/// Format for the log file, always with six fractional digits.
pub fn format_log_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Format for display. The sub-second part is dropped, not rounded.
pub fn format_display_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_display_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DISPLAY_TIMESTAMP_FORMAT).ok()
}

/// Unix seconds (with subsecond precision), treating the naive time as UTC.
/// Used as the X coordinate in plots.
pub fn to_plot_seconds(ts: &NaiveDateTime) -> f64 {
    ts.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`to_plot_seconds`], formatted for axis labels.
pub fn format_plot_seconds(secs: f64) -> String {
    use chrono::{DateTime, Utc};
    let whole = secs.floor() as i64;
    let nanos = ((secs - secs.floor()) * 1_000_000_000.0) as u32;
    match DateTime::<Utc>::from_timestamp(whole, nanos) {
        Some(dt) => dt.naive_utc().format("%m-%d %H:%M").to_string(),
        None => format!("{secs:.0}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_microsecond_timestamp() {
        let ts = parse_log_timestamp("2024-01-01T12:00:00.123456").unwrap();
        assert_eq!(ts.nanosecond(), 123_456_000);
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn accepts_whole_second_timestamp() {
        assert!(parse_log_timestamp("2024-01-01T12:00:00").is_some());
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(parse_log_timestamp("2024-01-01 12:00:00.123456").is_none());
        assert!(parse_log_timestamp("01/01/2024 12:00:00").is_none());
        assert!(parse_log_timestamp("").is_none());
    }

    #[test]
    fn display_round_trip_truncates_to_seconds() {
        let ts = parse_log_timestamp("2024-03-31T23:59:59.999999").unwrap();
        let shown = format_display_timestamp(&ts);
        assert_eq!(shown, "2024-03-31 23:59:59");
        let back = parse_display_timestamp(&shown).unwrap();
        assert_eq!(back, ts.with_nanosecond(0).unwrap());
    }

    #[test]
    fn log_format_keeps_six_digits() {
        let ts = parse_log_timestamp("2024-06-01T00:00:00").unwrap();
        assert_eq!(format_log_timestamp(&ts), "2024-06-01T00:00:00.000000");
    }

    #[test]
    fn plot_seconds_are_unix_seconds() {
        let ts = parse_log_timestamp("1970-01-01T00:01:00.500000").unwrap();
        assert_eq!(to_plot_seconds(&ts), 60.5);
        assert_eq!(format_plot_seconds(60.5), "01-01 00:01");
    }
}
