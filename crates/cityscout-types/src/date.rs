//! Truncated date rendering shared by the weather and event records.

use chrono::{DateTime, NaiveDateTime};

/// Weekday, month, zero-padded day, year - e.g. "Mon Jan 01 2018".
const TRUNCATED_DATE_FORMAT: &str = "%a %b %d %Y";

/// Render a unix timestamp (seconds) as a truncated date string, in UTC.
/// Falls back to the raw timestamp for out-of-range values.
pub fn from_unix_seconds(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format(TRUNCATED_DATE_FORMAT).to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Render an ISO local datetime ("2018-01-01T19:00:00") as a truncated
/// date string. Falls back to the input verbatim if it doesn't parse.
pub fn from_local_datetime(local: &str) -> String {
    NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.format(TRUNCATED_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| local.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_seconds_renders_truncated_date() {
        // 2018-01-01T00:00:00Z
        assert_eq!(from_unix_seconds(1_514_764_800), "Mon Jan 01 2018");
    }

    #[test]
    fn test_unix_seconds_mid_day_same_date() {
        // 2018-01-01T18:30:00Z
        assert_eq!(from_unix_seconds(1_514_831_400), "Mon Jan 01 2018");
    }

    #[test]
    fn test_local_datetime_renders_truncated_date() {
        assert_eq!(from_local_datetime("2018-01-01T19:00:00"), "Mon Jan 01 2018");
    }

    #[test]
    fn test_local_datetime_unparsable_passes_through() {
        assert_eq!(from_local_datetime("not-a-date"), "not-a-date");
    }
}
