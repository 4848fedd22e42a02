//! Weather forecast records

use crate::date;
use serde::{Deserialize, Serialize};

/// One day of forecast for a cached search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    pub forecast: String,
    pub time: String,
    pub search_query: String,
}

impl WeatherDay {
    /// Build a record from a provider forecast entry. `time` arrives as a
    /// unix timestamp and is stored as a truncated date string.
    pub fn from_daily(summary: String, time: i64, search_query: String) -> Self {
        Self {
            forecast: summary,
            time: date::from_unix_seconds(time),
            search_query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_daily_renders_time_as_date_string() {
        let day = WeatherDay::from_daily(
            "Partly cloudy throughout the day.".to_string(),
            1_514_764_800,
            "seattle".to_string(),
        );
        assert_eq!(day.time, "Mon Jan 01 2018");
        assert_eq!(day.forecast, "Partly cloudy throughout the day.");
        assert_eq!(day.search_query, "seattle");
    }
}
