//! Local event records

use crate::date;
use serde::{Deserialize, Serialize};

/// One event near a cached search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub link: String,
    pub name: String,
    pub event_date: String,
    pub summary: String,
    pub search_query: String,
}

impl EventRecord {
    /// Build a record from a provider search hit. `start_local` arrives as
    /// an ISO local datetime and is stored as a truncated date string.
    pub fn from_search_hit(
        link: String,
        name: String,
        start_local: &str,
        summary: String,
        search_query: String,
    ) -> Self {
        Self {
            link,
            name,
            event_date: date::from_local_datetime(start_local),
            summary,
            search_query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_search_hit_renders_event_date() {
        let event = EventRecord::from_search_hit(
            "https://example.com/e/1".to_string(),
            "Night Market".to_string(),
            "2018-01-01T19:00:00",
            "An evening market.".to_string(),
            "seattle".to_string(),
        );
        assert_eq!(event.event_date, "Mon Jan 01 2018");
        assert_eq!(event.name, "Night Market");
        assert_eq!(event.search_query, "seattle");
    }
}
