//! Location record

use serde::{Deserialize, Serialize};

/// A geocoded place.
///
/// `search_query` is the raw search string the user sent, kept verbatim:
/// it is the cache key, so later lookups with the same string must match
/// this row exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(
        search_query: String,
        formatted_query: String,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            search_query,
            formatted_query,
            latitude,
            longitude,
        }
    }
}
