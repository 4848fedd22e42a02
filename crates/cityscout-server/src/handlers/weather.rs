//! Weather handler

use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use cityscout_types::WeatherDay;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// URL-encoded JSON of a previously resolved location.
    data: String,
}

/// The fields of the prior location result this handler needs. Extra
/// fields in `data` (the client echoes the whole location back) are
/// ignored.
#[derive(Debug, Deserialize)]
struct LocationParam {
    latitude: f64,
    longitude: f64,
    search_query: String,
}

pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<Vec<WeatherDay>>, StatusCode> {
    let location: LocationParam = serde_json::from_str(&params.data).map_err(|e| {
        tracing::warn!("Rejecting malformed weather query: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    match state
        .resolver
        .resolve_weather(&location.search_query, location.latitude, location.longitude)
        .await
    {
        Ok(days) => Ok(Json(days)),
        Err(e) => {
            tracing::error!("Failed to resolve weather: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_param_accepts_full_location_object() {
        let data = r#"{
            "search_query": "seattle",
            "formatted_query": "Seattle, WA, USA",
            "latitude": 47.6062,
            "longitude": -122.3321
        }"#;
        let param: LocationParam = serde_json::from_str(data).expect("parse");
        assert_eq!(param.search_query, "seattle");
        assert_eq!(param.latitude, 47.6062);
        assert_eq!(param.longitude, -122.3321);
    }

    #[test]
    fn test_location_param_rejects_missing_coordinates() {
        let data = r#"{"search_query": "seattle"}"#;
        assert!(serde_json::from_str::<LocationParam>(data).is_err());
    }
}
