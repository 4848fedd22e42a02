//! Events handler

use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use cityscout_types::EventRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// URL-encoded JSON of a previously resolved location.
    data: String,
}

/// The fields of the prior location result this handler needs.
#[derive(Debug, Deserialize)]
struct LocationParam {
    formatted_query: String,
    search_query: String,
}

pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<Vec<EventRecord>>, StatusCode> {
    let location: LocationParam = serde_json::from_str(&params.data).map_err(|e| {
        tracing::warn!("Rejecting malformed events query: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    match state
        .resolver
        .resolve_events(&location.search_query, &location.formatted_query)
        .await
    {
        Ok(events) => Ok(Json(events)),
        Err(e) => {
            tracing::error!("Failed to resolve events: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
