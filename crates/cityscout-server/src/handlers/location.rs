//! Location handler

use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use cityscout_types::Location;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    /// Raw search string, e.g. "Seattle".
    data: String,
}

pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Location>, StatusCode> {
    match state.resolver.resolve_location(&params.data).await {
        Ok(location) => Ok(Json(location)),
        Err(e) => {
            tracing::error!("Failed to resolve location: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
