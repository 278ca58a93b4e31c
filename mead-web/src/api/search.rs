//! Catalog search

use axum::{
    extract::{Query, State},
    Json,
};
use mead_common::Track;
use serde::Deserialize;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/search?q=...
///
/// A blank query returns an empty list without calling the catalog.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Track>>> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let tracks = state.catalog.search_tracks(q).await.map_err(|e| {
        error!("Error in /api/search: {}", e);
        ApiError::Internal("Spotify search failed".to_string())
    })?;

    Ok(Json(tracks))
}
