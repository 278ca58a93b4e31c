//! Round prompts and playlist identifiers

use axum::{extract::State, Json};
use mead_common::models::Prompts;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistIdsResponse {
    pub wrapped_id: Option<String>,
    pub peace_id: Option<String>,
    pub worship_id: Option<String>,
}

/// GET /api/prompts
pub async fn get_prompts() -> Json<Prompts> {
    Json(Prompts::all())
}

/// GET /api/playlist-ids
///
/// Lets the browser embed the round playlists.
pub async fn get_playlist_ids(State(state): State<AppState>) -> Json<PlaylistIdsResponse> {
    let playlists = &state.settings.playlists;
    Json(PlaylistIdsResponse {
        wrapped_id: playlists.wrapped.clone(),
        peace_id: playlists.peace.clone(),
        worship_id: playlists.worship.clone(),
    })
}
