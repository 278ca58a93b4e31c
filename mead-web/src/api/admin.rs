//! Admin endpoints
//!
//! Everything here except [`admin_enabled`] is mounted behind
//! [`super::require_admin`].

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::services::{playlist_sync, SyncReport};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AdminEnabledResponse {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub ok: bool,
    /// Submissions the playlists were built from
    pub count: usize,
    pub report: SyncReport,
}

/// GET /api/admin/enabled
///
/// Tells the browser whether to render admin links and buttons.
pub async fn admin_enabled(State(state): State<AppState>) -> Json<AdminEnabledResponse> {
    Json(AdminEnabledResponse {
        enabled: state.settings.admin_ui_enabled(),
    })
}

/// DELETE /api/admin/submission/:id
pub async fn delete_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    if !state.store.delete(&id).await? {
        return Err(ApiError::NotFound("Submission not found".to_string()));
    }
    Ok(Json(OkResponse { ok: true }))
}

/// POST /api/admin/sync
///
/// Rebuilds the three round playlists from the stored submissions.
pub async fn sync_playlists(State(state): State<AppState>) -> ApiResult<Json<SyncResponse>> {
    let submissions = state.store.list().await;

    let report = playlist_sync::sync_playlists(
        state.catalog.as_ref(),
        &state.settings.playlists,
        &submissions,
    )
    .await
    .map_err(|e| {
        error!("Error syncing playlists: {}", e);
        ApiError::Internal("Failed to sync playlists".to_string())
    })?;

    info!(count = submissions.len(), "Playlists synced from submissions");
    Ok(Json(SyncResponse {
        ok: true,
        count: submissions.len(),
        report,
    }))
}
