//! Submission create, update and lookup

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use mead_common::models::SubmissionInput;
use mead_common::Submission;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Response for POST and PUT /api/submit
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub mode: &'static str,
    pub submission: Submission,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: Option<String>,
}

fn parse_body(payload: Result<Json<SubmissionInput>, JsonRejection>) -> ApiResult<SubmissionInput> {
    payload.map(|Json(input)| input).map_err(|rejection| {
        warn!("Rejected submission body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })
}

/// POST /api/submit
pub async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionInput>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let draft = parse_body(payload)?.validate()?;
    let submission = state.store.create(draft).await?;

    Ok(Json(SubmitResponse {
        ok: true,
        mode: "create",
        submission,
    }))
}

/// PUT /api/submit
///
/// Updates the submission whose name matches the posted name.
pub async fn update_submission(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionInput>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let draft = parse_body(payload)?.validate()?;
    let name = draft.name.clone();
    let submission = state.store.update_by_name(&name, draft).await?;

    Ok(Json(SubmitResponse {
        ok: true,
        mode: "update",
        submission,
    }))
}

/// GET /api/submission?name=...
pub async fn get_submission(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> ApiResult<Json<Submission>> {
    let name = query.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    state
        .store
        .find_by_name(name)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No submission for that name.".to_string()))
}

/// GET /api/submissions
pub async fn list_submissions(State(state): State<AppState>) -> Json<Vec<Submission>> {
    Json(state.store.list().await)
}
