//! One-time Spotify authorization flow
//!
//! The operator visits `/auth/login`, consents, and is redirected back to
//! `/auth/callback`. The refresh token from the code exchange is written to
//! the log to be copied into `SPOTIFY_REFRESH_TOKEN`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// GET /auth/login
pub async fn oauth_login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = state.auth.authorize_url().map_err(|e| {
        error!("Cannot start Spotify auth: {}", e);
        ApiError::Internal(e.to_string())
    })?;
    Ok(Redirect::to(&url))
}

/// GET /auth/callback
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if let Some(err) = query.error {
        warn!("Spotify auth returned error: {}", err);
        return format!("Error from Spotify auth: {}", err).into_response();
    }

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing authorization code").into_response();
    };

    match state.auth.exchange_code(&code).await {
        Ok(tokens) => match tokens.refresh_token {
            Some(refresh_token) => {
                info!("Your refresh token: {}", refresh_token);
                "Success! Check your server logs for the refresh token and set it as SPOTIFY_REFRESH_TOKEN."
                    .into_response()
            }
            None => {
                warn!("Spotify code exchange returned no refresh token");
                (StatusCode::BAD_GATEWAY, "Auth succeeded but no refresh token was returned")
                    .into_response()
            }
        },
        Err(e) => {
            error!("Auth callback error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Auth failed").into_response()
        }
    }
}
