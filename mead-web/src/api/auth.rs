//! Admin gate
//!
//! One stateless policy: each admin request carries the configured password,
//! either in the `x-admin-password` header or in a `pw`, `password` or `admin`
//! query parameter. A non-empty header wins when both are present; empty
//! values count as absent.

use axum::{
    extract::{Query, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Query parameters accepted in place of the header
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pw: Option<String>,
    password: Option<String>,
    admin: Option<String>,
}

impl AdminQuery {
    fn password(self) -> Option<String> {
        [self.pw, self.password, self.admin]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
    }
}

/// Admin authentication middleware
///
/// Returns 500 when no admin password is configured and 401 when the request
/// does not present it.
pub async fn require_admin(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.settings.admin_password.as_deref() else {
        return Err(ApiError::Internal(
            "ADMIN_PASSWORD is not configured on the server.".to_string(),
        ));
    };

    let provided = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| query.password());

    if provided.as_deref() != Some(expected) {
        warn!(path = %request.uri().path(), "Rejected admin request");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
