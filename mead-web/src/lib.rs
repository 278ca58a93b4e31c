//! mead-web library - song submission service
//!
//! Public endpoints let members submit, look up and update their picks;
//! admin endpoints (password-gated) delete submissions and rebuild the round
//! playlists.

use std::sync::Arc;

use axum::Router;
use mead_common::SubmissionStore;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod services;

use config::Settings;
use services::{Catalog, SpotifyAuth};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SubmissionStore>,
    /// Track search and playlist writes
    pub catalog: Arc<dyn Catalog>,
    /// One-time OAuth setup flow
    pub auth: Arc<SpotifyAuth>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        store: SubmissionStore,
        catalog: Arc<dyn Catalog>,
        auth: Arc<SpotifyAuth>,
        settings: Settings,
    ) -> Self {
        Self {
            store: Arc::new(store),
            catalog,
            auth,
            settings: Arc::new(settings),
        }
    }
}

/// Build application router
///
/// Admin routes sit behind [`api::require_admin`]; everything else is public.
/// When a public directory is configured, unmatched paths are served from it.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post};

    let admin = Router::new()
        .route("/api/admin/submission/:id", delete(api::delete_submission))
        .route("/api/admin/sync", post(api::sync_playlists))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_admin,
        ));

    let public = Router::new()
        .route("/api/prompts", get(api::get_prompts))
        .route("/api/playlist-ids", get(api::get_playlist_ids))
        .route("/api/search", get(api::search))
        .route(
            "/api/submit",
            post(api::create_submission).put(api::update_submission),
        )
        .route("/api/submission", get(api::get_submission))
        .route("/api/submissions", get(api::list_submissions))
        .route("/api/admin/enabled", get(api::admin_enabled))
        .route("/auth/login", get(api::oauth_login))
        .route("/auth/callback", get(api::oauth_callback))
        .merge(api::health_routes());

    let mut router = Router::new().merge(admin).merge(public);

    if let Some(dir) = &state.settings.public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
