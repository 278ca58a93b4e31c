//! Router wired to a temp-dir store and a recording catalog

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mead_common::SubmissionStore;
use mead_web::config::{PlaylistIds, Settings, SpotifyConfig};
use mead_web::services::SpotifyAuth;
use mead_web::{build_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

use super::FakeCatalog;

pub const ADMIN_PASSWORD: &str = "letmein";

pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<FakeCatalog>,
    pub state: AppState,
    _dir: TempDir,
}

pub fn test_settings() -> Settings {
    Settings {
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        playlists: PlaylistIds {
            wrapped: Some("pl-wrapped".to_string()),
            peace: Some("pl-peace".to_string()),
            worship: Some("pl-worship".to_string()),
        },
        spotify: SpotifyConfig {
            client_id: Some("client-123".to_string()),
            client_secret: Some("secret".to_string()),
            redirect_uri: Some("http://localhost:3000/auth/callback".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(|_| {})
    }

    pub fn with_settings(configure: impl FnOnce(&mut Settings)) -> Self {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut settings = test_settings();
        settings.data_dir = dir.path().join("data");
        configure(&mut settings);

        let store = SubmissionStore::in_dir(&settings.data_dir);
        let catalog = Arc::new(FakeCatalog::default());
        let auth = Arc::new(SpotifyAuth::new(settings.spotify.clone()).expect("Should build auth"));

        let state = AppState::new(store, catalog.clone(), auth, settings);
        let router = build_router(state.clone());

        Self {
            router,
            catalog,
            state,
            _dir: dir,
        }
    }

    /// Send a request and return status plus parsed JSON body (Null if not JSON)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router should respond");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request("GET", uri, None)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(request("POST", uri, Some(body))).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(request("PUT", uri, Some(body))).await
    }

    /// Request carrying the admin password header
    pub async fn admin(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let mut req = request(method, uri, None);
        req.headers_mut().insert(
            "x-admin-password",
            ADMIN_PASSWORD.parse().expect("valid header value"),
        );
        self.send(req).await
    }
}

pub fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
