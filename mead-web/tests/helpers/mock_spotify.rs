//! Local HTTP server standing in for the Spotify accounts and Web APIs

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Form, Json, Router,
};
use mead_web::config::SpotifyConfig;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub method: &'static str,
    pub playlist: String,
    pub uris: Vec<String>,
}

#[derive(Default)]
pub struct MockState {
    pub token_requests: AtomicUsize,
    pub grants: Mutex<Vec<HashMap<String, String>>>,
    pub search_params: Mutex<Vec<HashMap<String, String>>>,
    pub bearer_tokens: Mutex<Vec<String>>,
    pub writes: Mutex<Vec<RecordedWrite>>,
    pub fail_writes: AtomicBool,
    pub health_hits: AtomicUsize,
    /// Lifetime handed out with access tokens
    pub expires_in: AtomicUsize,
}

pub struct MockSpotify {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

type Shared = State<Arc<MockState>>;

fn record_bearer(state: &MockState, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.bearer_tokens.lock().unwrap().push(value.to_string());
    }
}

async fn token(State(state): Shared, Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    let n = state.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
    let is_code = form.get("grant_type").map(String::as_str) == Some("authorization_code");
    state.grants.lock().unwrap().push(form);

    let mut body = json!({
        "access_token": format!("access-{}", n),
        "token_type": "Bearer",
        "expires_in": state.expires_in.load(Ordering::SeqCst),
    });
    if is_code {
        body["refresh_token"] = json!("refresh-from-code");
    }
    Json(body)
}

async fn search(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    record_bearer(&state, &headers);
    state.search_params.lock().unwrap().push(params);

    Json(json!({
        "tracks": { "items": [
            {
                "id": "t1",
                "uri": "spotify:track:t1",
                "name": "Way Maker",
                "artists": [{ "name": "Sinach" }, { "name": "Leeland" }],
                "album": { "name": "Way Maker", "images": [{ "url": "https://img/1" }] }
            }
        ]}
    }))
}

async fn write(
    state: &MockState,
    method: &'static str,
    headers: &HeaderMap,
    playlist: String,
    body: Value,
) -> (StatusCode, Json<Value>) {
    record_bearer(state, headers);
    if state.fail_writes.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": { "status": 403, "message": "Forbidden" } })),
        );
    }

    let uris = body["uris"]
        .as_array()
        .map(|a| a.iter().filter_map(|u| u.as_str().map(String::from)).collect())
        .unwrap_or_default();
    state.writes.lock().unwrap().push(RecordedWrite {
        method,
        playlist,
        uris,
    });
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" })))
}

async fn replace(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    write(&state, "PUT", &headers, id, body).await
}

async fn append(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    write(&state, "POST", &headers, id, body).await
}

async fn healthz(State(state): Shared) -> Json<Value> {
    state.health_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "status": "ok" }))
}

impl MockSpotify {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        state.expires_in.store(3600, Ordering::SeqCst);

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/search", get(search))
            .route("/v1/playlists/:id/tracks", put(replace).post(append))
            .route("/healthz", get(healthz))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind mock server");
        let addr = listener.local_addr().expect("Should have local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Spotify config pointing at this server
    pub fn config(&self, refresh_token: Option<&str>) -> SpotifyConfig {
        SpotifyConfig {
            client_id: Some("client-123".to_string()),
            client_secret: Some("secret".to_string()),
            redirect_uri: Some("http://localhost:3000/auth/callback".to_string()),
            refresh_token: refresh_token.map(String::from),
            api_base: self.url("/v1"),
            accounts_base: self.url(""),
        }
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.state.writes.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }
}
