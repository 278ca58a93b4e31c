//! Spotify Web API client
//!
//! Holds the current access token in memory and refreshes it through
//! [`SpotifyAuth`] once it is within a minute of expiring. No request is
//! retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use mead_common::Track;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::catalog::{Catalog, CatalogError};
use super::spotify_auth::{SpotifyAuth, HTTP_TIMEOUT, USER_AGENT};

/// Results returned per search
pub const SEARCH_LIMIT: u32 = 10;

/// Tokens this close to expiry are refreshed instead of reused
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on the lifetime trusted from a token response
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn new(access_token: String, expires_in: u64, now: Instant) -> Self {
        let lifetime = Duration::from_secs(expires_in).min(MAX_TOKEN_LIFETIME);
        Self {
            access_token,
            expires_at: now + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    items: Vec<ApiTrack>,
}

#[derive(Debug, Deserialize)]
struct ApiTrack {
    id: String,
    uri: String,
    name: String,
    #[serde(default)]
    artists: Vec<ApiArtist>,
    album: ApiAlbum,
}

#[derive(Debug, Deserialize)]
struct ApiArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiAlbum {
    name: String,
    #[serde(default)]
    images: Vec<ApiImage>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    url: String,
}

impl From<ApiTrack> for Track {
    fn from(t: ApiTrack) -> Self {
        Track {
            id: t.id,
            uri: t.uri,
            name: t.name,
            artists: t
                .artists
                .into_iter()
                .map(|a| a.name)
                .collect::<Vec<_>>()
                .join(", "),
            album: t.album.name,
            image: t.album.images.into_iter().next().map(|i| i.url),
            caption: None,
        }
    }
}

#[derive(Serialize)]
struct UrisBody<'a> {
    uris: &'a [String],
}

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    api_base: String,
    auth: Arc<SpotifyAuth>,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(api_base: impl Into<String>, auth: Arc<SpotifyAuth>) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_base: api_base.into(),
            auth,
            token: Mutex::new(None),
        })
    }

    /// Current access token, refreshed if missing or near expiry
    pub async fn access_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.access_token.clone());
        }

        let response = self.auth.refresh().await?;
        let token = CachedToken::new(response.access_token, response.expires_in, Instant::now());
        debug!(expires_in = response.expires_in, "Refreshed Spotify access token");

        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn write_playlist(
        &self,
        method: Method,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), CatalogError> {
        let token = self.access_token().await?;
        let url = format!("{}/playlists/{}/tracks", self.api_base, playlist_id);

        let response = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(token)
            .json(&UrisBody { uris })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        debug!(%method, playlist_id, count = uris.len(), "Playlist tracks written");
        Ok(())
    }
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, CatalogError> {
        let token = self.access_token().await?;
        let url = format!("{}/search", self.api_base);
        let limit = SEARCH_LIMIT.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let tracks: Vec<Track> = body.tracks.items.into_iter().map(Track::from).collect();
        info!(query, results = tracks.len(), "Spotify search");
        Ok(tracks)
    }

    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.write_playlist(Method::PUT, playlist_id, uris).await
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.write_playlist(Method::POST, playlist_id, uris).await
    }
}
