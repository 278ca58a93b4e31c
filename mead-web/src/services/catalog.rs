//! Music catalog abstraction
//!
//! The HTTP layer and the playlist sync only talk to [`Catalog`]; the Spotify
//! client is the production implementation.

use async_trait::async_trait;
use mead_common::Track;
use thiserror::Error;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required credential or setting missing
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status with response body
    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

/// External music catalog operations
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search tracks; returns at most a page of normalized results
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, CatalogError>;

    /// Replace the playlist's contents with `uris`
    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;

    /// Append `uris` to the end of the playlist
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;
}
