//! Outbound integrations and background work

pub mod catalog;
pub mod keepalive;
pub mod playlist_sync;
pub mod spotify_auth;
pub mod spotify_client;

pub use catalog::{Catalog, CatalogError};
pub use playlist_sync::{sync_playlists, SyncError, SyncReport};
pub use spotify_auth::SpotifyAuth;
pub use spotify_client::SpotifyClient;
