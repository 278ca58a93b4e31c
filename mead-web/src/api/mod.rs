//! HTTP API handlers for mead-web

pub mod admin;
pub mod auth;
pub mod health;
pub mod oauth;
pub mod prompts;
pub mod search;
pub mod submissions;

pub use admin::{admin_enabled, delete_submission, sync_playlists};
pub use auth::require_admin;
pub use health::health_routes;
pub use oauth::{oauth_callback, oauth_login};
pub use prompts::{get_playlist_ids, get_prompts};
pub use search::search;
pub use submissions::{create_submission, get_submission, list_submissions, update_submission};
