//! Test helper modules for mead-web integration tests
//!
//! - FakeCatalog: in-process `Catalog` that records playlist writes
//! - MockSpotify: local HTTP server standing in for the Spotify APIs
//! - TestApp: router wired to a temp-dir store and a fake catalog

#![allow(dead_code)]

pub mod fake_catalog;
pub mod mock_spotify;
pub mod test_app;

pub use fake_catalog::{FakeCatalog, PlaylistCall};
pub use mock_spotify::MockSpotify;
pub use test_app::TestApp;
