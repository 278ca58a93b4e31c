//! # MusicMead Common Library
//!
//! Shared code for the MusicMead submission service:
//! - Submission and track models
//! - JSON-file submission store
//! - Configuration file loading and data folder resolution
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use models::{Round, Rounds, Submission, SubmissionInput, Track};
pub use store::{StoreError, SubmissionStore};
