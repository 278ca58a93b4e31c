//! JSON-file submission store
//!
//! The whole collection lives in a single JSON array file that is read on
//! every operation and rewritten wholesale on every mutation. Names are the
//! user-facing key and are matched case-insensitively after trimming; ids are
//! opaque UUID strings used by admin actions.
//!
//! Reads share and mutations exclusively hold an async `RwLock`, and every
//! rewrite goes to a sibling temp file renamed over the original, so readers
//! never see a half-written file. Separate processes sharing the file are not
//! coordinated (last write wins).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::SUBMISSIONS_FILE;
use crate::models::{Submission, SubmissionDraft};
use crate::time;

/// Submission store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A submission with that name already exists.")]
    DuplicateName,

    #[error("No existing submission found for that name.")]
    NotFound,

    #[error("Submission file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Submission file serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Submission store backed by one JSON file
#[derive(Debug)]
pub struct SubmissionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl SubmissionStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Store backed by `submissions.json` inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SUBMISSIONS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data folder and an empty `[]` file if either is missing
    pub async fn ensure_file_exists(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        if tokio::fs::metadata(&self.path).await.is_err() {
            tokio::fs::write(&self.path, "[]").await?;
        }
        Ok(())
    }

    async fn try_read(&self) -> Result<Vec<Submission>, StoreError> {
        self.ensure_file_exists().await?;
        let text = tokio::fs::read_to_string(&self.path).await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Read the collection; unreadable or corrupt files read as empty
    async fn read_all(&self) -> Vec<Submission> {
        match self.try_read().await {
            Ok(submissions) => submissions,
            Err(e) => {
                error!("Error reading {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn write_all(&self, submissions: &[Submission]) -> Result<(), StoreError> {
        self.ensure_file_exists().await?;
        let json = serde_json::to_string_pretty(submissions)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log_snapshot(submissions);
        Ok(())
    }

    /// All submissions in insertion order
    pub async fn list(&self) -> Vec<Submission> {
        let _guard = self.lock.read().await;
        self.read_all().await
    }

    /// Find a submission by case-insensitive name
    pub async fn find_by_name(&self, name: &str) -> Option<Submission> {
        let _guard = self.lock.read().await;
        self.read_all()
            .await
            .into_iter()
            .find(|s| s.matches_name(name))
    }

    /// Create a submission; fails if the name is already taken
    pub async fn create(&self, draft: SubmissionDraft) -> Result<Submission, StoreError> {
        let _guard = self.lock.write().await;
        let mut submissions = self.read_all().await;

        if submissions.iter().any(|s| s.matches_name(&draft.name)) {
            return Err(StoreError::DuplicateName);
        }

        let submission = Submission {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            rounds: draft.rounds,
            created_at: time::now(),
            updated_at: None,
        };

        submissions.push(submission.clone());
        self.write_all(&submissions).await?;
        info!(id = %submission.id, name = %submission.name, "Submission created");
        Ok(submission)
    }

    /// Update the submission matching `name`
    ///
    /// Replaces the name with the draft's, overlays the draft's rounds, keeps
    /// `id` and `createdAt`, and stamps `updatedAt`.
    pub async fn update_by_name(
        &self,
        name: &str,
        draft: SubmissionDraft,
    ) -> Result<Submission, StoreError> {
        let _guard = self.lock.write().await;
        let mut submissions = self.read_all().await;

        let existing = submissions
            .iter_mut()
            .find(|s| s.matches_name(name))
            .ok_or(StoreError::NotFound)?;

        existing.name = draft.name.trim().to_string();
        existing.rounds.merge(draft.rounds);
        existing.updated_at = Some(time::now());
        let updated = existing.clone();

        self.write_all(&submissions).await?;
        info!(id = %updated.id, name = %updated.name, "Submission updated");
        Ok(updated)
    }

    /// Delete by id; `Ok(false)` if no submission has that id
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.write().await;
        let mut submissions = self.read_all().await;

        let Some(idx) = submissions.iter().position(|s| s.id == id) else {
            return Ok(false);
        };

        let removed = submissions.remove(idx);
        self.write_all(&submissions).await?;
        info!(id = %removed.id, name = %removed.name, "Submission deleted");
        Ok(true)
    }
}

/// Log the full collection so it can be recovered from logs on hosts with
/// ephemeral disks
fn log_snapshot(submissions: &[Submission]) {
    match serde_json::to_string(submissions) {
        Ok(json) => info!(
            "SUBMISSIONS_SNAPSHOT [{}]: {}",
            time::to_iso(time::now()),
            json
        ),
        Err(e) => error!("Error logging submissions: {}", e),
    }
}
