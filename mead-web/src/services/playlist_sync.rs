//! Playlist sync
//!
//! Rebuilds each round's playlist from the current submissions: the first page
//! of up to [`PAGE_SIZE`] URIs replaces the playlist contents, every further
//! page is appended. An empty round clears its playlist.
//!
//! Calls run strictly in sequence (wrapped, peace, worship). A failure stops
//! the sync where it is; playlists already written stay written.

use mead_common::{Round, Submission};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use super::catalog::{Catalog, CatalogError};
use crate::config::PlaylistIds;

/// Maximum URIs per playlist write call
pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Playlist IDs are not all set")]
    MissingPlaylistIds,

    #[error("Sync of {round} playlist failed: {source}")]
    Catalog {
        round: Round,
        #[source]
        source: CatalogError,
    },
}

/// Outcome of one round's playlist rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSync {
    pub round: Round,
    pub playlist_id: String,
    pub tracks: usize,
    pub replace_calls: usize,
    pub append_calls: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub rounds: Vec<RoundSync>,
}

/// Track URIs picked for `round`, in submission order
pub fn collect_uris(submissions: &[Submission], round: Round) -> Vec<String> {
    submissions
        .iter()
        .filter_map(|s| s.rounds.get(round))
        .filter(|t| !t.uri.is_empty())
        .map(|t| t.uri.clone())
        .collect()
}

/// Replace a playlist's contents with `uris`, paging as needed
pub async fn replace_playlist(
    catalog: &dyn Catalog,
    playlist_id: &str,
    uris: &[String],
) -> Result<(usize, usize), CatalogError> {
    let mut pages = uris.chunks(PAGE_SIZE);

    let first = pages.next().unwrap_or(&[]);
    catalog.replace_tracks(playlist_id, first).await?;

    let mut append_calls = 0;
    for page in pages {
        catalog.append_tracks(playlist_id, page).await?;
        append_calls += 1;
    }

    Ok((1, append_calls))
}

/// Rewrite all three round playlists from `submissions`
pub async fn sync_playlists(
    catalog: &dyn Catalog,
    playlists: &PlaylistIds,
    submissions: &[Submission],
) -> Result<SyncReport, SyncError> {
    let targets = playlists.all().ok_or(SyncError::MissingPlaylistIds)?;
    let mut report = SyncReport::default();

    for (round, playlist_id) in targets {
        let uris = collect_uris(submissions, round);

        let (replace_calls, append_calls) = replace_playlist(catalog, playlist_id, &uris)
            .await
            .map_err(|source| {
                error!(%round, playlist_id, "Playlist sync failed: {}", source);
                SyncError::Catalog { round, source }
            })?;

        info!(%round, playlist_id, tracks = uris.len(), append_calls, "Playlist synced");
        report.rounds.push(RoundSync {
            round,
            playlist_id: playlist_id.to_string(),
            tracks: uris.len(),
            replace_calls,
            append_calls,
        });
    }

    Ok(report)
}
