//! Recording catalog for HTTP-level tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mead_common::Track;
use mead_web::services::{Catalog, CatalogError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistCall {
    Replace { playlist: String, count: usize },
    Append { playlist: String, count: usize },
}

#[derive(Default)]
pub struct FakeCatalog {
    pub calls: Mutex<Vec<PlaylistCall>>,
    pub searches: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeCatalog {
    pub fn calls(&self) -> Vec<PlaylistCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(CatalogError::Api(500, "upstream down".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn sample_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        name: format!("Song {}", id),
        artists: "Hillsong UNITED".to_string(),
        album: "Album".to_string(),
        image: None,
        caption: None,
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, CatalogError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(vec![sample_track(&format!("{}-1", query)), sample_track(&format!("{}-2", query))])
    }

    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.check()?;
        self.calls.lock().unwrap().push(PlaylistCall::Replace {
            playlist: playlist_id.to_string(),
            count: uris.len(),
        });
        Ok(())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.check()?;
        self.calls.lock().unwrap().push(PlaylistCall::Append {
            playlist: playlist_id.to_string(),
            count: uris.len(),
        });
        Ok(())
    }
}
