//! Submission data model
//!
//! A [`Submission`] holds one community member's picks, one [`Track`] per
//! [`Round`]. Field names on the wire are camelCase so the stored file and the
//! HTTP payloads share one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// One of the three fixed submission categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    Wrapped,
    Peace,
    Worship,
}

impl Round {
    /// All rounds, in the order they are presented and synced
    pub const ALL: [Round; 3] = [Round::Wrapped, Round::Peace, Round::Worship];

    /// Wire key used in JSON payloads and query strings
    pub fn key(self) -> &'static str {
        match self {
            Round::Wrapped => "wrapped",
            Round::Peace => "peace",
            Round::Worship => "worship",
        }
    }

    /// Prompt shown to submitters for this round
    pub fn title(self) -> &'static str {
        match self {
            Round::Wrapped => "Wrapped – Most listened to song of the year (no cheating)",
            Round::Peace => {
                "Passing of the Peace – Your chance to replace the passing of the peace music"
            }
            Round::Worship => "Worship Slaps – Favorite worship song",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Prompt metadata for a single round
#[derive(Debug, Clone, Serialize)]
pub struct Prompt {
    pub key: &'static str,
    pub title: &'static str,
}

impl From<Round> for Prompt {
    fn from(round: Round) -> Self {
        Self {
            key: round.key(),
            title: round.title(),
        }
    }
}

/// Prompt map served to the submission form, keyed by round
#[derive(Debug, Clone, Serialize)]
pub struct Prompts {
    pub wrapped: Prompt,
    pub peace: Prompt,
    pub worship: Prompt,
}

impl Prompts {
    pub fn all() -> Self {
        Self {
            wrapped: Round::Wrapped.into(),
            peace: Round::Peace.into(),
            worship: Round::Worship.into(),
        }
    }
}

/// A single song reference plus the submitter's optional caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    /// Artist names joined for display ("A, B")
    pub artists: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Per-round picks of one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rounds {
    #[serde(default)]
    pub wrapped: Option<Track>,
    #[serde(default)]
    pub peace: Option<Track>,
    #[serde(default)]
    pub worship: Option<Track>,
}

impl Rounds {
    pub fn get(&self, round: Round) -> Option<&Track> {
        match round {
            Round::Wrapped => self.wrapped.as_ref(),
            Round::Peace => self.peace.as_ref(),
            Round::Worship => self.worship.as_ref(),
        }
    }

    fn slot_mut(&mut self, round: Round) -> &mut Option<Track> {
        match round {
            Round::Wrapped => &mut self.wrapped,
            Round::Peace => &mut self.peace,
            Round::Worship => &mut self.worship,
        }
    }

    /// Overlay `changes` onto these rounds; rounds absent from `changes` are kept
    pub fn merge(&mut self, changes: Rounds) {
        let mut changes = changes;
        for round in Round::ALL {
            if let Some(track) = changes.slot_mut(round).take() {
                *self.slot_mut(round) = Some(track);
            }
        }
    }
}

/// A stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rounds: Rounds,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Normalized form of a name used for uniqueness checks
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        Self::name_key(&self.name) == Self::name_key(name)
    }
}

/// Track as posted by a client; every field may be missing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackInput {
    pub id: Option<String>,
    pub uri: Option<String>,
    pub name: Option<String>,
    pub artists: Option<String>,
    pub album: Option<String>,
    pub image: Option<String>,
    pub caption: Option<String>,
}

impl TrackInput {
    fn into_track(self, round: Round) -> Result<Track> {
        let missing = || Error::InvalidInput(format!("Missing track info for {}", round));
        let required = |v: Option<String>| v.filter(|s| !s.is_empty()).ok_or_else(missing);

        Ok(Track {
            id: required(self.id)?,
            uri: required(self.uri)?,
            name: required(self.name)?,
            artists: required(self.artists)?,
            album: self.album.unwrap_or_default(),
            image: self.image.filter(|s| !s.is_empty()),
            caption: self.caption,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoundsInput {
    #[serde(default)]
    pub wrapped: Option<TrackInput>,
    #[serde(default)]
    pub peace: Option<TrackInput>,
    #[serde(default)]
    pub worship: Option<TrackInput>,
}

/// Body of `POST /api/submit` and `PUT /api/submit`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rounds: Option<RoundsInput>,
}

/// Validated submission contents, ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    /// Trimmed, non-empty name
    pub name: String,
    pub rounds: Rounds,
}

impl SubmissionInput {
    /// Validate the posted payload
    ///
    /// The name must be non-blank and every round must carry a track with
    /// `id`, `uri`, `name` and `artists`.
    pub fn validate(self) -> Result<SubmissionDraft> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::InvalidInput("Name is required".to_string()))?;

        let mut input = self.rounds.unwrap_or_default();
        let mut take = |round: Round| -> Result<Track> {
            let slot = match round {
                Round::Wrapped => input.wrapped.take(),
                Round::Peace => input.peace.take(),
                Round::Worship => input.worship.take(),
            };
            slot.ok_or_else(|| {
                Error::InvalidInput(format!("Missing track info for {}", round))
            })?
            .into_track(round)
        };

        let rounds = Rounds {
            wrapped: Some(take(Round::Wrapped)?),
            peace: Some(take(Round::Peace)?),
            worship: Some(take(Round::Worship)?),
        };

        Ok(SubmissionDraft { name, rounds })
    }
}
