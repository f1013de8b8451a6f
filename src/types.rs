//! Core types for radarr-autograb

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a Radarr movie
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl MovieId {
    /// Create a new MovieId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MovieId> for i64 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A candidate release returned by a Radarr release search
///
/// Field names follow the Radarr v3 release resource (camelCase on the wire).
/// Only the fields consumed by the selection policy and the grab command are
/// modeled; unknown fields are ignored on deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Unique identifier of the release at its indexer
    #[serde(default)]
    pub guid: Option<String>,

    /// Identifier of the indexer that produced this release
    #[serde(default)]
    pub indexer_id: Option<i64>,

    /// Human-readable release title
    pub title: String,

    /// Display name of the indexer
    #[serde(default)]
    pub indexer: Option<String>,

    /// Release size in bytes
    #[serde(default)]
    pub size: Option<u64>,

    /// Seeder count (torrent protocol only)
    #[serde(default)]
    pub seeders: Option<u32>,

    /// Leecher count (torrent protocol only)
    #[serde(default)]
    pub leechers: Option<u32>,

    /// Transfer protocol ("usenet" or "torrent")
    #[serde(default)]
    pub protocol: Option<String>,

    /// Aggregate custom-format score assigned by Radarr's quality profile
    ///
    /// A score of exactly zero is indistinguishable from "no score" and makes
    /// the selector fall back to the point-based heuristic.
    #[serde(default)]
    pub custom_format_score: Option<i64>,

    /// When the release was published at the indexer
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,

    /// Whether Radarr rejected this release against the quality profile
    #[serde(default)]
    pub rejected: bool,

    /// Rejection reasons, when `rejected` is set
    #[serde(default)]
    pub rejections: Vec<String>,
}

impl Release {
    /// Custom-format score with a missing score treated as zero
    pub fn custom_score(&self) -> i64 {
        self.custom_format_score.unwrap_or(0)
    }
}

/// Event emitted during the grab workflow
///
/// Progress events are fire-and-forget status lines for UIs. An `Error` event
/// is emitted exactly once before the workflow returns the corresponding
/// error.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Status line for display while a stage is in flight
    Progress {
        /// Human-readable status message
        message: String,
    },

    /// Human-readable failure notification, emitted before the error return
    Error {
        /// Human-readable error message
        message: String,
    },

    /// The grab command was accepted by Radarr
    Grabbed {
        /// Title of the grabbed release
        title: String,
    },
}

/// Summary of a completed grab workflow
#[derive(Clone, Debug)]
pub struct GrabOutcome {
    /// The release whose grab command was accepted
    pub release: Release,

    /// Number of candidate releases considered by the selector
    pub candidates: usize,

    /// Whether the fallback heuristic decided the selection
    ///
    /// True when the winner's custom-format score was zero, i.e. the
    /// point-based heuristic was consulted.
    pub used_fallback: bool,
}
