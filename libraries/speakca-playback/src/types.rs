//! Core types for queue management

use serde::{Deserialize, Serialize};
use std::fmt;

/// A playable episode
///
/// Opaque stream identifier (the public URL of the audio object). The queue
/// never inspects it beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Episode(String);

impl Episode {
    /// Create an episode from its stream URL
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Stream URL
    pub fn url(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Episode {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for Episode {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl AsRef<str> for Episode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Snapshot of the queue manager, as reported to callers
///
/// `position` is `history.len() + 1`: the ordinal of the current episode in
/// this session, not an index into the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub position: usize,
    pub current: Option<Episode>,
    pub next: Option<Episode>,
    pub previous: Option<Episode>,
    /// Played episodes, oldest first
    pub history: Vec<Episode>,
}

/// Coarse playback phase derived from the manager state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "episode", rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Nothing started yet
    Idle,

    /// An episode is current
    Playing(Episode),

    /// The last `step()` found the queue empty
    Exhausted,
}
