//! Forward queue
//!
//! Episodes not yet played in the current session:
//! ```text
//! Current: Episode A
//! ─────────────────────────────
//! Queue (front plays next):
//!   - Episode B   <- step() pops here, step_back() pushes here
//!   - Episode C
//!   - Episode D   <- add()/extend() append here
//! ```

use crate::types::Episode;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct Queue {
    episodes: VecDeque<Episode>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue seeded from a playlist, in playlist order
    pub fn from_playlist(playlist: &[Episode]) -> Self {
        Self {
            episodes: playlist.iter().cloned().collect(),
        }
    }

    /// Append to the tail
    pub fn push_back(&mut self, episode: Episode) {
        self.episodes.push_back(episode);
    }

    /// Put an episode back at the front (stepping backward)
    pub fn push_front(&mut self, episode: Episode) {
        self.episodes.push_front(episode);
    }

    /// Take the next episode to play
    pub fn pop_front(&mut self) -> Option<Episode> {
        self.episodes.pop_front()
    }

    /// Next episode without removing it
    pub fn peek(&self) -> Option<&Episode> {
        self.episodes.front()
    }

    /// Replace the contents with the given playlist
    pub fn refill(&mut self, playlist: &[Episode]) {
        self.episodes.clear();
        self.episodes.extend(playlist.iter().cloned());
    }

    /// All queued episodes, front first
    pub fn to_vec(&self) -> Vec<Episode> {
        self.episodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}
