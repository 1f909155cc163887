//! Play history
//!
//! Linear record of superseded episodes for "previous" navigation

use crate::types::Episode;
use std::collections::VecDeque;

/// Episodes that were current before the present one
///
/// Most recent at the back. Unbounded: the playlist is the upper bound.
#[derive(Debug, Clone, Default)]
pub struct History {
    episodes: VecDeque<Episode>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an episode as played
    pub fn push(&mut self, episode: Episode) {
        self.episodes.push_back(episode);
    }

    /// Most recent episode (without removing)
    pub fn peek(&self) -> Option<&Episode> {
        self.episodes.back()
    }

    /// Pop most recent episode
    pub fn pop(&mut self) -> Option<Episode> {
        self.episodes.pop_back()
    }

    /// All episodes, oldest first
    pub fn to_vec(&self) -> Vec<Episode> {
        self.episodes.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.iter()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.episodes.clear();
    }
}
