//! Thread-safe handle to the queue manager
//!
//! Platform callbacks arrive as independent, unordered requests. All of them
//! go through one lock so two concurrent `step()` calls can never pop the
//! same episode, and readers never see a half-applied transition.

use crate::{
    error::Result,
    manager::QueueManager,
    types::{Episode, PlaybackPhase, QueueStatus},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, shared queue manager
///
/// The lock is held only for the duration of a single synchronous call.
/// Reads return owned snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedQueueManager {
    inner: Arc<Mutex<QueueManager>>,
}

impl SharedQueueManager {
    pub fn new(manager: QueueManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Shared manager over a playlist
    pub fn from_playlist(playlist: Vec<Episode>) -> Self {
        Self::new(QueueManager::new(playlist))
    }

    // Manager operations validate before mutating, so a panic elsewhere while
    // holding the lock cannot leave partial state behind.
    fn lock(&self) -> MutexGuard<'_, QueueManager> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a closure under the lock
    ///
    /// For compound reads or read-then-write sequences that must observe
    /// one consistent state.
    pub fn with<R>(&self, f: impl FnOnce(&mut QueueManager) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn status(&self) -> QueueStatus {
        self.lock().status()
    }

    pub fn up_next(&self) -> Option<Episode> {
        self.lock().up_next().cloned()
    }

    pub fn current(&self) -> Option<Episode> {
        self.lock().current().cloned()
    }

    pub fn previous(&self) -> Option<Episode> {
        self.lock().previous().cloned()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.lock().phase()
    }

    pub fn playlist(&self) -> Vec<Episode> {
        self.lock().playlist().to_vec()
    }

    pub fn add(&self, episode: Episode) {
        self.lock().add(episode);
    }

    pub fn extend<I>(&self, episodes: I)
    where
        I: IntoIterator<Item = Episode>,
    {
        self.lock().extend(episodes);
    }

    pub fn step(&self) -> Result<Episode> {
        self.lock().step()
    }

    pub fn step_back(&self) -> Result<Episode> {
        self.lock().step_back()
    }

    pub fn advance_from(&self, expected: &Episode) -> Result<Option<Episode>> {
        self.lock().advance_from(expected)
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn start(&self) -> Result<Episode> {
        self.lock().start()
    }
}
