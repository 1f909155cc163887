//! Queue manager - core state machine
//!
//! Tracks the playlist, the current episode, the forward queue and the play
//! history. The voice platform keeps no queue of its own and sends playback
//! notifications without session context, so this is the single source of
//! truth for "where are we in the playlist".

use crate::{
    error::{QueueError, Result},
    history::History,
    queue::Queue,
    types::{Episode, PlaybackPhase, QueueStatus},
};

/// Playlist navigation state
///
/// Every operation validates before it mutates: a failed `step()` or
/// `step_back()` leaves the queue, history and current episode untouched.
#[derive(Debug, Clone)]
pub struct QueueManager {
    /// Full playlist, append-only
    playlist: Vec<Episode>,

    /// Episodes still to play
    queue: Queue,

    /// Superseded episodes
    history: History,

    /// Now playing
    current: Option<Episode>,

    /// Set when a `step()` found the queue empty
    exhausted: bool,
}

impl QueueManager {
    /// Create a manager over the given playlist
    ///
    /// Nothing is current until the first `start()` or `step()`.
    pub fn new(playlist: Vec<Episode>) -> Self {
        let queue = Queue::from_playlist(&playlist);
        Self {
            playlist,
            queue,
            history: History::new(),
            current: None,
            exhausted: false,
        }
    }

    // ===== Reads =====

    /// Snapshot of position, current, next, previous and history
    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            position: self.position(),
            current: self.current.clone(),
            next: self.up_next().cloned(),
            previous: self.previous().cloned(),
            history: self.history.to_vec(),
        }
    }

    /// Episode at the front of the queue
    pub fn up_next(&self) -> Option<&Episode> {
        self.queue.peek()
    }

    pub fn current(&self) -> Option<&Episode> {
        self.current.as_ref()
    }

    /// Most recent history entry
    pub fn previous(&self) -> Option<&Episode> {
        self.history.peek()
    }

    /// 1-based ordinal of the current episode in this session
    ///
    /// Counts forward steps, so it stops matching a playlist index once
    /// episodes are added or the queue is reset.
    pub fn position(&self) -> usize {
        self.history.len() + 1
    }

    /// History, oldest first
    pub fn history(&self) -> Vec<Episode> {
        self.history.to_vec()
    }

    /// Queue contents, next first
    pub fn queued(&self) -> Vec<Episode> {
        self.queue.to_vec()
    }

    /// Full playlist including added episodes
    pub fn playlist(&self) -> &[Episode] {
        &self.playlist
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.exhausted {
            return PlaybackPhase::Exhausted;
        }
        match &self.current {
            Some(episode) => PlaybackPhase::Playing(episode.clone()),
            None => PlaybackPhase::Idle,
        }
    }

    // ===== Playlist growth =====

    /// Append an episode to the playlist and the queue tail
    pub fn add(&mut self, episode: Episode) {
        tracing::debug!(episode = %episode, "Episode added to queue");
        self.playlist.push(episode.clone());
        self.queue.push_back(episode);
        self.exhausted = false;
    }

    /// Append several episodes, order preserved
    pub fn extend<I>(&mut self, episodes: I)
    where
        I: IntoIterator<Item = Episode>,
    {
        for episode in episodes {
            self.add(episode);
        }
    }

    // ===== Navigation =====

    /// Advance one episode
    ///
    /// The current episode (if any) moves to history and the queue front
    /// becomes current.
    pub fn step(&mut self) -> Result<Episode> {
        let Some(next) = self.queue.pop_front() else {
            tracing::debug!(current = ?self.current, "Step with empty queue");
            self.exhausted = true;
            return Err(QueueError::EmptyQueue);
        };

        if let Some(finished) = self.current.replace(next.clone()) {
            self.history.push(finished);
        }
        self.exhausted = false;

        tracing::debug!(current = %next, position = self.position(), "Stepped forward");
        Ok(next)
    }

    /// Go back one episode
    ///
    /// The current episode (if any) returns to the queue front and the most
    /// recent history entry becomes current.
    pub fn step_back(&mut self) -> Result<Episode> {
        let previous = self.history.pop().ok_or(QueueError::EmptyHistory)?;

        if let Some(superseded) = self.current.replace(previous.clone()) {
            self.queue.push_front(superseded);
        }
        self.exhausted = false;

        tracing::debug!(current = %previous, position = self.position(), "Stepped back");
        Ok(previous)
    }

    /// Step forward only if `expected` is still current
    ///
    /// Playback-finished notifications race with explicit "next" commands.
    /// Returns `Ok(None)` when another caller already moved past `expected`.
    pub fn advance_from(&mut self, expected: &Episode) -> Result<Option<Episode>> {
        if self.current.as_ref() != Some(expected) {
            tracing::debug!(
                expected = %expected,
                current = ?self.current,
                "Ignoring advance from stale episode"
            );
            return Ok(None);
        }
        self.step().map(Some)
    }

    /// Restore the queue to the full playlist and clear history
    ///
    /// The current episode is left as is.
    pub fn reset(&mut self) {
        self.queue.refill(&self.playlist);
        self.history.clear();
        self.exhausted = false;
        tracing::debug!(queued = self.queue.len(), "Queue reset");
    }

    /// Rebuild from the playlist and play the first episode
    ///
    /// Added episodes are part of the playlist and survive the rebuild.
    pub fn start(&mut self) -> Result<Episode> {
        self.queue.refill(&self.playlist);
        self.history.clear();
        self.current = None;
        self.exhausted = false;
        self.step()
    }
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
