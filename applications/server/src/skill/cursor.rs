/// Last reported playback position, used to resume paused episodes
use speakca_playback::Episode;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPosition {
    pub episode: Episode,
    pub offset_ms: u64,
}

#[derive(Debug, Default)]
pub struct PlaybackCursor {
    position: Mutex<Option<CursorPosition>>,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the device says playback is
    pub fn record(&self, episode: Episode, offset_ms: u64) {
        let mut position = self.position.lock().unwrap_or_else(PoisonError::into_inner);
        *position = Some(CursorPosition { episode, offset_ms });
    }

    /// Offset to resume `episode` from; 0 when the cursor is elsewhere
    pub fn offset_for(&self, episode: &Episode) -> u64 {
        self.position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|p| &p.episode == episode)
            .map_or(0, |p| p.offset_ms)
    }

    pub fn position(&self) -> Option<CursorPosition> {
        self.position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget the position if it belongs to `episode`
    pub fn clear_if(&self, episode: &Episode) {
        let mut position = self.position.lock().unwrap_or_else(PoisonError::into_inner);
        if position.as_ref().is_some_and(|p| &p.episode == episode) {
            *position = None;
        }
    }

    pub fn clear(&self) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
