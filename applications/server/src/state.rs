/// Shared application state
use crate::{config::SkillSettings, services::SiteClient, skill::PlaybackCursor};
use speakca_playback::{Episode, SharedQueueManager};
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub queue: SharedQueueManager,
    pub site: Arc<SiteClient>,
    /// Canonical website link -> episode
    pub link_index: Arc<HashMap<String, Episode>>,
    pub cursor: Arc<PlaybackCursor>,
    pub settings: Arc<SkillSettings>,
}

impl AppState {
    pub fn new(
        queue: SharedQueueManager,
        site: Arc<SiteClient>,
        link_index: HashMap<String, Episode>,
        settings: SkillSettings,
    ) -> Self {
        Self {
            queue,
            site,
            link_index: Arc::new(link_index),
            cursor: Arc::new(PlaybackCursor::new()),
            settings: Arc::new(settings),
        }
    }
}
