//! Skill events
//!
//! The voice platform delivers user intents and audio player lifecycle
//! notifications as separate callbacks. Each one is decoded into exactly one
//! of these variants and dispatched with a `match`.

use crate::types::Episode;
use serde::{Deserialize, Serialize};

/// Everything the callback layer can be asked to handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillEvent {
    /// Skill opened without a specific request
    Launch,

    /// Session closed by the platform
    SessionEnded,

    /// Audio started for the stream identified by `token`
    PlaybackStarted {
        token: Option<Episode>,
        offset_ms: u64,
    },

    /// Audio stopped (pause, interruption)
    PlaybackStopped {
        token: Option<Episode>,
        offset_ms: u64,
    },

    /// Current stream is close to its end; time to enqueue the next one
    PlaybackNearlyFinished {
        token: Option<Episode>,
        offset_ms: u64,
    },

    /// Current stream reached its end
    PlaybackFinished {
        token: Option<Episode>,
        offset_ms: u64,
    },

    /// Platform could not play the stream
    PlaybackFailed {
        token: Option<Episode>,
        message: String,
    },

    /// A user request
    Intent(IntentKind),
}

/// User intents understood by the skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentKind {
    /// Start the episode playlist from the newest episode
    PlayEpisodes,
    /// Read this week's question
    Question,
    /// Find and play a past episode
    Search { term: String },
    Next,
    Previous,
    Pause,
    Resume,
    /// Restart the current episode from the beginning
    StartOver,
    Help,
    Stop,
    Cancel,
    /// Anything not recognised
    Fallback,
}

impl IntentKind {
    /// Map a platform intent name to an intent
    ///
    /// `term` is the search slot value; a search without one falls back.
    pub fn from_intent_name(name: &str, term: Option<String>) -> Self {
        match name {
            "DemoIntent" | "PlayEpisodesIntent" => IntentKind::PlayEpisodes,
            "QuestionIntent" => IntentKind::Question,
            "SearchIntent" => match term.map(|t| t.trim().to_string()) {
                Some(term) if !term.is_empty() => IntentKind::Search { term },
                _ => IntentKind::Fallback,
            },
            "AMAZON.NextIntent" => IntentKind::Next,
            "AMAZON.PreviousIntent" => IntentKind::Previous,
            "AMAZON.PauseIntent" => IntentKind::Pause,
            "AMAZON.ResumeIntent" => IntentKind::Resume,
            "AMAZON.StartOverIntent" => IntentKind::StartOver,
            "AMAZON.HelpIntent" => IntentKind::Help,
            "AMAZON.StopIntent" => IntentKind::Stop,
            "AMAZON.CancelIntent" => IntentKind::Cancel,
            _ => IntentKind::Fallback,
        }
    }
}

impl SkillEvent {
    /// Whether this is an audio player notification rather than a user request
    pub fn is_playback_notification(&self) -> bool {
        matches!(
            self,
            SkillEvent::PlaybackStarted { .. }
                | SkillEvent::PlaybackStopped { .. }
                | SkillEvent::PlaybackNearlyFinished { .. }
                | SkillEvent::PlaybackFinished { .. }
                | SkillEvent::PlaybackFailed { .. }
        )
    }
}
