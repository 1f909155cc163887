/// Incoming platform requests
///
/// Only the parts of the request envelope the skill reads are modelled;
/// everything else (session, context, signatures) is ignored.
use crate::error::{Result, ServerError};
use serde::Deserialize;
use speakca_playback::{Episode, IntentKind, SkillEvent};
use std::collections::HashMap;

/// Slot carrying the search query
const SEARCH_TERM_SLOT: &str = "term";

#[derive(Debug, Clone, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub version: Option<String>,
    pub request: RequestBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub request_id: Option<String>,

    #[serde(default)]
    pub intent: Option<Intent>,

    /// Stream token of audio player requests
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub offset_in_milliseconds: Option<u64>,

    #[serde(default)]
    pub error: Option<PlaybackErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,

    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackErrorBody {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl SkillRequest {
    /// Decode the request into a skill event
    pub fn into_event(self) -> Result<SkillEvent> {
        let body = self.request;
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .map(Episode::new);
        let offset_ms = body.offset_in_milliseconds.unwrap_or(0);

        let event = match body.kind.as_str() {
            "LaunchRequest" => SkillEvent::Launch,
            "SessionEndedRequest" => SkillEvent::SessionEnded,
            "IntentRequest" => {
                let intent = body.intent.ok_or_else(|| {
                    ServerError::BadRequest("IntentRequest without intent".to_string())
                })?;
                let term = intent
                    .slots
                    .get(SEARCH_TERM_SLOT)
                    .and_then(|slot| slot.value.clone());
                SkillEvent::Intent(IntentKind::from_intent_name(&intent.name, term))
            }
            "AudioPlayer.PlaybackStarted" => SkillEvent::PlaybackStarted { token, offset_ms },
            "AudioPlayer.PlaybackStopped" => SkillEvent::PlaybackStopped { token, offset_ms },
            "AudioPlayer.PlaybackNearlyFinished" => {
                SkillEvent::PlaybackNearlyFinished { token, offset_ms }
            }
            "AudioPlayer.PlaybackFinished" => SkillEvent::PlaybackFinished { token, offset_ms },
            // Hardware and remote-control buttons
            "PlaybackController.NextCommandIssued" => SkillEvent::Intent(IntentKind::Next),
            "PlaybackController.PreviousCommandIssued" => SkillEvent::Intent(IntentKind::Previous),
            "PlaybackController.PlayCommandIssued" => SkillEvent::Intent(IntentKind::Resume),
            "PlaybackController.PauseCommandIssued" => SkillEvent::Intent(IntentKind::Pause),
            // The platform rejected one of our responses
            "System.ExceptionEncountered" => SkillEvent::PlaybackFailed {
                token: None,
                message: body
                    .error
                    .and_then(|e| e.message.or(e.kind))
                    .unwrap_or_else(|| "exception encountered".to_string()),
            },
            "AudioPlayer.PlaybackFailed" => SkillEvent::PlaybackFailed {
                token,
                message: body
                    .error
                    .and_then(|e| e.message.or(e.kind))
                    .unwrap_or_else(|| "unknown error".to_string()),
            },
            other => {
                return Err(ServerError::BadRequest(format!(
                    "Unsupported request type: {}",
                    other
                )))
            }
        };

        Ok(event)
    }
}
