/// Outgoing platform responses
use serde::Serialize;
use speakca_playback::Episode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillResponse {
    pub version: &'static str,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play", rename_all = "camelCase")]
    Play {
        play_behavior: PlayBehavior,
        audio_item: AudioItem,
    },

    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    /// Stop whatever plays and start this stream
    ReplaceAll,
    /// Play after the current stream
    Enqueue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioItem {
    pub stream: Stream,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub url: String,
    pub token: String,
    pub offset_in_milliseconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_previous_token: Option<String>,
}

impl SkillResponse {
    fn with_body(response: ResponseBody) -> Self {
        Self {
            version: "1.0",
            response,
        }
    }

    /// Nothing to say or do (audio player acknowledgements)
    pub fn empty() -> Self {
        Self::with_body(ResponseBody::default())
    }

    /// Say something and end the session
    pub fn statement(text: impl Into<String>) -> Self {
        Self::with_body(ResponseBody {
            output_speech: Some(plain_text(text)),
            should_end_session: Some(true),
            ..Default::default()
        })
    }

    /// Say something and keep listening
    pub fn question(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_body(ResponseBody {
            output_speech: Some(plain_text(text.clone())),
            reprompt: Some(Reprompt {
                output_speech: plain_text(text),
            }),
            should_end_session: Some(false),
            ..Default::default()
        })
    }

    /// Audio response, optionally preceded by speech
    pub fn audio(speech: Option<&str>) -> Self {
        Self::with_body(ResponseBody {
            output_speech: speech.map(plain_text),
            should_end_session: Some(true),
            ..Default::default()
        })
    }

    pub fn simple_card(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.response.card = Some(Card::Simple {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    /// Replace whatever is playing with `episode`
    pub fn play(mut self, episode: &Episode, offset_ms: u64) -> Self {
        self.response.directives.push(Directive::Play {
            play_behavior: PlayBehavior::ReplaceAll,
            audio_item: AudioItem {
                stream: stream(episode, offset_ms, None),
            },
        });
        self
    }

    /// Queue `episode` after the stream identified by `previous`
    pub fn enqueue(mut self, episode: &Episode, previous: Option<&Episode>) -> Self {
        self.response.directives.push(Directive::Play {
            play_behavior: PlayBehavior::Enqueue,
            audio_item: AudioItem {
                stream: stream(episode, 0, previous),
            },
        });
        self
    }

    pub fn stop(mut self) -> Self {
        self.response.directives.push(Directive::Stop);
        self
    }
}

fn plain_text(text: impl Into<String>) -> OutputSpeech {
    OutputSpeech::PlainText { text: text.into() }
}

// The stream token is the episode URL; playback notifications echo it back.
fn stream(episode: &Episode, offset_ms: u64, previous: Option<&Episode>) -> Stream {
    Stream {
        url: episode.url().to_string(),
        token: episode.url().to_string(),
        offset_in_milliseconds: offset_ms,
        expected_previous_token: previous.map(|p| p.url().to_string()),
    }
}
