/// Skill event dispatch
///
/// Every event produces a response. Queue and upstream failures become
/// spoken answers rather than HTTP errors.
use crate::{skill::response::SkillResponse, state::AppState};
use speakca_playback::{IntentKind, SkillEvent};

pub const LAUNCH_TEXT: &str =
    "Welcome to California Speaks. You can ask me to play this week's episode, \
     what this week's question is, or search for an episode.";
pub const HELP_TEXT: &str =
    "You can say play episodes, what is this week's question, or search for a topic. \
     While an episode plays, say next, previous, pause, resume or start over.";
pub const FALLBACK_TEXT: &str = "Sorry, I didn't get that. You can say play episodes, \
     what is this week's question, or search for a topic.";
pub const GOODBYE_TEXT: &str = "Thanks for using the California Speaks skill";
pub const PLAY_TEXT: &str = "Enjoy this episode";
pub const NO_EPISODES_TEXT: &str = "There are no episodes available right now";
pub const NO_MORE_TEXT: &str = "No more episodes";
pub const NO_PREVIOUS_TEXT: &str = "There is no previous episode";
pub const NOTHING_PLAYING_TEXT: &str = "Nothing is playing";
pub const PAUSED_TEXT: &str = "Paused";
pub const RESUMING_TEXT: &str = "Resuming";
pub const TROUBLE_TEXT: &str =
    "Sorry, we're having trouble reaching California Speaks. Please try again later.";

pub async fn handle_event(state: &AppState, event: SkillEvent) -> SkillResponse {
    match event {
        SkillEvent::Launch => SkillResponse::question(LAUNCH_TEXT)
            .simple_card(state.settings.card_title.as_str(), LAUNCH_TEXT),
        SkillEvent::SessionEnded => SkillResponse::empty(),

        SkillEvent::PlaybackStarted { token, offset_ms }
        | SkillEvent::PlaybackStopped { token, offset_ms } => {
            if let Some(token) = token {
                state.cursor.record(token, offset_ms);
            }
            SkillResponse::empty()
        }

        SkillEvent::PlaybackNearlyFinished { token, .. } => {
            // current and next from one queue state
            let (current, next) = state
                .queue
                .with(|queue| (queue.current().cloned(), queue.up_next().cloned()));

            // Streams outside the queue (search results) get nothing enqueued
            if token.is_some() && token != current {
                tracing::debug!(
                    token = ?token,
                    current = ?current,
                    "Not enqueueing after off-queue stream"
                );
                return SkillResponse::empty();
            }

            match next {
                Some(next) => {
                    tracing::debug!(next = %next, "Enqueueing next episode");
                    SkillResponse::audio(None).enqueue(&next, current.as_ref())
                }
                None => SkillResponse::empty(),
            }
        }

        SkillEvent::PlaybackFinished { token, .. } => {
            let advanced = match token {
                Some(token) => {
                    state.cursor.clear_if(&token);
                    state.queue.advance_from(&token)
                }
                None => state.queue.step().map(Some),
            };

            match advanced {
                Ok(Some(episode)) => {
                    tracing::debug!(current = %episode, "Playback moved to next episode");
                    state.cursor.clear();
                    SkillResponse::empty()
                }
                Ok(None) => SkillResponse::empty(),
                Err(_) => SkillResponse::statement(NO_MORE_TEXT),
            }
        }

        SkillEvent::PlaybackFailed { token, message } => {
            tracing::warn!(token = ?token, "Playback failed: {}", message);
            SkillResponse::empty()
        }

        SkillEvent::Intent(intent) => handle_intent(state, intent).await,
    }
}

async fn handle_intent(state: &AppState, intent: IntentKind) -> SkillResponse {
    let title = state.settings.card_title.as_str();

    match intent {
        IntentKind::PlayEpisodes => match state.queue.start() {
            Ok(episode) => {
                state.cursor.clear();
                SkillResponse::audio(Some(PLAY_TEXT)).play(&episode, 0)
            }
            Err(_) => SkillResponse::statement(NO_EPISODES_TEXT),
        },

        IntentKind::Next => match state.queue.step() {
            Ok(episode) => {
                state.cursor.clear();
                SkillResponse::audio(None).play(&episode, 0)
            }
            Err(_) => SkillResponse::statement(NO_MORE_TEXT),
        },

        IntentKind::Previous => match state.queue.step_back() {
            Ok(episode) => {
                state.cursor.clear();
                SkillResponse::audio(None).play(&episode, 0)
            }
            Err(_) => SkillResponse::statement(NO_PREVIOUS_TEXT),
        },

        IntentKind::StartOver => match state.queue.current() {
            Some(episode) => SkillResponse::audio(None).play(&episode, 0),
            None => SkillResponse::statement(NOTHING_PLAYING_TEXT),
        },

        IntentKind::Pause => SkillResponse::audio(Some(PAUSED_TEXT))
            .stop()
            .simple_card(PAUSED_TEXT, PAUSED_TEXT),

        IntentKind::Resume => {
            // Last stream the device reported; may be a search result
            let resume_at = match state.cursor.position() {
                Some(position) => Some((position.episode, position.offset_ms)),
                None => state.queue.current().map(|episode| (episode, 0)),
            };

            match resume_at {
                Some((episode, offset_ms)) => SkillResponse::audio(Some(RESUMING_TEXT))
                    .play(&episode, offset_ms)
                    .simple_card(RESUMING_TEXT, RESUMING_TEXT),
                None => SkillResponse::statement(NOTHING_PLAYING_TEXT),
            }
        }

        IntentKind::Question => match state.site.weekly_question().await {
            Ok(question) => {
                let text = format!(
                    "Here's this week's question: {} To respond, call 1 8 3 3 SPEAK-CA.",
                    question
                );
                SkillResponse::statement(text.as_str()).simple_card(title, text)
            }
            Err(e) => {
                tracing::warn!("Weekly question unavailable: {}", e);
                SkillResponse::statement(TROUBLE_TEXT)
            }
        },

        IntentKind::Search { term } => search(state, &term).await,

        IntentKind::Help => SkillResponse::question(HELP_TEXT).simple_card(title, HELP_TEXT),
        IntentKind::Fallback => {
            SkillResponse::question(FALLBACK_TEXT).simple_card(title, FALLBACK_TEXT)
        }
        IntentKind::Stop | IntentKind::Cancel => SkillResponse::statement(GOODBYE_TEXT),
    }
}

/// Play the first search hit that is in the catalog
///
/// Search results are played directly and leave the queue alone.
async fn search(state: &AppState, term: &str) -> SkillResponse {
    let links = match state.site.search(term).await {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!(term = %term, "Search unavailable: {}", e);
            return SkillResponse::statement(TROUBLE_TEXT);
        }
    };

    let hit = links.iter().find_map(|link| state.link_index.get(link));
    match hit {
        Some(episode) => {
            tracing::info!(term = %term, episode = %episode, "Playing search result");
            state.cursor.clear();
            SkillResponse::audio(None).play(episode, 0)
        }
        None => {
            let text = format!(
                "Sorry, unable to find anything related to \"{}\". Try searching again?",
                term
            );
            SkillResponse::question(text.as_str())
                .simple_card(state.settings.card_title.as_str(), text)
        }
    }
}
