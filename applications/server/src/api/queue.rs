/// Queue inspection API routes
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use speakca_playback::{PlaybackPhase, QueueStatus};

#[derive(Debug, Serialize)]
pub struct QueueResponse {
    #[serde(flatten)]
    pub status: QueueStatus,
    pub phase: PlaybackPhase,
    pub playlist_len: usize,
}

/// GET /api/queue - Snapshot of the playback queue
pub async fn get_queue(State(state): State<AppState>) -> Json<QueueResponse> {
    let response = state.queue.with(|queue| QueueResponse {
        status: queue.status(),
        phase: queue.phase(),
        playlist_len: queue.playlist().len(),
    });
    Json(response)
}
