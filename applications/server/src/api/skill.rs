/// Skill callback endpoint
use crate::{
    error::Result,
    skill::{self, SkillRequest, SkillResponse},
    state::AppState,
};
use axum::{extract::State, Json};

/// POST /skill - Handle one platform request
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<SkillRequest>,
) -> Result<Json<SkillResponse>> {
    let request_id = request.request.request_id.clone().unwrap_or_default();
    let event = request.into_event()?;
    tracing::info!(request_id = %request_id, event = ?event, "Skill request");

    Ok(Json(skill::handle_event(&state, event).await))
}
