/// API route modules
pub mod health;
pub mod queue;
pub mod skill;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// `bucket_path` is served under `/episodes` so catalog URLs resolve when
/// the server itself hosts the bucket.
pub fn router(state: AppState, bucket_path: &Path) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/queue", get(queue::get_queue));

    Router::new()
        .route("/skill", post(skill::handle))
        .nest("/api", api_routes)
        .nest_service("/episodes", ServeDir::new(bucket_path))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
