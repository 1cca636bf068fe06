use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session management
        .route("/session", post(handlers::create_session))
        .route("/session/:session_id", get(handlers::get_session))
        .route("/sessions", get(handlers::list_sessions))
        // Transcript storage
        .route("/transcript", post(handlers::add_transcript))
        .route("/transcript/:session_id", get(handlers::list_transcripts))
        // Answer generation
        .route("/ai-response", post(handlers::generate_response))
        .route("/ai-responses/:session_id", get(handlers::list_responses))
        // Browser clients call these endpoints cross-origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
