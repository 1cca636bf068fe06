use super::state::AppState;
use crate::model::{AiResponse, Session, SpeakerRole, TranscriptEntry};
use crate::store::StoreError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TranscriptCreateRequest {
    pub session_id: String,

    pub text: String,

    /// Defaults to the interviewer when omitted
    #[serde(default = "default_speaker")]
    pub speaker: SpeakerRole,
}

fn default_speaker() -> SpeakerRole {
    SpeakerRole::Interviewer
}

#[derive(Debug, Deserialize)]
pub struct AiResponseRequest {
    pub session_id: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /session
/// Create a new interview session
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session = Session::new();

    info!("Creating interview session: {}", session.id);

    match state.store.insert_session(session).await {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => {
            error!("Failed to create session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create session: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /session/:session_id
/// Fetch one interview session
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_session(&session_id).await {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(StoreError::SessionNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Session not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to load session {}: {}", session_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to load session: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /sessions
/// List all interview sessions
pub async fn list_sessions(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_sessions().await {
        Ok(sessions) => (StatusCode::OK, Json(sessions)).into_response(),
        Err(e) => {
            error!("Failed to list sessions: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list sessions: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /transcript
/// Append a transcript entry to a session
pub async fn add_transcript(
    State(state): State<AppState>,
    Json(req): Json<TranscriptCreateRequest>,
) -> impl IntoResponse {
    let entry = TranscriptEntry::new(req.session_id, req.speaker, req.text);

    match state.store.add_transcript(entry).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(StoreError::SessionNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Session not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to store transcript: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to store transcript: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /transcript/:session_id
/// List a session's transcript entries, oldest first
pub async fn list_transcripts(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.transcripts_for(&session_id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!("Failed to list transcripts for {}: {}", session_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list transcripts: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /ai-response
/// Generate an answer suggestion for a question and store it
pub async fn generate_response(
    State(state): State<AppState>,
    Json(req): Json<AiResponseRequest>,
) -> impl IntoResponse {
    // Verify session exists
    match state.store.get_session(&req.session_id).await {
        Ok(_) => {}
        Err(StoreError::SessionNotFound(_)) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Session not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            error!("Failed to load session {}: {}", req.session_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to generate AI response: {}", e),
                }),
            )
                .into_response();
        }
    }

    // One generation at a time per session
    let lock = state.generation_lock(&req.session_id).await;
    let _guard = lock.lock().await;

    // Recent conversation context, oldest first
    let transcripts = match state.store.transcripts_for(&req.session_id).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to load context for {}: {}", req.session_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to generate AI response: {}", e),
                }),
            )
                .into_response();
        }
    };

    let start = transcripts.len().saturating_sub(state.context_window);
    let context = &transcripts[start..];

    match state.assistant.generate(context, &req.question).await {
        Ok(text) => {
            let response = AiResponse::new(req.session_id.clone(), req.question.clone(), text);

            match state.store.add_response(response).await {
                Ok(response) => (StatusCode::OK, Json(response)).into_response(),
                Err(e) => {
                    error!("Failed to store AI response: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: format!("Failed to generate AI response: {}", e),
                        }),
                    )
                        .into_response()
                }
            }
        }
        Err(e) => {
            error!("Error generating AI response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to generate AI response: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /ai-responses/:session_id
/// List a session's generated answers, oldest first
pub async fn list_responses(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.responses_for(&session_id).await {
        Ok(responses) => (StatusCode::OK, Json(responses)).into_response(),
        Err(e) => {
            error!("Failed to list AI responses for {}: {}", session_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list AI responses: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
