//! HTTP API server for the interview copilot frontend
//!
//! This module provides a REST API for session and transcript storage:
//! - POST /session - Create a new interview session
//! - GET /session/:id - Fetch one session
//! - GET /sessions - List all sessions
//! - POST /transcript - Append a transcript entry
//! - GET /transcript/:id - Get a session's transcript
//! - POST /ai-response - Generate an answer suggestion
//! - GET /ai-responses/:id - Get a session's generated answers
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
