//! Live listening pipeline
//!
//! This module provides the `CopilotSession` abstraction that manages:
//! - Audio capture and fixed-duration segmentation
//! - Speech-to-text transcription with noise filtering
//! - Question detection and answer generation
//! - Display events and optional persistence

mod config;
pub mod filter;
mod history;
mod session;
mod stats;

pub use config::PipelineConfig;
pub use history::ConversationHistory;
pub use session::CopilotSession;
pub use stats::{PipelineEvent, PipelineStats};
