//! Chat-completions client

pub mod client;

pub use client::{AiClient, ChatRequest, Usage};

use thiserror::Error;

/// Everything that can go wrong with one completion call
#[derive(Debug, Error)]
pub enum AiError {
    #[error("No API key configured. Press 's' to add one or set OPENAI_API_KEY.")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse completion response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("completion contained no text")]
    EmptyCompletion,
}

impl AiError {
    /// Short description suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            AiError::Status { status: 401, .. } => "Invalid API key".to_string(),
            AiError::Status { status: 429, .. } => "Rate limited by the API".to_string(),
            AiError::Status { status, .. } if *status >= 500 => {
                format!("API server error ({})", status)
            }
            AiError::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            other => crate::util::truncate(&other.to_string(), 120),
        }
    }
}
