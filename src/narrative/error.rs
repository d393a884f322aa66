//! Narrative errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("API key not configured (set {0})")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unreadable response: {0}")]
    Response(String),
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NarrativeError::Response(err.to_string())
        } else {
            NarrativeError::Network(err.to_string())
        }
    }
}
