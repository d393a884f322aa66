//! HTTP client for a generative-language `generateContent` endpoint

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::NarrativeError;
use super::NarrativeSource;
use crate::config::NarrativeSettings;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("poolstat/", env!("CARGO_PKG_VERSION"));

/// Client for one model endpoint; holds the API key
#[derive(Clone)]
pub struct HttpNarrator {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpNarrator {
    /// Build a client from settings, reading the key from the configured variable
    pub fn from_settings(settings: &NarrativeSettings) -> Result<Self, NarrativeError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NarrativeError::MissingApiKey(settings.api_key_env.clone()))?;
        Self::new(settings, api_key)
    }

    pub fn new(settings: &NarrativeSettings, api_key: impl Into<String>) -> Result<Self, NarrativeError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| NarrativeError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!(
                "{}/{}:generateContent",
                settings.endpoint.trim_end_matches('/'),
                settings.model
            ),
            api_key: api_key.into(),
        })
    }

    async fn request(&self, prompt: &str) -> Result<String, NarrativeError> {
        tracing::debug!("Requesting commentary from {}", self.url);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt.to_string() }],
            }],
        };
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Status { status: status.as_u16(), body });
        }

        let reply: GenerateResponse = response.json().await?;
        Ok(reply.text())
    }
}

impl NarrativeSource for HttpNarrator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>> {
        self.request(prompt).boxed()
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}
