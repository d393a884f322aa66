//! Commentary on a filter (verb module)
//!
//! An optional text-generation collaborator writes one playful sentence about
//! the odds. It never fails loudly: every problem becomes a canned message.

mod client;
mod error;
mod prompt;

use futures::future::BoxFuture;
use tracing::warn;

pub use client::HttpNarrator;
pub use error::NarrativeError;
pub use prompt::{build_prompt, location};

use crate::filter::FilterState;

pub const MISSING_KEY_MESSAGE: &str = "API Key not configured for AI insights.";
pub const UNAVAILABLE_MESSAGE: &str = "AI is currently on a coffee break.";
pub const EMPTY_REPLY_MESSAGE: &str = "Could not generate insight.";

/// Something that turns a prompt into text
pub trait NarrativeSource: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>>;
}

/// Commentary for a filter state, or a canned message when none can be had
pub async fn narrate(source: Option<&dyn NarrativeSource>, filters: &FilterState) -> String {
    let Some(source) = source else {
        return MISSING_KEY_MESSAGE.to_string();
    };

    match source.generate(&build_prompt(filters)).await {
        Ok(text) if text.trim().is_empty() => EMPTY_REPLY_MESSAGE.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(NarrativeError::MissingApiKey(_)) => MISSING_KEY_MESSAGE.to_string(),
        Err(e) => {
            warn!(error = %e, "Commentary unavailable");
            UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::FutureExt;

    struct Canned(Result<&'static str, &'static str>);

    impl NarrativeSource for Canned {
        fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>> {
            assert!(prompt.contains("dating coach"));
            let reply = match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(msg) => Err(NarrativeError::Network(msg.to_string())),
            };
            async move { reply }.boxed()
        }
    }

    #[tokio::test]
    async fn test_fallback_messages() {
        let filters = FilterState::default();
        assert_eq!(narrate(None, &filters).await, MISSING_KEY_MESSAGE);
        assert_eq!(narrate(Some(&Canned(Err("timeout"))), &filters).await, UNAVAILABLE_MESSAGE);
        assert_eq!(narrate(Some(&Canned(Ok("  "))), &filters).await, EMPTY_REPLY_MESSAGE);
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let reply = narrate(Some(&Canned(Ok(" Bring snacks, it's a long search.\n"))), &FilterState::default()).await;
        assert_eq!(reply, "Bring snacks, it's a long search.");
    }
}
