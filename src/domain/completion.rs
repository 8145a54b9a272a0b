use async_trait::async_trait;
use thiserror::Error;

/// Default amount of text sent to the completion service as context.
pub const DEFAULT_CONTEXT_CHARS: usize = 5000;

/// The two failure categories a user can see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("You have reached your request limit for the day.")]
    RateLimited,
    #[error("{0}")]
    Failed(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate a continuation for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// The last `max_chars` characters of `text`.
#[must_use]
pub fn context_excerpt(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    text.chars().skip(total.saturating_sub(max_chars)).collect()
}
