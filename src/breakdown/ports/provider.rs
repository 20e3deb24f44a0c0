//! Port for the external text-generation provider.

use async_trait::async_trait;
use thiserror::Error;

/// Text-generation capability: accept a prompt, return free text.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Sends `prompt` to the provider and returns its raw text response.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] carrying the provider's failure message.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Opaque provider failure.
///
/// The message is kept verbatim; callers classify it heuristically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Creates a provider error from a failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the error, returning the failure message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}
