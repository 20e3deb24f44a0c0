//! Scripted provider for tests and offline runs.

use crate::breakdown::ports::{ProviderError, TextGenerationProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Provider that replays queued responses in order and records prompts.
///
/// When the queue is exhausted every call fails with a fixed message.
#[derive(Debug, Clone, Default)]
pub struct CannedTextProvider {
    state: Arc<Mutex<CannedState>>,
}

#[derive(Debug, Default)]
struct CannedState {
    replies: VecDeque<Result<String, ProviderError>>,
    prompts: Vec<String>,
}

impl CannedTextProvider {
    /// Creates a provider with an empty reply queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    #[must_use]
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queues a failure carrying `message`.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Err(ProviderError::new(message)));
        self
    }

    /// Returns every prompt received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.prompts.clone())
            .unwrap_or_default()
    }

    fn push(&self, reply: Result<String, ProviderError>) {
        if let Ok(mut state) = self.state.lock() {
            state.replies.push_back(reply);
        }
    }
}

#[async_trait]
impl TextGenerationProvider for CannedTextProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| ProviderError::new(format!("canned provider lock poisoned: {err}")))?;
        state.prompts.push(prompt.to_owned());
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::new("no canned reply queued")))
    }
}
