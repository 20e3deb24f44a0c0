//! Service layer for turning a task description into subtask candidates.

use crate::breakdown::{
    domain::{BreakdownError, BreakdownRequest, SubtaskCandidate, parse_candidates, render_prompt},
    ports::TextGenerationProvider,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

const PROBE_PROMPT: &str = "Reply with the single word: ok";

/// Result type for breakdown generation.
pub type BreakdownResult<T> = Result<T, BreakdownError>;

/// Breakdown generation service.
///
/// Renders the prompt, calls the provider once, and validates the reply.
/// Nothing is persisted here.
#[derive(Clone)]
pub struct BreakdownService<P>
where
    P: TextGenerationProvider,
{
    provider: Arc<P>,
}

impl<P> BreakdownService<P>
where
    P: TextGenerationProvider,
{
    /// Creates a new breakdown service.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Generates an ordered list of subtask candidates for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`BreakdownError::ProviderUnavailable`] when the provider
    /// call fails, or a parse or validation error when its reply is unusable.
    pub async fn generate(
        &self,
        request: &BreakdownRequest,
    ) -> BreakdownResult<Vec<SubtaskCandidate>> {
        let prompt = render_prompt(request)?;
        debug!(
            title = request.title(),
            prompt_chars = prompt.chars().count(),
            "requesting subtask breakdown"
        );

        let outcome = match self.provider.complete(&prompt).await {
            Ok(raw) => parse_candidates(&raw),
            Err(err) => Err(BreakdownError::provider_unavailable(err.into_message())),
        };

        match &outcome {
            Ok(candidates) => info!(
                title = request.title(),
                count = candidates.len(),
                "generated subtask breakdown"
            ),
            Err(err) => warn!(
                title = request.title(),
                kind = err.kind(),
                error = %err,
                "subtask breakdown failed"
            ),
        }
        outcome
    }

    /// Sends a trivial prompt to confirm the provider is reachable and the
    /// credential is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`BreakdownError::ProviderUnavailable`] with the classified
    /// cause when the check fails.
    pub async fn verify_provider(&self) -> BreakdownResult<()> {
        match self.provider.complete(PROBE_PROMPT).await {
            Ok(_) => {
                info!("text generation provider reachable");
                Ok(())
            }
            Err(err) => {
                let error = BreakdownError::provider_unavailable(err.into_message());
                warn!(error = %error, "text generation provider check failed");
                Err(error)
            }
        }
    }
}
