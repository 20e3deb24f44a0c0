//! Domain model for subtask breakdown generation.
//!
//! Generation is a single transformation: a [`BreakdownRequest`] is
//! rendered into a prompt, the provider's free text is run through the
//! [`ExtractionStrategy`] cascade, and the extracted value is validated into
//! [`SubtaskCandidate`]s.

mod candidate;
mod error;
mod extract;
mod prompt;
mod request;
mod validate;

pub use candidate::SubtaskCandidate;
pub use error::{BreakdownError, CandidateField, ProviderFailureCause};
pub use extract::{ExtractionStrategy, extract_json};
pub use prompt::{
    ADVISORY_TITLE_CHARS, MAX_REQUESTED_SUBTASKS, MIN_REQUESTED_SUBTASKS, render_prompt,
};
pub use request::BreakdownRequest;
pub use validate::{parse_candidates, validate_candidates};
