//! Structural and semantic validation of extracted provider output.

use super::{BreakdownError, CandidateField, SubtaskCandidate, extract_json};
use crate::task::domain::TaskTitle;
use serde_json::Value;
use tracing::debug;

/// Turns a raw provider response into validated candidates.
///
/// # Errors
///
/// Returns [`BreakdownError::Parse`] when no extraction strategy succeeds,
/// or any error from [`validate_candidates`].
pub fn parse_candidates(raw: &str) -> Result<Vec<SubtaskCandidate>, BreakdownError> {
    let (strategy, value) = extract_json(raw).ok_or(BreakdownError::Parse)?;
    debug!(strategy = strategy.name(), "extracted structured provider output");
    validate_candidates(&value)
}

/// Validates an extracted JSON value as an ordered candidate list.
///
/// Checks run in order: the value must be an array; every element must
/// carry non-empty string `title` and `description` fields (the first
/// offending element is reported); the array must not be empty. Accepted
/// fields are trimmed and titles are cut to the storage limit.
///
/// # Errors
///
/// Returns [`BreakdownError::Shape`], [`BreakdownError::Field`], or
/// [`BreakdownError::Empty`].
pub fn validate_candidates(value: &Value) -> Result<Vec<SubtaskCandidate>, BreakdownError> {
    let Value::Array(elements) = value else {
        return Err(BreakdownError::Shape);
    };

    let mut candidates = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let raw_title = required_text(element, CandidateField::Title).ok_or(
            BreakdownError::Field {
                index,
                field: CandidateField::Title,
            },
        )?;
        let raw_description = required_text(element, CandidateField::Description).ok_or(
            BreakdownError::Field {
                index,
                field: CandidateField::Description,
            },
        )?;
        let title = TaskTitle::truncating(raw_title).map_err(|_| BreakdownError::Field {
            index,
            field: CandidateField::Title,
        })?;
        candidates.push(SubtaskCandidate::new(title, raw_description.trim()));
    }

    if candidates.is_empty() {
        return Err(BreakdownError::Empty);
    }
    Ok(candidates)
}

fn required_text(element: &Value, field: CandidateField) -> Option<&str> {
    element
        .get(field.as_str())
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}
