//! Error taxonomy for breakdown generation.
//!
//! The variants separate "nothing could be extracted" ([`BreakdownError::Parse`])
//! from "something was extracted but is unusable" (shape, field, and empty
//! errors), and both from the provider being unreachable.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Candidate field named in a [`BreakdownError::Field`] error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateField {
    /// The `title` field.
    Title,
    /// The `description` field.
    Description,
}

impl CandidateField {
    /// Returns the JSON key for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort category of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFailureCause {
    /// The provider rejected the configured credential.
    InvalidCredential,
    /// The provider throttled the request.
    RateLimited,
    /// The account's usage quota is exhausted.
    QuotaExceeded,
    /// The failure text matched no known category.
    Unknown,
}

impl ProviderFailureCause {
    /// Classifies a raw provider error message by substring inspection.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        if message.contains("API_KEY_INVALID") {
            Self::InvalidCredential
        } else if message.contains("RATE_LIMIT") {
            Self::RateLimited
        } else if message.to_ascii_lowercase().contains("quota") {
            Self::QuotaExceeded
        } else {
            Self::Unknown
        }
    }

    /// Returns the canonical category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid_credential",
            Self::RateLimited => "rate_limited",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProviderFailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned while generating a subtask breakdown.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BreakdownError {
    /// The task title is empty after trimming.
    #[error("title is required and must be a non-empty string")]
    EmptyTitle,

    /// The prompt template failed to render.
    #[error("failed to render breakdown prompt: {0}")]
    Prompt(String),

    /// No extraction strategy produced structured data.
    #[error("could not extract a structured subtask list from the provider response")]
    Parse,

    /// The extracted value is not an array.
    #[error("provider response is not an array")]
    Shape,

    /// An element lacks a non-empty string field.
    #[error("element {index} missing valid {field}")]
    Field {
        /// Zero-based index of the first offending element.
        index: usize,
        /// The missing or invalid field.
        field: CandidateField,
    },

    /// The extracted array is empty.
    #[error("provider returned no subtasks")]
    Empty,

    /// The provider call itself failed.
    #[error("text generation provider unavailable ({cause}): {message}")]
    ProviderUnavailable {
        /// Classified failure category.
        cause: ProviderFailureCause,
        /// Provider message as received.
        message: String,
    },
}

impl BreakdownError {
    /// Builds a [`BreakdownError::ProviderUnavailable`] from a raw provider
    /// message, classifying its cause.
    #[must_use]
    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        let text = message.into();
        Self::ProviderUnavailable {
            cause: ProviderFailureCause::classify(&text),
            message: text,
        }
    }

    /// Returns `true` when the fault lies with the external provider rather
    /// than the caller or this service.
    #[must_use]
    pub const fn is_provider_fault(&self) -> bool {
        matches!(
            self,
            Self::Parse
                | Self::Shape
                | Self::Field { .. }
                | Self::Empty
                | Self::ProviderUnavailable { .. }
        )
    }

    /// Returns a short machine-readable name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::Prompt(_) => "prompt",
            Self::Parse => "parse",
            Self::Shape => "shape",
            Self::Field { .. } => "field",
            Self::Empty => "empty",
            Self::ProviderUnavailable { .. } => "provider_unavailable",
        }
    }
}
