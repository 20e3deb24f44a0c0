//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("title is required and must be a non-empty string")]
    EmptyTitle,

    /// The title exceeds the storage limit.
    #[error("title is {actual} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// The maximum number of characters accepted.
        max: usize,
        /// The number of characters supplied.
        actual: usize,
    },

    /// A status value is not one of the supported states.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// An update request carried no fields.
    #[error("no fields to update")]
    EmptyUpdate,

    /// Assigning another position would overflow the position range.
    #[error("subtask position range exhausted")]
    PositionOverflow,

    /// A requested position lies outside the storable range.
    #[error("position {value} exceeds maximum of {max}")]
    PositionOutOfRange {
        /// The position supplied.
        value: u32,
        /// The largest accepted position.
        max: u32,
    },
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status '{0}', expected pending, in_progress, or completed")]
pub struct ParseTaskStatusError(pub String);
