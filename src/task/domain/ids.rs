//! Identifier and position types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a subtask record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskId(Uuid);

impl SubtaskId {
    /// Creates a new random subtask identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a subtask identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SubtaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rank of a subtask within its parent task's sequence.
///
/// Positions are unique within a task. They are not required to be
/// contiguous; deleting a subtask leaves a gap until the next reorder.
/// Values never exceed [`SubtaskPosition::MAX`], the largest value the
/// signed 32-bit `order_index` column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SubtaskPosition(u32);

impl SubtaskPosition {
    /// The first position in a sequence.
    pub const FIRST: Self = Self(0);

    /// The last position in a sequence.
    pub const MAX: Self = Self(i32::MAX.unsigned_abs());

    /// Wraps a raw position value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PositionOutOfRange`] when `value` exceeds
    /// [`Self::MAX`].
    pub const fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value > Self::MAX.0 {
            return Err(TaskDomainError::PositionOutOfRange {
                value,
                max: Self::MAX.0,
            });
        }
        Ok(Self(value))
    }

    /// Returns the underlying position value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the position immediately after this one, or `None` at
    /// [`Self::MAX`].
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.0 < Self::MAX.0 {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }
}

impl TryFrom<u32> for SubtaskPosition {
    type Error = TaskDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubtaskPosition> for u32 {
    fn from(position: SubtaskPosition) -> Self {
        position.0
    }
}

impl fmt::Display for SubtaskPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
