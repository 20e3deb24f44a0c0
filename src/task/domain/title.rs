//! Validated title shared by tasks, subtasks, and generated candidates.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard storage ceiling for task and subtask titles, in characters.
pub const MAX_TITLE_CHARS: usize = 500;

/// Trimmed, non-empty title of at most [`MAX_TITLE_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title from caller input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank and
    /// [`TaskDomainError::TitleTooLong`] when it exceeds [`MAX_TITLE_CHARS`]
    /// after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let actual = trimmed.chars().count();
        if actual > MAX_TITLE_CHARS {
            return Err(TaskDomainError::TitleTooLong {
                max: MAX_TITLE_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a title from machine-generated text, cutting it to
    /// [`MAX_TITLE_CHARS`] instead of rejecting it. Whitespace exposed by
    /// the cut is trimmed as well.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank.
    pub fn truncating(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let truncated: String = trimmed.chars().take(MAX_TITLE_CHARS).collect();
        Ok(Self(truncated.trim_end().to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalises optional free text, treating blank input as absent.
#[must_use]
pub fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
