//! Input to breakdown generation.

use super::BreakdownError;
use crate::task::domain::Task;

/// Validated breakdown input: a non-empty title and optional context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRequest {
    title: String,
    description: String,
}

impl BreakdownRequest {
    /// Creates a request, trimming both fields.
    ///
    /// # Errors
    ///
    /// Returns [`BreakdownError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl AsRef<str>, description: impl AsRef<str>) -> Result<Self, BreakdownError> {
        let trimmed_title = title.as_ref().trim();
        if trimmed_title.is_empty() {
            return Err(BreakdownError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed_title.to_owned(),
            description: description.as_ref().trim().to_owned(),
        })
    }

    /// Creates a request from an existing task's title and description.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: task.description().unwrap_or_default().to_owned(),
        }
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the additional context, empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
