//! Transient subtask proposals produced by generation.

use crate::task::domain::{SubtaskDraft, TaskTitle};
use serde::{Deserialize, Serialize};

/// Unpersisted subtask proposal.
///
/// Candidates have no identifier or position; they become subtasks only
/// when appended to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskCandidate {
    title: TaskTitle,
    description: String,
}

impl SubtaskCandidate {
    /// Creates a candidate from an already validated title.
    #[must_use]
    pub fn new(title: TaskTitle, description: impl Into<String>) -> Self {
        Self {
            title,
            description: description.into(),
        }
    }

    /// Returns the candidate title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the rationale text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Converts the candidate into a draft ready for sequencing.
    #[must_use]
    pub fn into_draft(self) -> SubtaskDraft {
        SubtaskDraft::new(self.title, Some(self.description))
    }
}
