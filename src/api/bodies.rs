//! Request bodies accepted by the handlers.

use crate::task::domain::{
    SubtaskDraft, SubtaskPosition, SubtaskUpdate, TaskDomainError, TaskStatus, TaskTitle,
    TaskUpdate,
};
use serde::Deserialize;

/// Body of `POST /ai/breakdown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BreakdownBody {
    /// Task title; blank or missing is rejected.
    #[serde(default)]
    pub title: String,
    /// Optional extra context.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /tasks/:id/reorder`.
///
/// Identifiers stay as raw strings; unparsable entries are skipped in the
/// same way as identifiers from another task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReorderBody {
    /// Subtask identifiers in their new order.
    #[serde(rename = "subtaskIds")]
    pub subtask_ids: Vec<String>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTaskBody {
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /tasks/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description; blank clears it.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement status.
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateTaskBody {
    pub(super) fn into_update(self) -> Result<TaskUpdate, TaskDomainError> {
        let mut update = TaskUpdate::new();
        if let Some(title) = self.title {
            update = update.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description {
            update = update.with_description(description);
        }
        if let Some(status) = self.status {
            update = update.with_status(TaskStatus::try_from(status.as_str())?);
        }
        Ok(update)
    }
}

/// One subtask in a [`CreateSubtasksBody`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubtaskBody {
    /// Subtask title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /tasks/:id/subtasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateSubtasksBody {
    /// Subtasks to append, in order.
    pub subtasks: Vec<SubtaskBody>,
}

impl CreateSubtasksBody {
    pub(super) fn into_drafts(self) -> Result<Vec<SubtaskDraft>, TaskDomainError> {
        self.subtasks
            .into_iter()
            .map(|subtask| {
                Ok(SubtaskDraft::new(
                    TaskTitle::new(subtask.title)?,
                    subtask.description,
                ))
            })
            .collect()
    }
}

/// Body of `PUT /subtasks/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateSubtaskBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description; blank clears it.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement status.
    #[serde(default)]
    pub status: Option<String>,
    /// Replacement position.
    #[serde(default)]
    pub order_index: Option<u32>,
}

impl UpdateSubtaskBody {
    pub(super) fn into_update(self) -> Result<SubtaskUpdate, TaskDomainError> {
        let mut update = SubtaskUpdate::new();
        if let Some(title) = self.title {
            update = update.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description {
            update = update.with_description(description);
        }
        if let Some(status) = self.status {
            update = update.with_status(TaskStatus::try_from(status.as_str())?);
        }
        if let Some(position) = self.order_index {
            update = update.with_position(SubtaskPosition::new(position)?);
        }
        Ok(update)
    }
}
