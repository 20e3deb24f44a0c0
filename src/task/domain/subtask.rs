//! Subtask entity, unsequenced drafts, and partial-update payload.

use super::{
    SubtaskId, SubtaskPosition, TaskDomainError, TaskId, TaskStatus, TaskTitle,
    normalize_description,
};
use serde::{Deserialize, Serialize};

/// Ordered child unit of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    task_id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    #[serde(rename = "order_index")]
    position: SubtaskPosition,
}

/// Parameter object for reconstructing a persisted subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubtaskData {
    /// Persisted subtask identifier.
    pub id: SubtaskId,
    /// Identifier of the owning task.
    pub task_id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted position within the owning task.
    pub position: SubtaskPosition,
}

impl Subtask {
    /// Reconstructs a subtask from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubtaskData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            title: data.title,
            description: data.description,
            status: data.status,
            position: data.position,
        }
    }

    /// Creates a pending subtask from a draft at the given position.
    pub(crate) fn from_draft(task_id: TaskId, draft: SubtaskDraft, position: SubtaskPosition) -> Self {
        Self {
            id: SubtaskId::new(),
            task_id,
            title: draft.title,
            description: draft.description,
            status: TaskStatus::Pending,
            position,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the subtask title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the subtask description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the subtask status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the subtask position within its task.
    #[must_use]
    pub const fn position(&self) -> SubtaskPosition {
        self.position
    }

    /// Moves the subtask to a new position.
    pub const fn set_position(&mut self, position: SubtaskPosition) {
        self.position = position;
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUpdate`] when the update carries no
    /// fields.
    pub fn apply(&mut self, update: SubtaskUpdate) -> Result<(), TaskDomainError> {
        if update.is_empty() {
            return Err(TaskDomainError::EmptyUpdate);
        }
        let SubtaskUpdate {
            title,
            description,
            status,
            position,
        } = update;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        if let Some(new_position) = position {
            self.position = new_position;
        }
        Ok(())
    }
}

/// Subtask content awaiting a position and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskDraft {
    title: TaskTitle,
    description: Option<String>,
}

impl SubtaskDraft {
    /// Creates a draft. Blank descriptions are stored as absent.
    #[must_use]
    pub fn new(title: TaskTitle, description: Option<String>) -> Self {
        Self {
            title,
            description: normalize_description(description),
        }
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the draft description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Partial update for a subtask. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskUpdate {
    title: Option<TaskTitle>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    position: Option<SubtaskPosition>,
}

impl SubtaskUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(normalize_description(Some(description.into())));
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the subtask to an explicit position.
    #[must_use]
    pub const fn with_position(mut self, position: SubtaskPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns the requested position, if any.
    #[must_use]
    pub const fn position(&self) -> Option<SubtaskPosition> {
        self.position
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.position.is_none()
    }
}
