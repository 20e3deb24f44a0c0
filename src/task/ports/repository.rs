//! Repository port for task and subtask persistence.

use crate::task::domain::{
    Subtask, SubtaskDraft, SubtaskId, SubtaskPosition, SubtaskUpdate, Task, TaskDomainError,
    TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task and subtask persistence contract.
///
/// Deleting a task deletes its subtasks. Implementations must make
/// [`append_subtasks`](Self::append_subtasks) and
/// [`reorder_subtasks`](Self::reorder_subtasks) atomic per call and must
/// serialise position assignment per task.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks, most recently created first.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task and all of its subtasks.
    ///
    /// Returns `false` when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns the subtasks of a task ordered by position.
    async fn subtasks_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Subtask>>;

    /// Finds a subtask by identifier.
    async fn find_subtask(&self, id: SubtaskId) -> TaskRepositoryResult<Option<Subtask>>;

    /// Returns the highest subtask position of a task, or `None` when the
    /// task has no subtasks.
    async fn max_position(&self, task_id: TaskId) -> TaskRepositoryResult<Option<SubtaskPosition>>;

    /// Appends drafts after the task's current maximum position.
    ///
    /// Either every draft is persisted or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn append_subtasks(
        &self,
        task_id: TaskId,
        drafts: Vec<SubtaskDraft>,
    ) -> TaskRepositoryResult<Vec<Subtask>>;

    /// Applies a partial update to a subtask and returns the stored result.
    ///
    /// The read and the write happen atomically with respect to appends and
    /// reorders of the owning task. The position is written only when the
    /// update sets one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::SubtaskNotFound`] when the subtask does
    /// not exist, [`TaskRepositoryError::PositionTaken`] when another
    /// subtask of the same task already holds the requested position, and
    /// [`TaskRepositoryError::Domain`] for an empty update.
    async fn update_subtask(
        &self,
        id: SubtaskId,
        update: SubtaskUpdate,
    ) -> TaskRepositoryResult<Subtask>;

    /// Deletes a single subtask.
    ///
    /// Returns `false` when the subtask does not exist.
    async fn delete_subtask(&self, id: SubtaskId) -> TaskRepositoryResult<bool>;

    /// Resequences a task's subtasks following `ordered_ids`.
    ///
    /// Returns the subtasks named in `ordered_ids` that belong to the task,
    /// in request order; see [`plan_reorder`](crate::task::domain::plan_reorder).
    /// Omitted subtasks are repositioned after them but not returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn reorder_subtasks(
        &self,
        task_id: TaskId,
        ordered_ids: &[SubtaskId],
    ) -> TaskRepositoryResult<Vec<Subtask>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The subtask was not found.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// Another subtask of the task already holds the position.
    #[error("position {position} is already taken in task {task_id}")]
    PositionTaken {
        /// Owning task.
        task_id: TaskId,
        /// Contested position.
        position: SubtaskPosition,
    },

    /// Sequencing rejected the write.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
