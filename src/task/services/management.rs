//! Service layer for task and subtask management.

use crate::breakdown::{
    domain::{BreakdownError, BreakdownRequest, SubtaskCandidate},
    ports::TextGenerationProvider,
    services::BreakdownService,
};
use crate::task::{
    domain::{
        Subtask, SubtaskDraft, SubtaskId, SubtaskPosition, SubtaskUpdate, Task, TaskDomainError,
        TaskId, TaskTitle, TaskUpdate, normalize_description,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A task together with its subtasks ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    task: Task,
    subtasks: Vec<Subtask>,
}

impl TaskDetail {
    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the subtasks ordered by position.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }
}

/// Service-level errors for task management.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Caller input failed validation.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The subtask does not exist.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// Another subtask of the task already holds the requested position.
    #[error("position {position} is already taken in task {task_id}")]
    PositionTaken {
        /// Owning task.
        task_id: TaskId,
        /// Contested position.
        position: SubtaskPosition,
    },

    /// Breakdown generation failed.
    #[error(transparent)]
    Breakdown(#[from] BreakdownError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::TaskNotFound(id) => Self::TaskNotFound(id),
            TaskRepositoryError::SubtaskNotFound(id) => Self::SubtaskNotFound(id),
            TaskRepositoryError::PositionTaken { task_id, position } => {
                Self::PositionTaken { task_id, position }
            }
            TaskRepositoryError::Domain(domain) => Self::Validation(domain),
            other @ (TaskRepositoryError::DuplicateTask(_)
            | TaskRepositoryError::Persistence(_)) => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task management orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the title is blank or
    /// too long, or a repository error when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest { title, description } = request;
        let task = Task::new(
            TaskTitle::new(title)?,
            normalize_description(description),
            self.clock.as_ref(),
        );
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), title = task.title().as_str(), "created task");
        Ok(task)
    }

    /// Returns every task, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store cannot be read.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Returns a task with its ordered subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<TaskDetail> {
        let task = self.require_task(id).await?;
        let subtasks = self.repository.subtasks_for(id).await?;
        Ok(TaskDetail { task, subtasks })
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an empty update and
    /// [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn update_task(&self, id: TaskId, update: TaskUpdate) -> TaskServiceResult<Task> {
        if update.is_empty() {
            return Err(TaskDomainError::EmptyUpdate.into());
        }
        let mut task = self.require_task(id).await?;
        task.apply(update)?;
        self.repository.update(&task).await?;
        debug!(task_id = %id, status = %task.status(), "updated task");
        Ok(task)
    }

    /// Deletes a task and its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TaskServiceError::TaskNotFound(id));
        }
        info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Appends drafts to a task after its last subtask.
    ///
    /// Every draft is persisted or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn add_subtasks(
        &self,
        task_id: TaskId,
        drafts: Vec<SubtaskDraft>,
    ) -> TaskServiceResult<Vec<Subtask>> {
        let appended = self.repository.append_subtasks(task_id, drafts).await?;
        info!(task_id = %task_id, count = appended.len(), "appended subtasks");
        Ok(appended)
    }

    /// Applies a partial update to a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an empty update,
    /// [`TaskServiceError::SubtaskNotFound`] when the subtask is missing, and
    /// [`TaskServiceError::PositionTaken`] when a sibling holds the position.
    pub async fn update_subtask(
        &self,
        id: SubtaskId,
        update: SubtaskUpdate,
    ) -> TaskServiceResult<Subtask> {
        if update.is_empty() {
            return Err(TaskDomainError::EmptyUpdate.into());
        }
        let subtask = self.repository.update_subtask(id, update).await?;
        debug!(subtask_id = %id, position = %subtask.position(), "updated subtask");
        Ok(subtask)
    }

    /// Deletes a single subtask. Sibling positions are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::SubtaskNotFound`] when the subtask is
    /// missing.
    pub async fn delete_subtask(&self, id: SubtaskId) -> TaskServiceResult<()> {
        if !self.repository.delete_subtask(id).await? {
            return Err(TaskServiceError::SubtaskNotFound(id));
        }
        debug!(subtask_id = %id, "deleted subtask");
        Ok(())
    }

    /// Resequences a task's subtasks in the given order.
    ///
    /// Identifiers that do not belong to the task are skipped. Returns the
    /// matched subtasks in request order with their new positions.
    ///
    /// Subtasks the request omits are moved behind the matched ones so that
    /// positions stay unique. Their positions change too, but they are not
    /// part of the returned list; reload the task to see them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing.
    pub async fn reorder_subtasks(
        &self,
        task_id: TaskId,
        ordered_ids: &[SubtaskId],
    ) -> TaskServiceResult<Vec<Subtask>> {
        let reordered = self
            .repository
            .reorder_subtasks(task_id, ordered_ids)
            .await?;
        info!(
            task_id = %task_id,
            requested = ordered_ids.len(),
            matched = reordered.len(),
            "reordered subtasks"
        );
        Ok(reordered)
    }

    /// Generates a breakdown for a stored task and appends it as subtasks.
    ///
    /// Nothing is written when generation fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing
    /// and [`TaskServiceError::Breakdown`] when generation fails.
    pub async fn generate_breakdown<P>(
        &self,
        task_id: TaskId,
        generator: &BreakdownService<P>,
    ) -> TaskServiceResult<Vec<Subtask>>
    where
        P: TextGenerationProvider,
    {
        let task = self.require_task(task_id).await?;
        let candidates = generator
            .generate(&BreakdownRequest::from_task(&task))
            .await?;
        let drafts = candidates
            .into_iter()
            .map(SubtaskCandidate::into_draft)
            .collect();
        self.add_subtasks(task_id, drafts).await
    }

    async fn require_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }
}
