//! Request handlers for task management and breakdown generation.

use super::{
    ApiError, ApiResponse, ApiResult, BreakdownBody, CreateSubtasksBody, CreateTaskBody,
    ReorderBody, UpdateSubtaskBody, UpdateTaskBody,
};
use crate::breakdown::{
    domain::BreakdownRequest, ports::TextGenerationProvider, services::BreakdownService,
};
use crate::task::{
    domain::{SubtaskId, TaskId},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService},
};
use mockable::Clock;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "task-breakdown-api";

/// Reports liveness with the current time.
#[must_use]
pub fn health(clock: &impl Clock) -> ApiResponse {
    ApiResponse::from_value(
        StatusCode::OK,
        json!({
            "status": "ok",
            "timestamp": clock.utc().to_rfc3339(),
            "service": SERVICE_NAME,
        }),
    )
}

/// Handler set bound to a task service and a breakdown generator.
#[derive(Clone)]
pub struct TaskApi<R, C, P>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    P: TextGenerationProvider,
{
    tasks: TaskService<R, C>,
    generator: BreakdownService<P>,
}

impl<R, C, P> TaskApi<R, C, P>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    P: TextGenerationProvider,
{
    /// Creates the handler set.
    #[must_use]
    pub const fn new(tasks: TaskService<R, C>, generator: BreakdownService<P>) -> Self {
        Self { tasks, generator }
    }

    /// `POST /ai/breakdown`: generates candidates without persisting them.
    ///
    /// # Errors
    ///
    /// 400 for a blank title, 503 when generation fails.
    pub async fn breakdown(&self, body: BreakdownBody) -> ApiResult {
        let request =
            BreakdownRequest::new(&body.title, body.description.unwrap_or_default())?;
        let candidates = self.generator.generate(&request).await?;
        ApiResponse::json(StatusCode::OK, &candidates)
    }

    /// `GET /tasks`.
    ///
    /// # Errors
    ///
    /// 500 when the store cannot be read.
    pub async fn list_tasks(&self) -> ApiResult {
        let tasks = self.tasks.list_tasks().await?;
        ApiResponse::json(StatusCode::OK, &tasks)
    }

    /// `POST /tasks`.
    ///
    /// # Errors
    ///
    /// 400 when the title is invalid.
    pub async fn create_task(&self, body: CreateTaskBody) -> ApiResult {
        let mut request = CreateTaskRequest::new(body.title);
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        let task = self.tasks.create_task(request).await?;
        ApiResponse::json(StatusCode::CREATED, &task)
    }

    /// `GET /tasks/:id`: the task with its ordered subtasks.
    ///
    /// # Errors
    ///
    /// 400 for a malformed identifier, 404 when the task is missing.
    pub async fn get_task(&self, task_id: &str) -> ApiResult {
        let detail = self.tasks.get_task(parse_task_id(task_id)?).await?;
        ApiResponse::json(StatusCode::OK, &detail)
    }

    /// `PUT /tasks/:id`.
    ///
    /// # Errors
    ///
    /// 400 for invalid or empty updates, 404 when the task is missing.
    pub async fn update_task(&self, task_id: &str, body: UpdateTaskBody) -> ApiResult {
        let id = parse_task_id(task_id)?;
        let task = self.tasks.update_task(id, body.into_update()?).await?;
        ApiResponse::json(StatusCode::OK, &task)
    }

    /// `DELETE /tasks/:id`.
    ///
    /// # Errors
    ///
    /// 404 when the task is missing.
    pub async fn delete_task(&self, task_id: &str) -> ApiResult {
        self.tasks.delete_task(parse_task_id(task_id)?).await?;
        Ok(ApiResponse::no_content())
    }

    /// `POST /tasks/:id/subtasks`: appends caller-supplied subtasks.
    ///
    /// # Errors
    ///
    /// 400 for invalid titles, 404 when the task is missing.
    pub async fn add_subtasks(&self, task_id: &str, body: CreateSubtasksBody) -> ApiResult {
        let id = parse_task_id(task_id)?;
        let subtasks = self.tasks.add_subtasks(id, body.into_drafts()?).await?;
        ApiResponse::json(StatusCode::CREATED, &subtasks)
    }

    /// `POST /tasks/:id/breakdown`: generates and appends subtasks.
    ///
    /// # Errors
    ///
    /// 404 when the task is missing, 503 when generation fails.
    pub async fn generate_breakdown(&self, task_id: &str) -> ApiResult {
        let id = parse_task_id(task_id)?;
        let subtasks = self.tasks.generate_breakdown(id, &self.generator).await?;
        ApiResponse::json(StatusCode::CREATED, &subtasks)
    }

    /// `PUT /tasks/:id/reorder`.
    ///
    /// Unparsable identifiers are skipped along with identifiers of other
    /// tasks. Only matched subtasks are returned; omitted ones move behind
    /// them.
    ///
    /// # Errors
    ///
    /// 404 when the task is missing.
    pub async fn reorder(&self, task_id: &str, body: ReorderBody) -> ApiResult {
        let id = parse_task_id(task_id)?;
        let ordered: Vec<SubtaskId> = body
            .subtask_ids
            .into_iter()
            .filter_map(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(SubtaskId::from_uuid)
            .collect();
        let subtasks = self.tasks.reorder_subtasks(id, &ordered).await?;
        ApiResponse::json(StatusCode::OK, &subtasks)
    }

    /// `PUT /subtasks/:id`.
    ///
    /// # Errors
    ///
    /// 400 for invalid updates or a taken position, 404 when the subtask is
    /// missing.
    pub async fn update_subtask(&self, subtask_id: &str, body: UpdateSubtaskBody) -> ApiResult {
        let id = parse_subtask_id(subtask_id)?;
        let subtask = self.tasks.update_subtask(id, body.into_update()?).await?;
        ApiResponse::json(StatusCode::OK, &subtask)
    }

    /// `DELETE /subtasks/:id`.
    ///
    /// # Errors
    ///
    /// 404 when the subtask is missing.
    pub async fn delete_subtask(&self, subtask_id: &str) -> ApiResult {
        self.tasks
            .delete_subtask(parse_subtask_id(subtask_id)?)
            .await?;
        Ok(ApiResponse::no_content())
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    Uuid::parse_str(raw.trim())
        .map(TaskId::from_uuid)
        .map_err(|_| ApiError::bad_request(format!("invalid task id: {raw}")))
}

fn parse_subtask_id(raw: &str) -> Result<SubtaskId, ApiError> {
    Uuid::parse_str(raw.trim())
        .map(SubtaskId::from_uuid)
        .map_err(|_| ApiError::bad_request(format!("invalid subtask id: {raw}")))
}
