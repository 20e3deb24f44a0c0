//! Diesel row models for task and subtask persistence.

use super::schema::{subtasks, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for subtask records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subtasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubtaskRow {
    /// Subtask identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Subtask title.
    pub title: String,
    /// Optional rationale text.
    pub description: Option<String>,
    /// Subtask status.
    pub status: String,
    /// Position within the owning task.
    pub order_index: i32,
}

/// Insert model for subtask records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subtasks)]
pub struct NewSubtaskRow {
    /// Subtask identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Subtask title.
    pub title: String,
    /// Optional rationale text.
    pub description: Option<String>,
    /// Subtask status.
    pub status: String,
    /// Position within the owning task.
    pub order_index: i32,
}
