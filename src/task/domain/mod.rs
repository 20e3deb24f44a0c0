//! Domain model for tasks and their ordered subtasks.
//!
//! Tasks own an ordered sequence of subtasks. Position assignment lives in
//! [`sequence_after`] and [`plan_reorder`] so that every store applies the
//! same ordering rules.

mod error;
mod ids;
mod sequencer;
mod status;
mod subtask;
mod task;
mod title;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{SubtaskId, SubtaskPosition, TaskId};
pub use sequencer::{ReorderPlan, plan_reorder, sequence_after};
pub use status::TaskStatus;
pub use subtask::{PersistedSubtaskData, Subtask, SubtaskDraft, SubtaskUpdate};
pub use task::{PersistedTaskData, Task, TaskUpdate};
pub use title::{MAX_TITLE_CHARS, TaskTitle, normalize_description};
