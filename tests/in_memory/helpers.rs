//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskbreak::breakdown::{adapters::CannedTextProvider, services::BreakdownService};
use taskbreak::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Subtask, SubtaskDraft, Task, TaskTitle},
    services::{CreateTaskRequest, TaskService},
};

/// Task service over a fresh in-memory store.
pub type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Provides a task service backed by a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Builds a generator that replays `replies` in order.
#[must_use]
pub fn generator_replying(replies: &[&str]) -> BreakdownService<CannedTextProvider> {
    let provider = replies
        .iter()
        .fold(CannedTextProvider::new(), |provider, reply| {
            provider.with_reply(*reply)
        });
    BreakdownService::new(Arc::new(provider))
}

/// Creates a task with the given title.
///
/// # Errors
///
/// Returns an error if the task cannot be created.
pub async fn create_task(service: &TestService, title: &str) -> Result<Task, eyre::Report> {
    Ok(service.create_task(CreateTaskRequest::new(title)).await?)
}

/// Builds drafts for the given titles.
///
/// # Errors
///
/// Returns an error if any title is invalid.
pub fn drafts(titles: &[&str]) -> Result<Vec<SubtaskDraft>, eyre::Report> {
    titles
        .iter()
        .map(|title| Ok(SubtaskDraft::new(TaskTitle::new(title)?, None)))
        .collect()
}

/// Summarises subtasks as `(title, position)` pairs.
#[must_use]
pub fn summary(subtasks: &[Subtask]) -> Vec<(String, u32)> {
    subtasks
        .iter()
        .map(|subtask| {
            (
                subtask.title().as_str().to_owned(),
                subtask.position().value(),
            )
        })
        .collect()
}
