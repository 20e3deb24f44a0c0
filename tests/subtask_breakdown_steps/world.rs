//! Shared world state for subtask breakdown BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskbreak::breakdown::adapters::CannedTextProvider;
use taskbreak::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Subtask, SubtaskId, Task},
    services::{TaskService, TaskServiceError},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for breakdown behaviour tests.
pub struct BreakdownWorld {
    pub service: TestTaskService,
    pub provider: CannedTextProvider,
    pub task: Option<Task>,
    pub subtask_ids: HashMap<String, SubtaskId>,
    pub last_generated: Option<Result<Vec<Subtask>, TaskServiceError>>,
    pub last_reordered: Option<Vec<Subtask>>,
}

impl BreakdownWorld {
    /// Creates a world with an empty store and no queued provider replies.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            provider: CannedTextProvider::new(),
            task: None,
            subtask_ids: HashMap::new(),
            last_generated: None,
            last_reordered: None,
        }
    }

    /// Returns the scenario task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for BreakdownWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BreakdownWorld {
    BreakdownWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}
