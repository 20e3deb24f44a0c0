//! In-memory repository for tasks and subtasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        Subtask, SubtaskDraft, SubtaskId, SubtaskPosition, SubtaskUpdate, Task, TaskId,
        plan_reorder, sequence_after,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// A single write lock covers every mutation, which makes appends and
/// reorders atomic and serialises position assignment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    subtasks: HashMap<SubtaskId, Subtask>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTaskState {
    fn ensure_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        if self.tasks.contains_key(&task_id) {
            Ok(())
        } else {
            Err(TaskRepositoryError::TaskNotFound(task_id))
        }
    }

    fn ordered_subtasks(&self, task_id: TaskId) -> Vec<Subtask> {
        let mut subtasks: Vec<Subtask> = self
            .subtasks
            .values()
            .filter(|subtask| subtask.task_id() == task_id)
            .cloned()
            .collect();
        subtasks.sort_by_key(Subtask::position);
        subtasks
    }

    fn max_position(&self, task_id: TaskId) -> Option<SubtaskPosition> {
        self.subtasks
            .values()
            .filter(|subtask| subtask.task_id() == task_id)
            .map(Subtask::position)
            .max()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::TaskNotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(tasks)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Ok(false);
        }
        state.subtasks.retain(|_, subtask| subtask.task_id() != id);
        Ok(true)
    }

    async fn subtasks_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Subtask>> {
        let state = self.read()?;
        Ok(state.ordered_subtasks(task_id))
    }

    async fn find_subtask(&self, id: SubtaskId) -> TaskRepositoryResult<Option<Subtask>> {
        let state = self.read()?;
        Ok(state.subtasks.get(&id).cloned())
    }

    async fn max_position(&self, task_id: TaskId) -> TaskRepositoryResult<Option<SubtaskPosition>> {
        let state = self.read()?;
        Ok(state.max_position(task_id))
    }

    async fn append_subtasks(
        &self,
        task_id: TaskId,
        drafts: Vec<SubtaskDraft>,
    ) -> TaskRepositoryResult<Vec<Subtask>> {
        let mut state = self.write()?;
        state.ensure_task(task_id)?;
        let sequenced = sequence_after(task_id, state.max_position(task_id), drafts)?;
        for subtask in &sequenced {
            state.subtasks.insert(subtask.id(), subtask.clone());
        }
        Ok(sequenced)
    }

    async fn update_subtask(
        &self,
        id: SubtaskId,
        update: SubtaskUpdate,
    ) -> TaskRepositoryResult<Subtask> {
        let mut state = self.write()?;
        let mut subtask = state
            .subtasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::SubtaskNotFound(id))?;
        if let Some(position) = update.position() {
            let task_id = subtask.task_id();
            let position_taken = state.subtasks.values().any(|other| {
                other.id() != id && other.task_id() == task_id && other.position() == position
            });
            if position_taken {
                return Err(TaskRepositoryError::PositionTaken { task_id, position });
            }
        }
        subtask.apply(update)?;
        state.subtasks.insert(id, subtask.clone());
        Ok(subtask)
    }

    async fn delete_subtask(&self, id: SubtaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.subtasks.remove(&id).is_some())
    }

    async fn reorder_subtasks(
        &self,
        task_id: TaskId,
        ordered_ids: &[SubtaskId],
    ) -> TaskRepositoryResult<Vec<Subtask>> {
        let mut state = self.write()?;
        state.ensure_task(task_id)?;
        let plan = plan_reorder(&state.ordered_subtasks(task_id), ordered_ids)?;
        for subtask in plan.all() {
            state.subtasks.insert(subtask.id(), subtask.clone());
        }
        Ok(plan.into_named())
    }
}
