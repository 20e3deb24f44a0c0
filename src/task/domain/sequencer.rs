//! Position assignment for subtask sequences.
//!
//! Both functions are pure: repositories call them while holding whatever
//! lock or transaction serialises writes to a task's subtasks, so the
//! computed positions cannot race with a concurrent append.

use super::{Subtask, SubtaskDraft, SubtaskId, SubtaskPosition, TaskDomainError, TaskId};
use std::collections::HashSet;

/// Sequences drafts after the current maximum position of a task.
///
/// `current_max` is `None` when the task has no subtasks, in which case
/// positions start at zero. Drafts receive strictly increasing positions in
/// input order; existing subtasks are never touched. An empty draft list
/// yields an empty result whatever `current_max` is.
///
/// # Errors
///
/// Returns [`TaskDomainError::PositionOverflow`] when the position range
/// is exhausted.
pub fn sequence_after(
    task_id: TaskId,
    current_max: Option<SubtaskPosition>,
    drafts: Vec<SubtaskDraft>,
) -> Result<Vec<Subtask>, TaskDomainError> {
    if drafts.is_empty() {
        return Ok(Vec::new());
    }
    let mut next = match current_max {
        Some(max) => max.next().ok_or(TaskDomainError::PositionOverflow)?,
        None => SubtaskPosition::FIRST,
    };
    let mut sequenced = Vec::with_capacity(drafts.len());
    let last_index = drafts.len().saturating_sub(1);
    for (index, draft) in drafts.into_iter().enumerate() {
        sequenced.push(Subtask::from_draft(task_id, draft, next));
        if index < last_index {
            next = next.next().ok_or(TaskDomainError::PositionOverflow)?;
        }
    }
    Ok(sequenced)
}

/// Outcome of resequencing a task's subtasks against a requested order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    named: Vec<Subtask>,
    trailing: Vec<Subtask>,
}

impl ReorderPlan {
    /// Subtasks named in the request, in request order, with their new
    /// positions.
    #[must_use]
    pub fn named(&self) -> &[Subtask] {
        &self.named
    }

    /// Subtasks the request did not name, moved after the named ones.
    #[must_use]
    pub fn trailing(&self) -> &[Subtask] {
        &self.trailing
    }

    /// Iterates every subtask whose row must be written.
    pub fn all(&self) -> impl Iterator<Item = &Subtask> {
        self.named.iter().chain(self.trailing.iter())
    }

    /// Consumes the plan, returning the named subtasks.
    #[must_use]
    pub fn into_named(self) -> Vec<Subtask> {
        self.named
    }
}

/// Plans a full resequencing of `existing` following `requested` order.
///
/// Identifiers that do not belong to the task are skipped, as are repeats
/// of an identifier already placed. Matched subtasks take positions
/// `0..k` in request order. Subtasks of the task that the request omits
/// keep their relative order and follow at `k..`, so positions remain
/// unique and contiguous.
///
/// # Errors
///
/// Returns [`TaskDomainError::PositionOverflow`] when the task holds more
/// subtasks than positions can represent.
pub fn plan_reorder(
    existing: &[Subtask],
    requested: &[SubtaskId],
) -> Result<ReorderPlan, TaskDomainError> {
    let mut placed = HashSet::with_capacity(requested.len());
    let mut named = Vec::with_capacity(requested.len());
    for id in requested {
        if !placed.insert(*id) {
            continue;
        }
        if let Some(subtask) = existing.iter().find(|subtask| subtask.id() == *id) {
            named.push(subtask.clone());
        }
    }

    let mut trailing: Vec<Subtask> = existing
        .iter()
        .filter(|subtask| !placed.contains(&subtask.id()))
        .cloned()
        .collect();
    trailing.sort_by_key(Subtask::position);

    for (index, subtask) in named.iter_mut().chain(trailing.iter_mut()).enumerate() {
        let position = u32::try_from(index)
            .ok()
            .and_then(|value| SubtaskPosition::new(value).ok())
            .ok_or(TaskDomainError::PositionOverflow)?;
        subtask.set_position(position);
    }

    Ok(ReorderPlan { named, trailing })
}
