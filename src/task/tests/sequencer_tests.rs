//! Tests for subtask position assignment.

use crate::task::domain::{
    PersistedSubtaskData, Subtask, SubtaskDraft, SubtaskId, SubtaskPosition, TaskDomainError,
    TaskId, TaskStatus, TaskTitle, plan_reorder, sequence_after,
};
use rstest::{fixture, rstest};

fn draft(title: &str) -> SubtaskDraft {
    SubtaskDraft::new(TaskTitle::new(title).expect("valid title"), None)
}

fn stored(task_id: TaskId, title: &str, position: u32) -> Subtask {
    Subtask::from_persisted(PersistedSubtaskData {
        id: SubtaskId::new(),
        task_id,
        title: TaskTitle::new(title).expect("valid title"),
        description: None,
        status: TaskStatus::Pending,
        position: SubtaskPosition::new(position).expect("valid position"),
    })
}

fn positions(subtasks: &[Subtask]) -> Vec<u32> {
    subtasks
        .iter()
        .map(|subtask| subtask.position().value())
        .collect()
}

fn titles(subtasks: &[Subtask]) -> Vec<&str> {
    subtasks
        .iter()
        .map(|subtask| subtask.title().as_str())
        .collect()
}

#[fixture]
fn task_id() -> TaskId {
    TaskId::new()
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(8)]
fn append_to_empty_task_starts_at_zero(task_id: TaskId, #[case] count: u32) {
    let drafts = (0..count).map(|n| draft(&format!("step {n}"))).collect();
    let sequenced = sequence_after(task_id, None, drafts).expect("sequencing succeeds");

    assert_eq!(positions(&sequenced), (0..count).collect::<Vec<_>>());
    assert!(sequenced.iter().all(|subtask| subtask.task_id() == task_id));
    assert!(
        sequenced
            .iter()
            .all(|subtask| subtask.status() == TaskStatus::Pending)
    );
}

#[rstest]
fn append_follows_existing_maximum(task_id: TaskId) {
    let sequenced = sequence_after(
        task_id,
        SubtaskPosition::new(2).ok(),
        vec![draft("A"), draft("B")],
    )
    .expect("sequencing succeeds");

    assert_eq!(positions(&sequenced), [3, 4]);
    assert_eq!(titles(&sequenced), ["A", "B"]);
}

#[rstest]
fn append_of_nothing_yields_nothing(task_id: TaskId) {
    let sequenced = sequence_after(task_id, Some(SubtaskPosition::MAX), Vec::new())
        .expect("nothing to sequence");
    assert!(sequenced.is_empty());
}

#[rstest]
fn append_past_range_end_fails(task_id: TaskId) {
    assert_eq!(
        sequence_after(task_id, Some(SubtaskPosition::MAX), vec![draft("A")]),
        Err(TaskDomainError::PositionOverflow)
    );
}

#[rstest]
fn append_can_fill_last_position(task_id: TaskId) {
    let sequenced = sequence_after(
        task_id,
        SubtaskPosition::new(SubtaskPosition::MAX.value() - 1).ok(),
        vec![draft("last")],
    )
    .expect("sequencing succeeds");
    assert_eq!(positions(&sequenced), [SubtaskPosition::MAX.value()]);
}

#[rstest]
fn reorder_with_current_order_is_idempotent(task_id: TaskId) {
    let existing = vec![
        stored(task_id, "A", 0),
        stored(task_id, "B", 1),
        stored(task_id, "C", 2),
    ];
    let ids: Vec<SubtaskId> = existing.iter().map(Subtask::id).collect();

    let plan = plan_reorder(&existing, &ids).expect("plan succeeds");

    assert_eq!(plan.named(), existing.as_slice());
    assert!(plan.trailing().is_empty());
}

#[rstest]
fn reorder_assigns_request_order(task_id: TaskId) {
    let existing = vec![
        stored(task_id, "A", 0),
        stored(task_id, "B", 1),
        stored(task_id, "C", 2),
    ];
    let ids: Vec<SubtaskId> = existing.iter().rev().map(Subtask::id).collect();

    let named = plan_reorder(&existing, &ids)
        .expect("plan succeeds")
        .into_named();

    assert_eq!(titles(&named), ["C", "B", "A"]);
    assert_eq!(positions(&named), [0, 1, 2]);
}

#[rstest]
fn reorder_skips_stale_identifier(task_id: TaskId) {
    let first = stored(task_id, "A", 0);
    let second = stored(task_id, "B", 1);
    let requested = [second.id(), SubtaskId::new(), first.id()];
    let existing = vec![first, second];

    let named = plan_reorder(&existing, &requested)
        .expect("plan succeeds")
        .into_named();

    assert_eq!(titles(&named), ["B", "A"]);
    assert_eq!(positions(&named), [0, 1]);
}

#[rstest]
fn reorder_places_unnamed_subtasks_after_named(task_id: TaskId) {
    let last = stored(task_id, "C", 7);
    let requested = [last.id()];
    let existing = vec![stored(task_id, "A", 0), stored(task_id, "B", 3), last];

    let plan = plan_reorder(&existing, &requested).expect("plan succeeds");

    assert_eq!(titles(plan.named()), ["C"]);
    assert_eq!(positions(plan.named()), [0]);
    assert_eq!(titles(plan.trailing()), ["A", "B"]);
    assert_eq!(positions(plan.trailing()), [1, 2]);
    assert_eq!(plan.all().count(), 3);
}

#[rstest]
fn reorder_keeps_first_occurrence_of_duplicates(task_id: TaskId) {
    let first = stored(task_id, "A", 0);
    let second = stored(task_id, "B", 1);
    let (a, b) = (first.id(), second.id());
    let existing = vec![first, second];

    let named = plan_reorder(&existing, &[b, a, b])
        .expect("plan succeeds")
        .into_named();

    assert_eq!(titles(&named), ["B", "A"]);
    assert_eq!(positions(&named), [0, 1]);
}

#[rstest]
fn reorder_with_only_stale_identifiers_names_nothing(task_id: TaskId) {
    let existing = vec![stored(task_id, "A", 4)];
    let plan = plan_reorder(&existing, &[SubtaskId::new()]).expect("plan succeeds");

    assert!(plan.named().is_empty());
    assert_eq!(positions(plan.trailing()), [0]);
}
