//! In-memory integration tests for appending and reordering subtasks.

use std::sync::Arc;

use super::helpers::{TestService, create_task, drafts, service, summary};
use rstest::rstest;
use taskbreak::task::domain::{Subtask, SubtaskId};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_on_empty_task_numbers_from_zero(service: TestService) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Fresh").await?;

    let appended = service
        .add_subtasks(task.id(), drafts(&["one", "two", "three", "four"])?)
        .await?;
    let positions: Vec<u32> = summary(&appended).into_iter().map(|(_, at)| at).collect();

    eyre::ensure!(positions == [0, 1, 2, 3], "unexpected positions {positions:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn parallel_appends_through_service_stay_unique(
    service: TestService,
) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Contended").await?;
    let task_id = task.id();
    let shared = Arc::new(service);

    let mut handles = Vec::new();
    for worker in 0..6 {
        let svc = Arc::clone(&shared);
        let batch = drafts(&[
            format!("w{worker}-a").as_str(),
            format!("w{worker}-b").as_str(),
        ])?;
        handles.push(tokio::spawn(async move {
            svc.add_subtasks(task_id, batch).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let detail = shared.get_task(task_id).await?;
    let positions: Vec<u32> = detail
        .subtasks()
        .iter()
        .map(|subtask| subtask.position().value())
        .collect();
    eyre::ensure!(
        positions == (0..12).collect::<Vec<_>>(),
        "positions collided: {positions:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_is_idempotent(service: TestService) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Stable").await?;
    let appended = service
        .add_subtasks(task.id(), drafts(&["a", "b", "c"])?)
        .await?;
    let ids: Vec<SubtaskId> = appended.iter().map(Subtask::id).collect();

    let reordered = service.reorder_subtasks(task.id(), &ids).await?;

    eyre::ensure!(
        summary(&reordered) == summary(&appended),
        "reorder with unchanged order moved subtasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_after_delete_closes_gaps(service: TestService) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Gappy").await?;
    let appended = service
        .add_subtasks(task.id(), drafts(&["a", "b", "c"])?)
        .await?;
    let ids: Vec<SubtaskId> = appended.iter().map(Subtask::id).collect();
    let (first, rest) = ids
        .split_first()
        .ok_or_else(|| eyre::eyre!("expected subtasks"))?;
    service.delete_subtask(*first).await?;

    let mut requested = rest.to_vec();
    requested.reverse();
    requested.push(*first);
    let reordered = service.reorder_subtasks(task.id(), &requested).await?;

    eyre::ensure!(
        summary(&reordered) == [("c".to_owned(), 0), ("b".to_owned(), 1)],
        "unexpected reorder result {:?}",
        summary(&reordered)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_task_removes_its_subtasks(service: TestService) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Ephemeral").await?;
    service.add_subtasks(task.id(), drafts(&["a"])?).await?;

    service.delete_task(task.id()).await?;

    eyre::ensure!(
        service.get_task(task.id()).await.is_err(),
        "deleted task is still readable"
    );
    eyre::ensure!(
        service.list_tasks().await?.is_empty(),
        "deleted task is still listed"
    );
    Ok(())
}
