//! In-memory integration tests for generating and storing breakdowns.

use super::helpers::{TestService, create_task, drafts, generator_replying, service, summary};
use rstest::rstest;
use taskbreak::breakdown::domain::{BreakdownError, ProviderFailureCause};
use taskbreak::task::services::TaskServiceError;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_candidates_follow_existing_subtasks(
    service: TestService,
) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Organise conference").await?;
    service
        .add_subtasks(task.id(), drafts(&["venue", "speakers", "catering"])?)
        .await?;
    let generator = generator_replying(&[
        r#"[{"title":"A","description":"x"},{"title":"B","description":"y"}]"#,
    ]);

    let appended = service.generate_breakdown(task.id(), &generator).await?;

    eyre::ensure!(
        summary(&appended) == [("A".to_owned(), 3), ("B".to_owned(), 4)],
        "unexpected appended subtasks: {:?}",
        summary(&appended)
    );
    let detail = service.get_task(task.id()).await?;
    eyre::ensure!(detail.subtasks().len() == 5, "expected five stored subtasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_breakdowns_keep_extending_the_sequence(
    service: TestService,
) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Write thesis").await?;
    let generator = generator_replying(&[
        "```json\n[{\"title\":\"Research\",\"description\":\"Read papers\"}]\n```",
        "Sure: [{\"title\":\"Write\",\"description\":\"Draft chapters\"}] good luck",
    ]);

    let first = service.generate_breakdown(task.id(), &generator).await?;
    let second = service.generate_breakdown(task.id(), &generator).await?;

    eyre::ensure!(
        summary(&first) == [("Research".to_owned(), 0)],
        "unexpected first breakdown {:?}",
        summary(&first)
    );
    eyre::ensure!(
        summary(&second) == [("Write".to_owned(), 1)],
        "unexpected second breakdown {:?}",
        summary(&second)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlong_generated_title_is_truncated(service: TestService) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Long titles").await?;
    let reply = format!(
        r#"[{{"title":"{}","description":"d"}}]"#,
        "t".repeat(600)
    );
    let generator = generator_replying(&[reply.as_str()]);

    let appended = service.generate_breakdown(task.id(), &generator).await?;
    let stored = appended
        .first()
        .ok_or_else(|| eyre::eyre!("expected one subtask"))?;

    eyre::ensure!(
        stored.title().as_str().chars().count() == 500,
        "title was not truncated to 500 characters"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_element_rejects_whole_batch(service: TestService) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Batch").await?;
    let generator = generator_replying(&[
        r#"[{"title":"ok","description":"d"},{"title":"ok","description":"d"},{"title":"","description":"d"}]"#,
    ]);

    let result = service.generate_breakdown(task.id(), &generator).await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskServiceError::Breakdown(BreakdownError::Field { index: 2, .. }))
        ),
        "expected field error at index 2, got {result:?}"
    );
    eyre::ensure!(
        service.get_task(task.id()).await?.subtasks().is_empty(),
        "rejected batch left subtasks behind"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provider_outage_is_classified(service: TestService) -> Result<(), eyre::Report> {
    let task = create_task(&service, "Outage").await?;

    let result = service
        .generate_breakdown(task.id(), &generator_replying(&[]))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskServiceError::Breakdown(BreakdownError::ProviderUnavailable {
                cause: ProviderFailureCause::Unknown,
                ..
            }))
        ),
        "expected provider outage, got {result:?}"
    );
    Ok(())
}
