//! Then steps for subtask breakdown BDD scenarios.

use super::world::{BreakdownWorld, run_async, split_list};
use rstest_bdd_macros::then;
use taskbreak::breakdown::domain::BreakdownError;
use taskbreak::task::{domain::Subtask, services::TaskServiceError};

fn generated(world: &BreakdownWorld) -> Result<&[Subtask], eyre::Report> {
    match world.last_generated.as_ref() {
        Some(Ok(subtasks)) => Ok(subtasks),
        Some(Err(err)) => Err(eyre::eyre!("breakdown failed unexpectedly: {err}")),
        None => Err(eyre::eyre!("missing breakdown result")),
    }
}

fn reordered(world: &BreakdownWorld) -> Result<&[Subtask], eyre::Report> {
    world
        .last_reordered
        .as_deref()
        .ok_or_else(|| eyre::eyre!("missing reorder result"))
}

fn titles_of(subtasks: &[Subtask]) -> Vec<String> {
    subtasks
        .iter()
        .map(|subtask| subtask.title().as_str().to_owned())
        .collect()
}

fn positions_of(subtasks: &[Subtask]) -> Vec<String> {
    subtasks
        .iter()
        .map(|subtask| subtask.position().to_string())
        .collect()
}

fn ensure_list(actual: &[String], expected: &str) -> Result<(), eyre::Report> {
    let wanted = split_list(expected);
    if actual != wanted.as_slice() {
        return Err(eyre::eyre!("expected {wanted:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the generated subtasks are "{titles}""#)]
fn generated_titles(world: &BreakdownWorld, titles: String) -> Result<(), eyre::Report> {
    ensure_list(&titles_of(generated(world)?), &titles)
}

#[then(r#"the generated subtasks have positions "{positions}""#)]
fn generated_positions(world: &BreakdownWorld, positions: String) -> Result<(), eyre::Report> {
    ensure_list(&positions_of(generated(world)?), &positions)
}

#[then("the breakdown fails with a parse error")]
fn breakdown_fails_with_parse_error(world: &BreakdownWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_generated
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing breakdown result"))?;
    if !matches!(
        result,
        Err(TaskServiceError::Breakdown(BreakdownError::Parse))
    ) {
        return Err(eyre::eyre!("expected parse error, got {result:?}"));
    }
    Ok(())
}

#[then("the task has {count:usize} subtasks")]
fn task_has_count(world: &BreakdownWorld, count: usize) -> Result<(), eyre::Report> {
    let detail = run_async(world.service.get_task(world.task()?.id()))?;
    if detail.subtasks().len() != count {
        return Err(eyre::eyre!(
            "expected {count} subtasks, found {}",
            detail.subtasks().len()
        ));
    }
    Ok(())
}

#[then(r#"the reordered subtasks are "{titles}""#)]
fn reordered_titles(world: &BreakdownWorld, titles: String) -> Result<(), eyre::Report> {
    ensure_list(&titles_of(reordered(world)?), &titles)
}

#[then(r#"the reordered subtasks have positions "{positions}""#)]
fn reordered_positions(world: &BreakdownWorld, positions: String) -> Result<(), eyre::Report> {
    ensure_list(&positions_of(reordered(world)?), &positions)
}

#[then(r#"the stored subtask order is "{titles}""#)]
fn stored_order(world: &BreakdownWorld, titles: String) -> Result<(), eyre::Report> {
    let detail = run_async(world.service.get_task(world.task()?.id()))?;
    ensure_list(&titles_of(detail.subtasks()), &titles)
}
