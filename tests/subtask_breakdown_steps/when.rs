//! When steps for subtask breakdown BDD scenarios.

use std::sync::Arc;

use super::world::{BreakdownWorld, run_async, split_list};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskbreak::breakdown::services::BreakdownService;
use taskbreak::task::domain::SubtaskId;

#[when("a breakdown is generated for the task")]
fn breakdown_is_generated(world: &mut BreakdownWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let generator = BreakdownService::new(Arc::new(world.provider.clone()));
    let result = run_async(world.service.generate_breakdown(task_id, &generator));
    world.last_generated = Some(result);
    Ok(())
}

#[when(r#"the subtasks are reordered as "{titles}""#)]
fn subtasks_are_reordered(world: &mut BreakdownWorld, titles: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let ordered: Vec<SubtaskId> = split_list(&titles)
        .iter()
        .map(|title| {
            world
                .subtask_ids
                .get(title)
                .copied()
                .unwrap_or_else(SubtaskId::new)
        })
        .collect();
    let reordered = run_async(world.service.reorder_subtasks(task_id, &ordered))
        .wrap_err("reorder subtasks in scenario")?;
    world.last_reordered = Some(reordered);
    Ok(())
}
