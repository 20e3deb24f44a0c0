//! Given steps for subtask breakdown BDD scenarios.

use super::world::{BreakdownWorld, run_async, split_list};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use taskbreak::task::{
    domain::{SubtaskDraft, TaskTitle},
    services::CreateTaskRequest,
};

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut BreakdownWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create_task(CreateTaskRequest::new(title)))
        .wrap_err("create task for breakdown scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"the task has subtasks "{titles}""#)]
fn task_has_subtasks(world: &mut BreakdownWorld, titles: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let drafts = split_list(&titles)
        .into_iter()
        .map(|title| Ok(SubtaskDraft::new(TaskTitle::new(title)?, None)))
        .collect::<Result<Vec<_>, eyre::Report>>()?;
    let appended = run_async(world.service.add_subtasks(task_id, drafts))
        .wrap_err("seed subtasks for breakdown scenario")?;
    for subtask in appended {
        world
            .subtask_ids
            .insert(subtask.title().as_str().to_owned(), subtask.id());
    }
    Ok(())
}

#[given(r#"the provider replies with subtasks "{titles}""#)]
fn provider_replies_with_subtasks(world: &mut BreakdownWorld, titles: String) {
    let items: Vec<_> = split_list(&titles)
        .into_iter()
        .map(|title| json!({"title": title, "description": "generated"}))
        .collect();
    world.provider = world.provider.clone().with_reply(json!(items).to_string());
}

#[given(r#"the provider replies with a fenced block holding subtask "{title}""#)]
fn provider_replies_with_fenced_block(world: &mut BreakdownWorld, title: String) {
    let body = json!([{"title": title, "description": "D"}]);
    world.provider = world
        .provider
        .clone()
        .with_reply(format!("```json\n{body}\n```"));
}

#[given(r#"the provider replies with "{text}""#)]
fn provider_replies_with_text(world: &mut BreakdownWorld, text: String) {
    world.provider = world.provider.clone().with_reply(text);
}
