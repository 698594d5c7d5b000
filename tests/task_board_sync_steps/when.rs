//! When steps for task board synchronization BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use rstest_bdd_macros::when;
use taskboard::task::{domain::TaskId, services::TaskRequest};

#[when(r#"I create a task titled "{title}""#)]
fn create_task(world: &mut BoardWorld, title: String) {
    world.last_error = run_async(world.sync.create_task(TaskRequest::new(title))).err();
}

#[when(r#"I move "{title}" to "{status}" at position {index:usize}"#)]
fn move_task(
    world: &mut BoardWorld,
    title: String,
    status: String,
    index: usize,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let destination = parse_status(&status)?;
    world.last_error = run_async(world.sync.move_task(id, destination, index)).err();
    Ok(())
}

#[when(r#"I rename "{title}" to a title of {length:usize} characters"#)]
fn rename_task(world: &mut BoardWorld, title: String, length: usize) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let request = TaskRequest::new("t".repeat(length));
    world.last_error = run_async(world.sync.update_task(id, request)).err();
    Ok(())
}

#[when(r#"I delete "{title}""#)]
fn delete_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    world.last_error = run_async(world.sync.delete_task(id)).err();
    Ok(())
}

#[when("I delete a task that is not on the board")]
fn delete_unknown_task(world: &mut BoardWorld) {
    world.last_error = run_async(world.sync.delete_task(TaskId::new())).err();
}
