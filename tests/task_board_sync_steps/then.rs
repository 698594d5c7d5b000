//! Then steps for task board synchronization BDD scenarios.

use super::world::{BoardWorld, parse_status};
use eyre::{ensure, eyre};
use rstest_bdd_macros::then;
use taskboard::task::{
    adapters::memory::StoreOperation,
    domain::{CollectionError, TaskValidationError},
    services::SyncError,
};

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let held = world.sync.tasks().len();
    ensure!(held == count, "expected {count} tasks, found {held}");
    Ok(())
}

#[then(
    "the counts are {todo:u64} to do, {in_progress:u64} in progress, {completed:u64} completed and {total:u64} in total"
)]
fn counts_are(
    world: &BoardWorld,
    todo: u64,
    in_progress: u64,
    completed: u64,
    total: u64,
) -> Result<(), eyre::Report> {
    let counts = world.sync.counts();
    ensure!(
        (counts.todo, counts.in_progress, counts.completed, counts.total)
            == (todo, in_progress, completed, total),
        "unexpected counts {counts:?}"
    );
    Ok(())
}

#[then(r#""{title}" is in the "{status}" column"#)]
fn task_in_column(world: &BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let column = parse_status(&status)?;
    let board = world.sync.board();
    ensure!(
        board
            .group(column)
            .iter()
            .any(|task| task.title() == title),
        "{title:?} is not in the {column} column"
    );
    Ok(())
}

#[then(r#"the board lists "{titles}""#)]
fn board_lists(world: &BoardWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(", ").collect();
    let tasks = world.sync.tasks();
    let actual: Vec<&str> = tasks.iter().map(|task| task.title()).collect();
    ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}

#[then(r#"the error banner reads "{message}""#)]
fn banner_reads(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let banner = world
        .sync
        .banner()
        .ok_or_else(|| eyre!("expected an error banner"))?;
    ensure!(banner.message() == message, "banner reads {banner}");
    Ok(())
}

#[then("no error banner is shown")]
fn no_banner(world: &BoardWorld) -> Result<(), eyre::Report> {
    ensure!(
        world.sync.banner().is_none(),
        "unexpected banner {:?}",
        world.sync.banner()
    );
    Ok(())
}

#[then("the store received {count:usize} {operation} calls")]
fn store_received(world: &BoardWorld, count: usize, operation: String) -> Result<(), eyre::Report> {
    let op = match operation.as_str() {
        "list" => StoreOperation::List,
        "create" => StoreOperation::Create,
        "update" => StoreOperation::Update,
        "status" => StoreOperation::UpdateStatus,
        "delete" => StoreOperation::Delete,
        "stats" => StoreOperation::Stats,
        other => return Err(eyre!("unknown store operation {other:?}")),
    };
    let calls = world.store.calls(op);
    ensure!(calls == count, "expected {count} {operation} calls, found {calls}");
    Ok(())
}

#[then("the operation fails with a validation error")]
fn fails_with_validation(world: &BoardWorld) -> Result<(), eyre::Report> {
    ensure!(
        matches!(
            world.last_error,
            Some(SyncError::Validation(TaskValidationError::TitleTooLong { .. }))
        ),
        "expected a title validation error, got {:?}",
        world.last_error
    );
    Ok(())
}

#[then("the operation fails with a not found error")]
fn fails_with_not_found(world: &BoardWorld) -> Result<(), eyre::Report> {
    ensure!(
        matches!(
            world.last_error,
            Some(SyncError::Collection(CollectionError::NotFound(_)))
        ),
        "expected a not found error, got {:?}",
        world.last_error
    );
    Ok(())
}
