//! Given steps for task board synchronization BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::adapters::memory::StoreOperation;

#[given("an empty task board")]
fn empty_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.sync.refresh()).wrap_err("load empty board")?;
    Ok(())
}

#[given(r#"a task "{title}" with status "{status}""#)]
fn seeded_task(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    world.store.seed(&title, parse_status(&status)?);
    Ok(())
}

#[given("the board has been loaded")]
fn board_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.sync.refresh()).wrap_err("load board")?;
    Ok(())
}

#[given("the store rejects status changes")]
fn store_rejects_status_changes(world: &mut BoardWorld) {
    world.store.fail(StoreOperation::UpdateStatus);
}

#[given("the store rejects deletions")]
fn store_rejects_deletions(world: &mut BoardWorld) {
    world.store.fail(StoreOperation::Delete);
}
