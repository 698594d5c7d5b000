//! Shared fixtures for in-memory integration tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Task, TaskId},
    services::TaskSynchronizer,
};

/// Synchronizer type used across the in-memory suite.
pub type MemorySync = TaskSynchronizer<InMemoryTaskStore>;

/// A store together with a synchronizer reading from it.
pub struct Board {
    pub store: Arc<InMemoryTaskStore>,
    pub sync: MemorySync,
}

/// Provides an empty store and an unloaded synchronizer.
#[fixture]
pub fn board() -> Board {
    let store = Arc::new(InMemoryTaskStore::new());
    let sync = TaskSynchronizer::new(Arc::clone(&store));
    Board { store, sync }
}

/// Keys tasks by id so collections compare independently of order.
#[must_use]
pub fn by_id(tasks: Vec<Task>) -> BTreeMap<TaskId, Task> {
    tasks.into_iter().map(|task| (task.id(), task)).collect()
}

/// Returns task titles in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_owned()).collect()
}
