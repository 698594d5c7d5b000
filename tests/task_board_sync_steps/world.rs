//! Shared world state for task board synchronization BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{TaskId, TaskStatus},
    services::{SyncError, TaskSynchronizer},
};

/// Synchronizer type used by the BDD world.
pub type BoardSync = TaskSynchronizer<InMemoryTaskStore>;

/// Scenario world for board synchronization behaviour tests.
pub struct BoardWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub sync: BoardSync,
    pub last_error: Option<SyncError>,
}

impl BoardWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let sync = TaskSynchronizer::new(Arc::clone(&store));
        Self {
            store,
            sync,
            last_error: None,
        }
    }

    /// Looks up a task on the local board by title.
    ///
    /// # Errors
    ///
    /// Returns an error if no local task has the title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.sync
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .map(|task| task.id())
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a status written in a feature file.
///
/// # Errors
///
/// Returns an error for an unknown status.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
