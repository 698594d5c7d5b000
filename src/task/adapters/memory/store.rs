//! In-memory task store with scripted failures.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use crate::api::RemoteCallError;
use crate::task::{
    domain::{Task, TaskCounts, TaskData, TaskDraft, TaskId, TaskStatus, views},
    ports::{TaskStore, TaskStoreResult},
};

/// Store operation, used to script failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// [`TaskStore::list_tasks`].
    List,
    /// [`TaskStore::create_task`].
    Create,
    /// [`TaskStore::update_task`].
    Update,
    /// [`TaskStore::update_task_status`].
    UpdateStatus,
    /// [`TaskStore::delete_task`].
    Delete,
    /// [`TaskStore::get_stats`].
    Stats,
}

/// Thread-safe in-memory task store.
///
/// Behaves like the REST backend: assigns ids and timestamps, lists newest
/// first and answers unknown ids with a `404`. Operations can be made to
/// fail to exercise client-side reconciliation.
#[derive(Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: Vec<Task>,
    failing: HashSet<StoreOperation>,
    fail_once: HashSet<StoreOperation>,
    calls: HashMap<StoreOperation, usize>,
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTaskStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InMemoryTaskStore {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store stamping tasks with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
        }
    }

    /// Stores a task directly, bypassing the port. Returns the stored task.
    pub fn seed(&self, title: &str, status: TaskStatus) -> Task {
        let task = Task::from_data(TaskData {
            id: TaskId::new(),
            title: title.to_owned(),
            description: String::new(),
            status,
            created_at: self.clock.utc(),
            updated_at: None,
        });
        self.write().tasks.insert(0, task.clone());
        task
    }

    /// Returns the stored tasks, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tasks
            .clone()
    }

    /// Makes every call of `operation` fail until [`Self::recover`].
    pub fn fail(&self, operation: StoreOperation) {
        self.write().failing.insert(operation);
    }

    /// Makes the next call of `operation` fail.
    pub fn fail_once(&self, operation: StoreOperation) {
        self.write().fail_once.insert(operation);
    }

    /// Stops scripted failures of `operation`.
    pub fn recover(&self, operation: StoreOperation) {
        let mut state = self.write();
        state.failing.remove(&operation);
        state.fail_once.remove(&operation);
    }

    /// Returns how many times `operation` has been called.
    #[must_use]
    pub fn calls(&self, operation: StoreOperation) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .get(&operation)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the total number of port calls.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .values()
            .sum()
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryStoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a call and returns the state guard, or the scripted failure.
    fn begin(
        &self,
        operation: StoreOperation,
    ) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        let mut state = self.write();
        *state.calls.entry(operation).or_default() += 1;
        let scripted = state.fail_once.remove(&operation) || state.failing.contains(&operation);
        if scripted {
            return Err(RemoteCallError::Unavailable(format!(
                "scripted failure for {operation:?}"
            )));
        }
        Ok(state)
    }
}

fn not_found(id: TaskId) -> RemoteCallError {
    RemoteCallError::api(
        404,
        Some("TASK_NOT_FOUND"),
        format!("Task with ID {id} not found"),
    )
}

fn modify(
    state: &mut InMemoryStoreState,
    id: TaskId,
    change: impl FnOnce(Task) -> Task,
) -> TaskStoreResult<Task> {
    let slot = state
        .tasks
        .iter_mut()
        .find(|task| task.id() == id)
        .ok_or_else(|| not_found(id))?;
    let updated = change(slot.clone());
    *slot = updated.clone();
    Ok(updated)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.begin(StoreOperation::List)?;
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<Task> {
        let mut state = self.begin(StoreOperation::Create)?;
        let task = Task::from_data(TaskData {
            id: TaskId::new(),
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            status: draft.status(),
            created_at: self.clock.utc(),
            updated_at: None,
        });
        state.tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> TaskStoreResult<Task> {
        let mut state = self.begin(StoreOperation::Update)?;
        let now = self.clock.utc();
        modify(&mut state, id, |task| task.with_draft(draft, now))
    }

    async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        let mut state = self.begin(StoreOperation::UpdateStatus)?;
        let now = self.clock.utc();
        modify(&mut state, id, |task| task.with_status(status).touched(now))
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.begin(StoreOperation::Delete)?;
        let index = state
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| not_found(id))?;
        state.tasks.remove(index);
        Ok(())
    }

    async fn get_stats(&self) -> TaskStoreResult<TaskCounts> {
        let state = self.begin(StoreOperation::Stats)?;
        Ok(views::aggregate_counts(&state.tasks))
    }
}
