//! Optimistic synchronization of the local task collection with a
//! [`TaskStore`].
//!
//! Every remote call is stamped with a sequence number drawn from one
//! counter. Calls that touch a task record their number against the task's
//! id, and a response is applied only while its number is still the latest
//! for that task. Loads are tracked the same way against a single slot, so
//! the most recently issued load wins. Superseded responses are dropped
//! without touching local state or the banner.
//!
//! A task whose local record carries an unconfirmed cross-column move is
//! held in the `unconfirmed` set. Failures on such a task, and failed move
//! responses that were overtaken by a later call, reconcile by reloading
//! from the store rather than by restoring the local record.

use super::{MutationKind, Settlement, SyncBanner, SyncError, SyncResult, TaskRequest};
use crate::api::RemoteCallError;
use crate::task::{
    domain::{
        CollectionError, StatusFilter, StatusGroups, Task, TaskCollection, TaskCounts,
        TaskFieldLimits, TaskId, TaskStatus, views,
    },
    ports::{TaskStore, TaskStoreResult},
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Keeps a local, optimistically updated copy of the user's tasks in step
/// with a remote store.
pub struct TaskSynchronizer<S: TaskStore> {
    store: Arc<S>,
    limits: TaskFieldLimits,
    state: Mutex<SyncState>,
}

#[derive(Debug, Default)]
struct SyncState {
    collection: TaskCollection,
    loaded: bool,
    banner: Option<SyncBanner>,
    next_sequence: u64,
    latest_load: u64,
    latest_by_task: HashMap<TaskId, u64>,
    unconfirmed: HashSet<TaskId>,
}

impl SyncState {
    const fn issue(&mut self) -> u64 {
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.next_sequence
    }

    fn issue_for(&mut self, id: TaskId) -> u64 {
        let sequence = self.issue();
        self.latest_by_task.insert(id, sequence);
        sequence
    }

    fn is_latest_for(&self, id: TaskId, sequence: u64) -> bool {
        self.latest_by_task.get(&id) == Some(&sequence)
    }

    fn fail(&mut self, kind: MutationKind, source: RemoteCallError) -> SyncError {
        tracing::warn!(operation = ?kind, error = %source, "task sync failed");
        self.banner = Some(SyncBanner::new(kind));
        SyncError::Remote { kind, source }
    }

    /// Overwrites the record for a task that is still held locally.
    fn adopt(&mut self, task: Task) -> Result<(), CollectionError> {
        let id = task.id();
        if self.collection.contains(id) {
            self.collection.replace_by_id(id, task)?;
        }
        Ok(())
    }

    /// Drops every trace of a task the store has confirmed deleted.
    fn forget(&mut self, id: TaskId) -> Result<(), CollectionError> {
        self.latest_by_task.remove(&id);
        self.unconfirmed.remove(&id);
        if self.collection.contains(id) {
            self.collection.remove_by_id(id)?;
        }
        Ok(())
    }

    /// Puts a removed task back at `index` unless a newer response already
    /// restored it.
    fn restore(&mut self, index: usize, task: Task) -> Result<(), CollectionError> {
        if !self.collection.contains(task.id()) {
            self.collection.insert_at(index, task)?;
        }
        Ok(())
    }

    /// Installs a store listing taken at `sequence`.
    ///
    /// Tasks touched by calls issued after the listing keep their local
    /// record, including tasks created or deleted since.
    fn install_listing(&mut self, listing: Vec<Task>, sequence: u64) -> Result<(), CollectionError> {
        let newer: HashSet<TaskId> = self
            .latest_by_task
            .iter()
            .filter(|(_, issued)| **issued > sequence)
            .map(|(id, _)| *id)
            .collect();

        let listed: HashSet<TaskId> = listing.iter().map(Task::id).collect();
        let mut merged: Vec<Task> = self
            .collection
            .iter()
            .filter(|task| newer.contains(&task.id()) && !listed.contains(&task.id()))
            .cloned()
            .collect();

        for task in listing {
            if newer.contains(&task.id()) {
                if let Some(local) = self.collection.get(task.id()) {
                    merged.push(local.clone());
                }
            } else {
                merged.push(task);
            }
        }

        self.collection.replace_all(merged)?;
        self.unconfirmed.retain(|id| newer.contains(id));
        let collection = &self.collection;
        self.latest_by_task
            .retain(|id, issued| *issued > sequence || collection.contains(*id));
        self.loaded = true;
        Ok(())
    }
}

enum MovePlan {
    Reordered(Task),
    Crossing { sequence: u64 },
}

/// A settled response, and whether local state must be reloaded before
/// the caller sees it.
enum Settled<T> {
    Done(SyncResult<Settlement<T>>),
    Reconcile(SyncResult<Settlement<T>>),
}

struct PendingDelete {
    sequence: u64,
    index: usize,
    removed: Task,
}

impl<S: TaskStore> TaskSynchronizer<S> {
    /// Creates a synchronizer over `store` with default field limits.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            limits: TaskFieldLimits::default(),
            state: Mutex::new(SyncState::default()),
        }
    }

    /// Replaces the field limits used to validate requests.
    #[must_use]
    pub const fn with_limits(mut self, limits: TaskFieldLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the field limits used to validate requests.
    #[must_use]
    pub const fn limits(&self) -> &TaskFieldLimits {
        &self.limits
    }

    /// Replaces the local collection with the store's listing and clears
    /// the banner.
    ///
    /// Returns the number of tasks installed, or
    /// [`Settlement::Superseded`] when a later load was issued meanwhile.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the listing fails; the local
    /// collection is kept.
    pub async fn refresh(&self) -> SyncResult<Settlement<usize>> {
        self.reload(true).await
    }

    async fn reload(&self, clear_banner: bool) -> SyncResult<Settlement<usize>> {
        let sequence = {
            let mut state = self.lock();
            let issued = state.issue();
            state.latest_load = issued;
            issued
        };
        tracing::debug!(sequence, "loading tasks");

        let result = self.store.list_tasks().await;
        self.settle_load(sequence, clear_banner, result)
    }

    fn settle_load(
        &self,
        sequence: u64,
        clear_banner: bool,
        result: TaskStoreResult<Vec<Task>>,
    ) -> SyncResult<Settlement<usize>> {
        let mut state = self.lock();
        if state.latest_load != sequence {
            tracing::debug!(sequence, "discarding superseded task listing");
            return Ok(Settlement::Superseded);
        }

        match result {
            Ok(listing) => {
                state.install_listing(listing, sequence)?;
                if clear_banner {
                    state.banner = None;
                }
                let installed = state.collection.len();
                tracing::debug!(sequence, installed, "task listing installed");
                Ok(Settlement::Applied(installed))
            }
            Err(source) => Err(state.fail(MutationKind::Load, source)),
        }
    }

    /// Validates `request`, creates the task remotely and inserts the
    /// server's record at the front of the collection.
    ///
    /// Nothing is shown locally until the store confirms the creation.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] without contacting the store when a
    /// field is invalid, or [`SyncError::Remote`] when creation fails.
    pub async fn create_task(&self, request: TaskRequest) -> SyncResult<Task> {
        let draft = request.into_draft(&self.limits)?;
        let result = self.store.create_task(&draft).await;
        self.settle_create(result)
    }

    fn settle_create(&self, result: TaskStoreResult<Task>) -> SyncResult<Task> {
        let mut state = self.lock();
        match result {
            Ok(task) => {
                state.issue_for(task.id());
                if state.collection.contains(task.id()) {
                    state.collection.replace_by_id(task.id(), task.clone())?;
                } else {
                    state.collection.insert(task.clone())?;
                }
                tracing::info!(task_id = %task.id(), "task created");
                Ok(task)
            }
            Err(source) => Err(state.fail(MutationKind::Create, source)),
        }
    }

    /// Validates `request` and replaces the task's fields remotely, then
    /// adopts the server's record in place.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] or [`SyncError::Collection`]
    /// without contacting the store when the input is invalid or the task is
    /// not held locally, or [`SyncError::Remote`] when the update fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: TaskRequest,
    ) -> SyncResult<Settlement<Task>> {
        let draft = request.into_draft(&self.limits)?;
        let sequence = self.begin_for(id)?;
        let result = self.store.update_task(id, &draft).await;
        let settled = self.settle_replacement(id, sequence, MutationKind::Update, result);
        self.finish(id, settled).await
    }

    /// Sets a task's status remotely, then adopts the server's record in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Collection`] without contacting the store when
    /// the task is not held locally, or [`SyncError::Remote`] when the
    /// update fails.
    pub async fn change_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> SyncResult<Settlement<Task>> {
        let sequence = self.begin_for(id)?;
        let result = self.store.update_task_status(id, status).await;
        let settled = self.settle_replacement(id, sequence, MutationKind::StatusChange, result);
        self.finish(id, settled).await
    }

    fn begin_for(&self, id: TaskId) -> Result<u64, CollectionError> {
        let mut state = self.lock();
        if !state.collection.contains(id) {
            return Err(CollectionError::NotFound(id));
        }
        Ok(state.issue_for(id))
    }

    fn settle_replacement(
        &self,
        id: TaskId,
        sequence: u64,
        kind: MutationKind,
        result: TaskStoreResult<Task>,
    ) -> Settled<Task> {
        let mut state = self.lock();
        if !state.is_latest_for(id, sequence) {
            tracing::debug!(task_id = %id, sequence, operation = ?kind, "discarding superseded response");
            return Settled::Done(Ok(Settlement::Superseded));
        }

        match result {
            Ok(task) => {
                state.unconfirmed.remove(&id);
                Settled::Done(
                    state
                        .adopt(task.clone())
                        .map(|()| Settlement::Applied(task))
                        .map_err(SyncError::from),
                )
            }
            Err(source) => {
                let error = state.fail(kind, source);
                if state.unconfirmed.contains(&id) {
                    Settled::Reconcile(Err(error))
                } else {
                    Settled::Done(Err(error))
                }
            }
        }
    }

    /// Reloads the collection when a settled response left the task's local
    /// record unreliable. A failed reload is logged and leaves the
    /// settlement unchanged.
    async fn finish<T>(&self, id: TaskId, settled: Settled<T>) -> SyncResult<Settlement<T>> {
        match settled {
            Settled::Done(result) => result,
            Settled::Reconcile(result) => {
                if let Err(reload_error) = self.reload(false).await {
                    tracing::warn!(task_id = %id, error = %reload_error, "reconciliation reload failed");
                }
                result
            }
        }
    }

    /// Moves a task to `dest_index` within the `dest_status` column.
    ///
    /// A move inside one column only reorders the local collection. A move
    /// across columns is applied locally first and then sent to the store
    /// as a status change. If that call fails the banner is raised and the
    /// collection is reloaded from the store, which restores the task's
    /// server-side status. A failed response that a later call on the task
    /// has overtaken still triggers the reload, without raising the banner.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Collection`] when the task is not held locally,
    /// or [`SyncError::Remote`] when the status change fails.
    pub async fn move_task(
        &self,
        id: TaskId,
        dest_status: TaskStatus,
        dest_index: usize,
    ) -> SyncResult<Settlement<Task>> {
        let sequence = match self.begin_move(id, dest_status, dest_index)? {
            MovePlan::Reordered(task) => return Ok(Settlement::Applied(task)),
            MovePlan::Crossing { sequence } => sequence,
        };

        let result = self.store.update_task_status(id, dest_status).await;
        let settled = self.settle_move(id, sequence, result);
        self.finish(id, settled).await
    }

    fn begin_move(
        &self,
        id: TaskId,
        dest_status: TaskStatus,
        dest_index: usize,
    ) -> Result<MovePlan, CollectionError> {
        let mut state = self.lock();
        let source_status = state
            .collection
            .get(id)
            .map(Task::status)
            .ok_or(CollectionError::NotFound(id))?;
        let moved = state
            .collection
            .move_within_group(id, dest_status, dest_index)?;

        if source_status == dest_status {
            tracing::debug!(task_id = %id, dest_index, "task reordered locally");
            return Ok(MovePlan::Reordered(moved));
        }

        let sequence = state.issue_for(id);
        state.unconfirmed.insert(id);
        tracing::debug!(task_id = %id, from = %source_status, to = %dest_status, sequence, "task moved optimistically");
        Ok(MovePlan::Crossing { sequence })
    }

    fn settle_move(
        &self,
        id: TaskId,
        sequence: u64,
        result: TaskStoreResult<Task>,
    ) -> Settled<Task> {
        let mut state = self.lock();
        if !state.is_latest_for(id, sequence) {
            if let Err(source) = &result {
                tracing::debug!(task_id = %id, sequence, error = %source, "superseded move failed, reconciling");
                return Settled::Reconcile(Ok(Settlement::Superseded));
            }
            tracing::debug!(task_id = %id, sequence, "discarding superseded move response");
            return Settled::Done(Ok(Settlement::Superseded));
        }

        match result {
            Ok(task) => {
                state.unconfirmed.remove(&id);
                Settled::Done(
                    state
                        .adopt(task.clone())
                        .map(|()| Settlement::Applied(task))
                        .map_err(SyncError::from),
                )
            }
            Err(source) => {
                Settled::Reconcile(Err(state.fail(MutationKind::StatusChange, source)))
            }
        }
    }

    /// Removes a task locally, then deletes it remotely.
    ///
    /// When the remote delete fails the task is put back at its former
    /// position and the banner is raised. If the removed record carried an
    /// unconfirmed move, the collection is reloaded instead. Returns the
    /// removed task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Collection`] without contacting the store when
    /// the task is not held locally, or [`SyncError::Remote`] when the
    /// delete fails.
    pub async fn delete_task(&self, id: TaskId) -> SyncResult<Settlement<Task>> {
        let pending = self.begin_delete(id)?;
        let result = self.store.delete_task(id).await;
        let settled = self.settle_delete(id, pending, result);
        self.finish(id, settled).await
    }

    fn begin_delete(&self, id: TaskId) -> Result<PendingDelete, CollectionError> {
        let mut state = self.lock();
        let index = state
            .collection
            .position(id)
            .ok_or(CollectionError::NotFound(id))?;
        let removed = state.collection.remove_by_id(id)?;
        let sequence = state.issue_for(id);
        Ok(PendingDelete {
            sequence,
            index,
            removed,
        })
    }

    fn settle_delete(
        &self,
        id: TaskId,
        pending: PendingDelete,
        result: TaskStoreResult<()>,
    ) -> Settled<Task> {
        let mut state = self.lock();
        if !state.is_latest_for(id, pending.sequence) {
            tracing::debug!(task_id = %id, sequence = pending.sequence, "discarding superseded delete response");
            return Settled::Done(Ok(Settlement::Superseded));
        }

        match result {
            Ok(()) => {
                tracing::info!(task_id = %id, "task deleted");
                Settled::Done(
                    state
                        .forget(id)
                        .map(|()| Settlement::Applied(pending.removed))
                        .map_err(SyncError::from),
                )
            }
            Err(source) => {
                let error = state.fail(MutationKind::Delete, source);
                if state.unconfirmed.contains(&id) {
                    return Settled::Reconcile(Err(error));
                }
                let restored = state
                    .restore(pending.index, pending.removed)
                    .map_err(SyncError::from);
                Settled::Done(restored.and(Err(error)))
            }
        }
    }

    /// Fetches the server's status counts.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the call fails.
    pub async fn load_stats(&self) -> SyncResult<TaskCounts> {
        match self.store.get_stats().await {
            Ok(counts) => Ok(counts),
            Err(source) => Err(self.lock().fail(MutationKind::Stats, source)),
        }
    }

    /// Returns a snapshot of the local collection.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().collection.as_slice().to_vec()
    }

    /// Returns the local record for `id`.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.lock().collection.get(id).cloned()
    }

    /// Returns the local tasks passing `filter`, in collection order.
    #[must_use]
    pub fn filtered(&self, filter: StatusFilter) -> Vec<Task> {
        views::filter_by_status(self.lock().collection.as_slice(), filter)
    }

    /// Returns the local tasks grouped into board columns.
    #[must_use]
    pub fn board(&self) -> StatusGroups {
        views::group_by_status(self.lock().collection.as_slice())
    }

    /// Returns status counts computed from the local collection.
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        views::aggregate_counts(self.lock().collection.as_slice())
    }

    /// Returns the current error banner.
    #[must_use]
    pub fn banner(&self) -> Option<SyncBanner> {
        self.lock().banner
    }

    /// Clears the error banner.
    pub fn dismiss_error(&self) {
        self.lock().banner = None;
    }

    /// Returns `true` once a listing has been installed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.lock().loaded
    }

    /// Number of tasks with a recorded call sequence.
    #[cfg(test)]
    pub(crate) fn tracked_task_count(&self) -> usize {
        self.lock().latest_by_task.len()
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: TaskStore> std::fmt::Debug for TaskSynchronizer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("TaskSynchronizer")
            .field("limits", &self.limits)
            .field("tasks", &state.collection.len())
            .field("loaded", &state.loaded)
            .field("banner", &state.banner)
            .finish_non_exhaustive()
    }
}
