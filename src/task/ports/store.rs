//! Remote task store port.

use crate::api::RemoteCallError;
use crate::task::domain::{Task, TaskCounts, TaskDraft, TaskId, TaskStatus};
use async_trait::async_trait;

/// Result type for task store calls.
pub type TaskStoreResult<T> = Result<T, RemoteCallError>;

/// Authoritative remote store of tasks for the signed-in user.
///
/// Implementations attach credentials and decode payloads; callers only see
/// typed tasks or a [`RemoteCallError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists all tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] when the call fails.
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Creates a task and returns it with its store-assigned id and
    /// creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] when the call fails.
    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<Task>;

    /// Replaces the editable fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] when the task is unknown or the call
    /// fails.
    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> TaskStoreResult<Task>;

    /// Changes only the status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] when the task is unknown or the call
    /// fails.
    async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] when the task is unknown or the call
    /// fails.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Returns per-status task counts computed by the store.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] when the call fails.
    async fn get_stats(&self) -> TaskStoreResult<TaskCounts>;
}
