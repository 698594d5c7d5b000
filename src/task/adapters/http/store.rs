//! Task store backed by the `/tasks` REST endpoints.

use super::dto::{TaskDto, TaskRequestDto, TaskStatusRequestDto};
use crate::api::{Access, ApiClient};
use crate::task::{
    domain::{Task, TaskCounts, TaskDraft, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreResult},
};
use async_trait::async_trait;
use reqwest::Method;

/// REST task store. Every call carries the session's bearer credential.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: ApiClient,
}

impl HttpTaskStore {
    /// Creates a store using `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        tracing::debug!("listing tasks");
        let dtos: Vec<TaskDto> = self
            .client
            .call(Method::GET, "/tasks", Access::Bearer)
            .await?;
        dtos.into_iter().map(Task::try_from).collect()
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<Task> {
        tracing::debug!(title = %draft.title(), "creating task");
        let dto: TaskDto = self
            .client
            .call_with_body(
                Method::POST,
                "/tasks",
                &TaskRequestDto::from(draft),
                Access::Bearer,
            )
            .await?;
        Task::try_from(dto)
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> TaskStoreResult<Task> {
        tracing::debug!(task_id = %id, "updating task");
        let dto: TaskDto = self
            .client
            .call_with_body(
                Method::PUT,
                &format!("/tasks/{id}"),
                &TaskRequestDto::from(draft),
                Access::Bearer,
            )
            .await?;
        Task::try_from(dto)
    }

    async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        tracing::debug!(task_id = %id, %status, "updating task status");
        let dto: TaskDto = self
            .client
            .call_with_body(
                Method::PATCH,
                &format!("/tasks/{id}/status"),
                &TaskStatusRequestDto { status },
                Access::Bearer,
            )
            .await?;
        Task::try_from(dto)
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        tracing::debug!(task_id = %id, "deleting task");
        self.client
            .call_unit(Method::DELETE, &format!("/tasks/{id}"), Access::Bearer)
            .await
    }

    async fn get_stats(&self) -> TaskStoreResult<TaskCounts> {
        self.client
            .call(Method::GET, "/tasks/stats", Access::Bearer)
            .await
    }
}
