//! Raw task input as entered by the user.

use crate::task::domain::{Task, TaskDraft, TaskFieldLimits, TaskStatus, TaskValidationError};

/// Unvalidated task fields for create and edit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    title: String,
    description: String,
    status: TaskStatus,
}

impl TaskRequest {
    /// Creates a request with a title, an empty description and `TODO`
    /// status.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
        }
    }

    /// Pre-fills an edit request from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when a field violates `limits`.
    pub fn into_draft(self, limits: &TaskFieldLimits) -> Result<TaskDraft, TaskValidationError> {
        TaskDraft::new(self.title, self.description, self.status, limits)
    }
}
