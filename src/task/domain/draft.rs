//! Validated task payloads for create and update calls.

use super::{TaskStatus, TaskValidationError};

/// Character limits applied to task fields before they reach the store.
///
/// # Examples
///
/// ```
/// use taskboard::task::domain::TaskFieldLimits;
///
/// let limits = TaskFieldLimits::default();
/// assert_eq!(limits.max_title_chars, 100);
/// assert_eq!(limits.max_description_chars, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFieldLimits {
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum description length in characters.
    pub max_description_chars: usize,
}

impl Default for TaskFieldLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 100,
            max_description_chars: 500,
        }
    }
}

/// Task fields that passed local validation.
///
/// A draft carries no identifier: the store assigns one on create, and the
/// caller names the target task separately on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    status: TaskStatus,
}

impl TaskDraft {
    /// Validates raw task fields against the given limits.
    ///
    /// The title is checked for emptiness after trimming but is kept as
    /// entered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] for a blank title,
    /// [`TaskValidationError::TitleTooLong`] or
    /// [`TaskValidationError::DescriptionTooLong`] when a field exceeds its
    /// limit.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
        limits: &TaskFieldLimits,
    ) -> Result<Self, TaskValidationError> {
        let title_value = title.into();
        let description_value = description.into();

        if title_value.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }

        let title_chars = title_value.chars().count();
        if title_chars > limits.max_title_chars {
            return Err(TaskValidationError::TitleTooLong {
                limit: limits.max_title_chars,
                actual: title_chars,
            });
        }

        let description_chars = description_value.chars().count();
        if description_chars > limits.max_description_chars {
            return Err(TaskValidationError::DescriptionTooLong {
                limit: limits.max_description_chars,
                actual: description_chars,
            });
        }

        Ok(Self {
            title: title_value,
            description: description_value,
            status,
        })
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the requested status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }
}
