//! Error types for task validation, parsing and collection invariants.

use super::TaskId;
use thiserror::Error;

/// Task field that failed local validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// The task title.
    Title,
    /// The task description.
    Description,
}

impl TaskField {
    /// Returns the form field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

/// Errors raised while validating task input before any remote call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is empty after trimming.
    #[error("Title is required")]
    EmptyTitle,

    /// The title exceeds the configured character limit.
    #[error("Title must be {limit} characters or less")]
    TitleTooLong {
        /// Maximum number of characters.
        limit: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// The description exceeds the configured character limit.
    #[error("Description must be {limit} characters or less")]
    DescriptionTooLong {
        /// Maximum number of characters.
        limit: usize,
        /// Number of characters supplied.
        actual: usize,
    },
}

impl TaskValidationError {
    /// Returns the field the message should be attached to.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => TaskField::Title,
            Self::DescriptionTooLong { .. } => TaskField::Description,
        }
    }
}

/// Errors raised by primitive task collection mutators.
///
/// These indicate a local invariant violation and should not occur while the
/// synchronizer drives the collection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// A task with the same identifier is already held.
    #[error("duplicate task identifier: {0}")]
    DuplicateId(TaskId),

    /// No task with the identifier is held.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Error returned while parsing task statuses from wire or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
