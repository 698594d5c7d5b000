//! Errors, banners and settlement markers reported by the synchronizer.

use crate::api::RemoteCallError;
use crate::task::domain::{CollectionError, TaskValidationError};
use thiserror::Error;

/// User-initiated operation, used to pick the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Loading the task collection.
    Load,
    /// Creating a task.
    Create,
    /// Editing a task's fields.
    Update,
    /// Changing a task's status from a menu or by a board move.
    StatusChange,
    /// Deleting a task.
    Delete,
    /// Loading server statistics.
    Stats,
}

impl MutationKind {
    /// Returns the static message shown when the operation fails remotely.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Load => "Failed to load tasks",
            Self::Create => "Failed to create task",
            Self::Update => "Failed to update task",
            Self::StatusChange => "Failed to update task status",
            Self::Delete => "Failed to delete task",
            Self::Stats => "Failed to load statistics",
        }
    }
}

/// The single, dismissible error shown after a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncBanner {
    kind: MutationKind,
}

impl SyncBanner {
    /// Creates the banner for a failed operation.
    #[must_use]
    pub const fn new(kind: MutationKind) -> Self {
        Self { kind }
    }

    /// Returns the operation that failed.
    #[must_use]
    pub const fn kind(self) -> MutationKind {
        self.kind
    }

    /// Returns the message to display.
    #[must_use]
    pub const fn message(self) -> &'static str {
        self.kind.failure_message()
    }
}

impl std::fmt::Display for SyncBanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors returned by synchronizer operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Input failed local validation; nothing was sent or changed.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The local collection rejected the operation.
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// The remote store call failed.
    #[error("{}: {source}", .kind.failure_message())]
    Remote {
        /// Operation that failed.
        kind: MutationKind,
        /// Underlying store failure.
        source: RemoteCallError,
    },
}

/// Result type for synchronizer operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// How a remote call's response was reconciled with local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement<T> {
    /// The response was applied.
    Applied(T),
    /// A later call for the same task (or a later load) was issued before
    /// this response arrived, so the response was discarded.
    Superseded,
}

impl<T> Settlement<T> {
    /// Returns the applied value, if any.
    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Superseded => None,
        }
    }

    /// Returns `true` when the response was discarded.
    #[must_use]
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}
