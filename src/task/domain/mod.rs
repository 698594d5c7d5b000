//! Domain model for task state synchronization.
//!
//! The task domain holds the task entity, validated drafts, the ordered
//! task collection and the pure view projections derived from it. Nothing
//! here performs I/O.

mod collection;
mod draft;
mod error;
mod ids;
mod task;
pub mod views;

pub use collection::TaskCollection;
pub use draft::{TaskDraft, TaskFieldLimits};
pub use error::{CollectionError, ParseTaskStatusError, TaskField, TaskValidationError};
pub use ids::TaskId;
pub use task::{Task, TaskData, TaskStatus};
pub use views::{StatusFilter, StatusGroups, TaskCounts};
