//! Application services for task state synchronization.

mod outcome;
mod request;
mod synchronizer;

pub use outcome::{MutationKind, Settlement, SyncBanner, SyncError, SyncResult};
pub use request::TaskRequest;
pub use synchronizer::TaskSynchronizer;
