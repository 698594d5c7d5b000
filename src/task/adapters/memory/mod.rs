//! In-memory task store for tests and offline use.

mod store;

pub use store::{InMemoryTaskStore, StoreOperation};
