//! REST adapter for the task store port.

mod dto;
mod store;

pub use dto::{TaskDto, parse_timestamp};
pub use store::HttpTaskStore;
