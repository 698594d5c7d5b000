//! Adapter implementations of the task store port.

pub mod http;
pub mod memory;
