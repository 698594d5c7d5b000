//! Adapter implementations of the authentication gateway.

pub mod http;
pub mod memory;
