//! Authentication and session management.
//!
//! Replaces ambient token storage with an explicit [`domain::SessionStore`]
//! that is handed to every adapter issuing remote calls. The layout follows
//! the task context:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
