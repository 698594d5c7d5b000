//! Task state synchronization for Taskboard.
//!
//! This module keeps a local, ordered collection of the user's tasks in step
//! with the remote task store. Edits are applied optimistically where the
//! board calls for it, failed calls raise a single dismissible banner, and
//! responses that arrive after a newer call for the same task are dropped.
//! The module follows hexagonal architecture:
//!
//! - Domain types and pure views in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
