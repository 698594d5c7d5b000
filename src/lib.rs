//! Taskboard: a client-side task board kept in sync with a REST task store.
//!
//! The crate holds the signed-in user's tasks locally, applies edits
//! optimistically and reconciles with the remote store when a call fails or
//! its response arrives late.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task and session types with no I/O
//! - **Ports**: Abstract trait interfaces for the remote store and auth API
//! - **Adapters**: REST and in-memory implementations of the ports
//!
//! # Modules
//!
//! - [`api`]: REST client, response envelope and remote call errors
//! - [`auth`]: Login, registration and the shared session store
//! - [`task`]: Task domain, store port and the synchronizer

pub mod api;
pub mod auth;
pub mod task;
