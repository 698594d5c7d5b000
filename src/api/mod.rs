//! Shared plumbing for talking to the REST backend.
//!
//! - [`ClientConfig`]: base URL, timeout and optional pre-issued token
//! - [`ApiClient`]: `reqwest` client that attaches the session's bearer
//!   credential and invalidates the session on `401`
//! - [`envelope`]: typed decoding of the `{ success, data, error }` wrapper
//! - [`RemoteCallError`]: the error every port reports

mod client;
mod config;
pub mod envelope;
mod error;

pub use client::{Access, ApiClient};
pub use config::{
    API_URL_ENV, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT, TIMEOUT_ENV, TOKEN_ENV,
};
pub use error::{ConfigError, RemoteCallError, RemoteResult};
