//! Domain types for authentication: credentials and sessions.

mod credentials;
mod session;

pub use credentials::{Credentials, registration};
pub use session::{Session, SessionStore};

use thiserror::Error;

/// Errors raised while validating login or registration input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthValidationError {
    /// The username is blank.
    #[error("Username is required")]
    EmptyUsername,

    /// The password is empty.
    #[error("Password is required")]
    EmptyPassword,

    /// The password confirmation does not match.
    #[error("Passwords do not match")]
    PasswordMismatch,
}
