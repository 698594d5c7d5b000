//! Application services for authentication.

mod authentication;

pub use authentication::{AuthError, AuthResult, AuthService};
