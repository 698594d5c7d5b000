//! Gateway port for issuing sessions.

use crate::api::RemoteResult;
use crate::auth::domain::{Credentials, Session};
use async_trait::async_trait;

/// Remote authority that exchanges credentials for a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Signs in an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::RemoteCallError`] when the credentials are
    /// rejected or the call fails.
    async fn login(&self, credentials: &Credentials) -> RemoteResult<Session>;

    /// Creates a user and signs them in.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::RemoteCallError`] when the username is taken or
    /// the call fails.
    async fn register(&self, credentials: &Credentials) -> RemoteResult<Session>;
}
