//! Login, registration and logout against an [`AuthGateway`].

use crate::api::RemoteCallError;
use crate::auth::{
    domain::{AuthValidationError, Credentials, Session, SessionStore, registration},
    ports::AuthGateway,
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed local validation; no call was made.
    #[error(transparent)]
    Validation(#[from] AuthValidationError),

    /// The server refused the request with a message for the user.
    #[error("{0}")]
    Rejected(String),

    /// The call failed without a server message.
    #[error(transparent)]
    Remote(RemoteCallError),
}

impl From<RemoteCallError> for AuthError {
    fn from(err: RemoteCallError) -> Self {
        match err.server_message() {
            Some(message) => Self::Rejected(message.to_owned()),
            None => Self::Remote(err),
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Issues sessions and records them in the shared [`SessionStore`].
#[derive(Clone)]
pub struct AuthService<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
    sessions: SessionStore,
}

impl<G> AuthService<G>
where
    G: AuthGateway,
{
    /// Creates a service writing sessions into `sessions`.
    #[must_use]
    pub const fn new(gateway: Arc<G>, sessions: SessionStore) -> Self {
        Self { gateway, sessions }
    }

    /// Signs in and stores the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for blank input, otherwise the
    /// gateway failure.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<Session> {
        let credentials = Credentials::new(username, password)?;
        let session = self.gateway.login(&credentials).await?;
        self.sessions.set(session.clone());
        tracing::info!(username = %session.username(), "signed in");
        Ok(session)
    }

    /// Registers a user, checking the password confirmation locally first,
    /// and stores the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for blank input or a mismatched
    /// confirmation, otherwise the gateway failure.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> AuthResult<Session> {
        let credentials = registration(username, password, confirmation)?;
        let session = self.gateway.register(&credentials).await?;
        self.sessions.set(session.clone());
        tracing::info!(username = %session.username(), "registered and signed in");
        Ok(session)
    }

    /// Clears the current session, returning it.
    pub fn logout(&self) -> Option<Session> {
        let ended = self.sessions.clear();
        if let Some(session) = &ended {
            tracing::info!(username = %session.username(), "signed out");
        }
        ended
    }

    /// Returns the signed-in username, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        self.sessions
            .current()
            .map(|session| session.username().to_owned())
    }

    /// Returns the session store this service writes to.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
