//! In-memory authentication gateway for tests and offline use.

use crate::api::{RemoteCallError, RemoteResult};
use crate::auth::{
    domain::{Credentials, Session},
    ports::AuthGateway,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Gateway that keeps registered users in memory and issues random tokens.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthGateway {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryAuthGateway {
    /// Creates a gateway with no registered users.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(username: &str) -> Session {
        Session::new(username, format!("mem-{}", Uuid::new_v4()))
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn login(&self, credentials: &Credentials) -> RemoteResult<Session> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        match users.get(credentials.username()) {
            Some(password) if password == credentials.password() => {
                Ok(Self::issue(credentials.username()))
            }
            _ => Err(RemoteCallError::api(
                401,
                Some("INVALID_CREDENTIALS"),
                "Invalid username or password",
            )),
        }
    }

    async fn register(&self, credentials: &Credentials) -> RemoteResult<Session> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(credentials.username()) {
            return Err(RemoteCallError::api(
                409,
                Some("USERNAME_EXISTS"),
                format!("Username '{}' already exists", credentials.username()),
            ));
        }
        users.insert(
            credentials.username().to_owned(),
            credentials.password().to_owned(),
        );
        Ok(Self::issue(credentials.username()))
    }
}
