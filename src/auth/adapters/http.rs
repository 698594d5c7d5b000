//! REST implementation of the authentication gateway.

use crate::api::{Access, ApiClient, RemoteResult};
use crate::auth::{
    domain::{Credentials, Session},
    ports::AuthGateway,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AuthRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for AuthRequestDto<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: credentials.username(),
            password: credentials.password(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponseDto {
    token: String,
    username: String,
}

/// Authentication gateway backed by `/auth/login` and `/auth/register`.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    /// Creates a gateway using `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn exchange(&self, path: &str, credentials: &Credentials) -> RemoteResult<Session> {
        let response: AuthResponseDto = self
            .client
            .call_with_body(
                Method::POST,
                path,
                &AuthRequestDto::from(credentials),
                Access::Public,
            )
            .await?;
        Ok(Session::new(response.username, response.token))
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> RemoteResult<Session> {
        self.exchange("/auth/login", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> RemoteResult<Session> {
        self.exchange("/auth/register", credentials).await
    }
}
