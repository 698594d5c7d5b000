//! HTTP client shared by the REST adapters.

use super::envelope::{decode_data, decode_empty, error_from_body};
use super::{ClientConfig, ConfigError, RemoteCallError, RemoteResult};
use crate::auth::domain::SessionStore;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Whether a call carries the session's bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anonymous call, e.g. login or registration.
    Public,
    /// Call authorized with the current session token.
    Bearer,
}

/// REST client bound to one backend and one session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url().to_owned(),
            session,
        })
    }

    /// Returns the session store this client reads credentials from.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sends a call without a body and decodes the envelope payload.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] on transport, status or decoding failure.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        access: Access,
    ) -> RemoteResult<T> {
        let body = self.dispatch(self.request(method, path), access).await?;
        decode_data(&body)
    }

    /// Sends a call with a JSON body and decodes the envelope payload.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] on transport, status or decoding failure.
    pub async fn call_with_body<T, B>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
        access: Access,
    ) -> RemoteResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let builder = self.request(method, path).json(payload);
        let body = self.dispatch(builder, access).await?;
        decode_data(&body)
    }

    /// Sends a call whose successful response carries no payload.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteCallError`] on transport or status failure.
    pub async fn call_unit(&self, method: Method, path: &str, access: Access) -> RemoteResult<()> {
        let body = self.dispatch(self.request(method, path), access).await?;
        decode_empty(&body)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        self.client.request(method, url)
    }

    async fn dispatch(&self, builder: RequestBuilder, access: Access) -> RemoteResult<Vec<u8>> {
        let authorized = match access {
            Access::Public => builder,
            Access::Bearer => {
                let token = self.session.token().ok_or(RemoteCallError::Unauthorized)?;
                builder.bearer_auth(token)
            }
        };

        let response = authorized
            .send()
            .await
            .map_err(|err| RemoteCallError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RemoteCallError::Transport(err.to_string()))?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        if status == StatusCode::UNAUTHORIZED && access == Access::Bearer {
            if let Some(expired) = self.session.clear() {
                tracing::info!(username = %expired.username(), "session rejected by server; signed out");
            }
            return Err(RemoteCallError::Unauthorized);
        }

        let error = error_from_body(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), %error, "remote call failed");
        Err(error)
    }
}
