//! Client configuration for the REST backend.

use super::ConfigError;
use reqwest::Url;
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "TASKBOARD_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "TASKBOARD_TIMEOUT_SECS";
/// Environment variable holding a bearer token for an existing session.
pub const TOKEN_ENV: &str = "TASKBOARD_TOKEN";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for talking to the REST backend.
///
/// # Examples
///
/// ```
/// use taskboard::api::ClientConfig;
///
/// let config = ClientConfig::new("https://tasks.example.com/api/")
///     .expect("valid URL");
/// assert_eq!(config.api_url(), "https://tasks.example.com/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    request_timeout: Duration,
    token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: DEFAULT_TIMEOUT,
            token: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given base URL with default settings.
    ///
    /// Trailing slashes are trimmed so paths can be appended directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] unless the URL is an absolute
    /// `http` or `https` URL.
    pub fn new(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_url(api_url.into())?,
            ..Self::default()
        })
    }

    /// Reads configuration from `TASKBOARD_*` environment variables, falling
    /// back to defaults for unset values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(API_URL_ENV) {
            Some(url) => Self::new(url)?,
            None => Self::default(),
        };

        if let Some(raw_timeout) = lookup(TIMEOUT_ENV) {
            config.request_timeout = parse_timeout(&raw_timeout)?;
        }

        config.token = lookup(TOKEN_ENV).filter(|token| !token.trim().is_empty());
        Ok(config)
    }

    /// Sets the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] for a zero duration.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(format!("{}", timeout.as_secs())));
        }
        self.request_timeout = timeout;
        Ok(self)
    }

    /// Sets a bearer token for an already established session.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Returns the API base URL without a trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the configured bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

fn normalize_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidUrl(raw.clone()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(raw));
    }
    Ok(trimmed.to_owned())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_owned())),
    }
}
