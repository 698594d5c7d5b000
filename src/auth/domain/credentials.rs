//! Validated login and registration input.

use super::AuthValidationError;

/// Username and password that passed local validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Validates login input. The username is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthValidationError::EmptyUsername`] or
    /// [`AuthValidationError::EmptyPassword`] for blank fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, AuthValidationError> {
        let raw_username = username.into();
        let password_value = password.into();

        let trimmed = raw_username.trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::EmptyUsername);
        }
        if password_value.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }

        Ok(Self {
            username: trimmed.to_owned(),
            password: password_value,
        })
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validates registration input, including the password confirmation.
///
/// # Errors
///
/// Returns the [`Credentials::new`] errors, or
/// [`AuthValidationError::PasswordMismatch`] when `confirmation` differs from
/// `password`.
pub fn registration(
    username: impl Into<String>,
    password: impl Into<String>,
    confirmation: &str,
) -> Result<Credentials, AuthValidationError> {
    let credentials = Credentials::new(username, password)?;
    if credentials.password != confirmation {
        return Err(AuthValidationError::PasswordMismatch);
    }
    Ok(credentials)
}
