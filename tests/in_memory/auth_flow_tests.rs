//! In-memory integration tests for the authentication flow.

use std::sync::Arc;

use eyre::{Result, ensure};
use rstest::{fixture, rstest};
use taskboard::auth::{
    adapters::memory::InMemoryAuthGateway,
    domain::{AuthValidationError, SessionStore},
    services::{AuthError, AuthService},
};

type MemoryAuth = AuthService<InMemoryAuthGateway>;

#[fixture]
fn auth() -> MemoryAuth {
    AuthService::new(Arc::new(InMemoryAuthGateway::new()), SessionStore::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sessions_are_shared_with_clones_of_the_store(auth: MemoryAuth) -> Result<()> {
    let observer = auth.sessions().clone();

    let session = auth.register("carol", "s3cret", "s3cret").await?;

    ensure!(observer.token().as_deref() == Some(session.token()));
    ensure!(auth.logout().is_some());
    ensure!(!observer.is_authenticated());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_keeps_user_signed_out(auth: MemoryAuth) -> Result<()> {
    auth.register("dave", "right", "right").await?;
    let _ended = auth.logout();

    let result = auth.login("dave", "wrong").await;

    ensure!(matches!(result, Err(AuthError::Rejected(_))));
    ensure!(auth.current_user().is_none());
    Ok(())
}

#[rstest]
#[case("", "pw", "pw", AuthValidationError::EmptyUsername)]
#[case("erin", "", "", AuthValidationError::EmptyPassword)]
#[case("erin", "pw", "other", AuthValidationError::PasswordMismatch)]
#[tokio::test(flavor = "multi_thread")]
async fn registration_input_is_checked_locally(
    auth: MemoryAuth,
    #[case] username: &str,
    #[case] password: &str,
    #[case] confirmation: &str,
    #[case] expected: AuthValidationError,
) -> Result<()> {
    let result = auth.register(username, password, confirmation).await;

    ensure!(
        matches!(&result, Err(AuthError::Validation(found)) if *found == expected),
        "unexpected result {result:?}"
    );
    ensure!(!auth.sessions().is_authenticated());
    Ok(())
}
