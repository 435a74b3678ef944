//! Service tests for the session lifecycle.

use std::sync::Arc;

use crate::document::adapters::memory::InMemoryDocumentStore;
use crate::identity::{
    adapters::memory::InMemoryAuthenticator,
    domain::{UserPatch, UserRole},
    ports::AuthenticatorError,
    services::{SessionError, SessionEvent, SessionService, SignUpRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestSession = SessionService<InMemoryDocumentStore, InMemoryAuthenticator, DefaultClock>;

#[fixture]
fn session() -> TestSession {
    SessionService::new(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(InMemoryAuthenticator::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_up_applies_registration_defaults(session: TestSession) {
    let account = session
        .sign_up(SignUpRequest::new("ada@example.com", "hunter22", "Ada"))
        .await
        .expect("registration should succeed");

    assert_eq!(account.email().as_str(), "ada@example.com");
    assert_eq!(account.role(), UserRole::Developer);
    assert!(account.team_id().is_none());
    assert!(session.is_authenticated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_registration_is_rejected_and_recorded(session: TestSession) {
    session
        .sign_up(SignUpRequest::new("ada@example.com", "hunter22", "Ada"))
        .await
        .expect("first registration should succeed");

    let result = session
        .sign_up(SignUpRequest::new("ada@example.com", "hunter23", "Imposter"))
        .await;

    assert!(matches!(
        result,
        Err(SessionError::Authenticator(
            AuthenticatorError::DuplicateAccount(_)
        ))
    ));
    assert!(session.last_error().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_with_wrong_password_fails(session: TestSession) {
    session
        .sign_up(SignUpRequest::new("ada@example.com", "hunter22", "Ada"))
        .await
        .expect("registration should succeed");
    session.sign_out().await.expect("sign out should succeed");

    let result = session.sign_in("ada@example.com", "wrong-password").await;

    assert!(matches!(
        result,
        Err(SessionError::Authenticator(
            AuthenticatorError::InvalidCredentials
        ))
    ));
    assert!(!session.is_authenticated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_restores_the_registered_account(session: TestSession) {
    let registered = session
        .sign_up(SignUpRequest::new("ada@example.com", "hunter22", "Ada"))
        .await
        .expect("registration should succeed");
    session.sign_out().await.expect("sign out should succeed");
    assert!(!session.is_authenticated());

    let restored = session
        .sign_in("ada@example.com", "hunter22")
        .await
        .expect("sign in should succeed");

    assert_eq!(restored, registered);
    assert_eq!(session.current_user(), Some(restored));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn short_password_is_rejected_at_registration(session: TestSession) {
    let result = session
        .sign_up(SignUpRequest::new("ada@example.com", "tiny", "Ada"))
        .await;

    assert!(matches!(
        result,
        Err(SessionError::Authenticator(
            AuthenticatorError::WeakPassword { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_without_session_fails(session: TestSession) {
    let result = session
        .update_user(UserPatch::new().with_name("Nobody"))
        .await;
    assert!(matches!(result, Err(SessionError::NotSignedIn)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_merges_into_session_and_survives_sign_in(session: TestSession) {
    session
        .sign_up(SignUpRequest::new("ada@example.com", "hunter22", "Ada"))
        .await
        .expect("registration should succeed");

    let updated = session
        .update_user(
            UserPatch::new()
                .with_name("Ada Lovelace")
                .with_role(UserRole::ProjectManager),
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.name(), "Ada Lovelace");
    assert_eq!(updated.role(), UserRole::ProjectManager);

    session.sign_out().await.expect("sign out should succeed");
    let restored = session
        .sign_in("ada@example.com", "hunter22")
        .await
        .expect("sign in should succeed");
    assert_eq!(restored.name(), "Ada Lovelace");
    assert_eq!(restored.role(), UserRole::ProjectManager);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn session_changes_notify_subscribers(session: TestSession) {
    let mut events = session.subscribe();

    let account = session
        .sign_up(SignUpRequest::new("ada@example.com", "hunter22", "Ada"))
        .await
        .expect("registration should succeed");
    session.sign_out().await.expect("sign out should succeed");

    assert_eq!(
        events.recv().await.expect("signed-in event"),
        SessionEvent::SignedIn(account.id())
    );
    assert_eq!(
        events.recv().await.expect("signed-out event"),
        SessionEvent::SignedOut(account.id())
    );
}
