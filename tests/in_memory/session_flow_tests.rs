//! Session integration tests against stored user records.

use super::helpers::{Stack, stack};
use quadro::identity::{
    domain::{UserPatch, UserRole},
    services::SignUpRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_registered_user_is_present_until_sign_out(stack: Stack) {
    assert!(!stack.session.is_authenticated());

    stack
        .session
        .sign_up(SignUpRequest::new("dev@example.com", "hunter22", "Dev"))
        .await
        .expect("sign up should succeed");
    assert!(stack.session.is_authenticated());

    stack
        .session
        .sign_out()
        .await
        .expect("sign out should succeed");
    assert!(!stack.session.is_authenticated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_updates_survive_a_fresh_sign_in(stack: Stack) {
    stack
        .session
        .sign_up(SignUpRequest::new("dev@example.com", "hunter22", "Dev"))
        .await
        .expect("sign up should succeed");
    stack
        .session
        .update_user(UserPatch::new().with_role(UserRole::Admin))
        .await
        .expect("update should succeed");
    stack
        .session
        .sign_out()
        .await
        .expect("sign out should succeed");

    let restored = stack
        .session
        .sign_in("dev@example.com", "hunter22")
        .await
        .expect("sign in should succeed");
    assert_eq!(restored.role(), UserRole::Admin);
}
