//! Domain validation tests for identity types.

use crate::identity::domain::{EmailAddress, IdentityDomainError, Theme, UserRole, UserSettings};
use rstest::rstest;

#[rstest]
#[case("dev@example.com", "dev@example.com")]
#[case("  Dev@Example.COM  ", "dev@example.com")]
fn email_addresses_normalize(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@missing-local.com")]
#[case("missing-domain@")]
#[case("two@at@signs.com")]
#[case("spaced out@example.com")]
#[case("nodot@localhost")]
fn malformed_email_addresses_are_rejected(#[case] raw: &str) {
    assert!(matches!(
        EmailAddress::new(raw),
        Err(IdentityDomainError::InvalidEmail(_))
    ));
}

#[rstest]
#[case(UserRole::Admin, "admin")]
#[case(UserRole::ProjectManager, "pm")]
#[case(UserRole::Developer, "developer")]
#[case(UserRole::Client, "client")]
fn user_roles_round_trip_through_storage_form(#[case] role: UserRole, #[case] stored: &str) {
    assert_eq!(role.as_str(), stored);
    assert_eq!(UserRole::try_from(stored).expect("role parses"), role);
}

#[test]
fn unknown_user_role_fails_to_parse() {
    assert!(UserRole::try_from("owner").is_err());
}

#[test]
fn default_settings_match_registration_defaults() {
    let settings = UserSettings::default();
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(settings.timezone, "UTC");
    assert!(settings.notifications.email);
    assert!(settings.notifications.push);
    assert!(settings.notifications.mentions);
    assert!(settings.notifications.task_updates);
}
