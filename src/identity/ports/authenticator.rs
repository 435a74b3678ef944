//! Credential verification port for the external identity provider.

use crate::identity::domain::{EmailAddress, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for authenticator operations.
pub type AuthenticatorResult<T> = Result<T, AuthenticatorError>;

/// Credential registration and verification contract.
#[async_trait]
pub trait CredentialAuthenticator: Send + Sync {
    /// Registers a new credential pair and returns the assigned user
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticatorError::DuplicateAccount`] when the email is
    /// already registered, or [`AuthenticatorError::WeakPassword`] when the
    /// password does not meet the provider's minimum length.
    async fn register(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthenticatorResult<UserId>;

    /// Verifies a credential pair and returns the matching user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticatorError::InvalidCredentials`] when the email is
    /// unknown or the password does not match.
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthenticatorResult<UserId>;

    /// Ends the provider-side session for a user.
    ///
    /// Revoking an unknown user is a no-op.
    async fn revoke(&self, user: UserId) -> AuthenticatorResult<()>;
}

/// Errors returned by authenticator implementations.
#[derive(Debug, Clone, Error)]
pub enum AuthenticatorError {
    /// An account already exists for the email address.
    #[error("an account already exists for {0}")]
    DuplicateAccount(EmailAddress),

    /// The email is unknown or the password does not match.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The password is shorter than the provider minimum.
    #[error("password must be at least {minimum} characters")]
    WeakPassword {
        /// Minimum accepted password length.
        minimum: usize,
    },

    /// The identity provider call failed.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthenticatorError {
    /// Wraps a provider failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
