//! In-memory credential authenticator for tests and local development.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, UserId},
    ports::{AuthenticatorError, AuthenticatorResult, CredentialAuthenticator},
};

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Thread-safe in-memory credential table.
///
/// Passwords are never retained; only their SHA-256 digests are stored,
/// keyed by normalized email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthenticator {
    state: Arc<RwLock<HashMap<EmailAddress, CredentialEntry>>>,
}

#[derive(Debug, Clone)]
struct CredentialEntry {
    user: UserId,
    digest: [u8; 32],
}

impl InMemoryAuthenticator {
    /// Creates an empty authenticator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_failure(err: impl std::fmt::Display) -> AuthenticatorError {
    AuthenticatorError::unavailable(std::io::Error::other(err.to_string()))
}

fn password_digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

#[async_trait]
impl CredentialAuthenticator for InMemoryAuthenticator {
    async fn register(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthenticatorResult<UserId> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthenticatorError::WeakPassword {
                minimum: MIN_PASSWORD_LENGTH,
            });
        }
        let mut state = self.state.write().map_err(lock_failure)?;
        if state.contains_key(email) {
            return Err(AuthenticatorError::DuplicateAccount(email.clone()));
        }
        let user = UserId::new();
        state.insert(
            email.clone(),
            CredentialEntry {
                user,
                digest: password_digest(password),
            },
        );
        Ok(user)
    }

    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthenticatorResult<UserId> {
        let state = self.state.read().map_err(lock_failure)?;
        state
            .get(email)
            .filter(|entry| entry.digest == password_digest(password))
            .map(|entry| entry.user)
            .ok_or(AuthenticatorError::InvalidCredentials)
    }

    async fn revoke(&self, _user: UserId) -> AuthenticatorResult<()> {
        // Sessions are provider-side state this double does not model.
        Ok(())
    }
}
