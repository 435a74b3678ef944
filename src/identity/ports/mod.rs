//! Port contracts for the identity collaborator.

pub mod authenticator;

pub use authenticator::{AuthenticatorError, AuthenticatorResult, CredentialAuthenticator};
