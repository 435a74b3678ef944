//! Identity and session management for Quadro.
//!
//! This context wraps the external identity collaborator: credential
//! verification lives behind a port, user account records live in the
//! document collaborator, and a session service tracks the signed-in user.
//! The rest of the system depends on it only to know whether a user is
//! present. The module follows hexagonal architecture:
//!
//! - Account domain types in [`domain`]
//! - The credential port in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The session service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
