//! Generic document collaborator for Quadro.
//!
//! Every persistent entity (projects, tasks, user accounts) lives in a named
//! collection of JSON documents held by an external hosted store. This module
//! defines the collaborator contract and its implementations following
//! hexagonal architecture:
//!
//! - Document, collection, and query types in [`domain`]
//! - The store contract in [`ports`]
//! - In-memory and `PostgreSQL` implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
