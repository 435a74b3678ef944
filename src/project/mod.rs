//! Project management for Quadro.
//!
//! Projects scope tasks and own the board's column configuration. This
//! context loads and mutates project documents through the document
//! collaborator and tracks the currently open project. The module follows
//! hexagonal architecture:
//!
//! - Project, column, and shared vocabulary types in [`domain`]
//! - The catalog service in [`services`]
//!
//! Persistence goes through the `document` context's port; the project
//! context defines no ports of its own.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
