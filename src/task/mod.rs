//! Task management for Quadro.
//!
//! The task store is the single authoritative source of truth for the
//! active project's task list: it loads tasks through the document
//! collaborator, mirrors every mutation into its in-memory list, and feeds
//! the board projection. The module follows hexagonal architecture:
//!
//! - Task domain types in [`domain`]
//! - The task store service in [`services`]
//!
//! Persistence goes through the `document` context's port; the task context
//! defines no ports of its own.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
