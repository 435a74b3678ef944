//! Board projection and drag handling for Quadro.
//!
//! The board is a pure derivation: given the task list and a project's
//! column configuration it groups tasks into per-column sequences for
//! display, classifies drag gestures into concrete move intents, and never
//! holds state of its own. The module follows hexagonal architecture:
//!
//! - Projection and drag classification in [`domain`]
//! - The drag gesture coordinator in [`services`]
//!
//! The board mutates nothing directly; committed moves go through the task
//! store.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
