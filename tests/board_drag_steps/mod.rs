//! Step definitions for board drag behaviour scenarios.

pub mod world;

mod given;
mod then;
mod when;
