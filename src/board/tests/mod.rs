//! Unit and service tests for the board context.

mod helpers;
