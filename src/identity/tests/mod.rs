//! Unit and service tests for the identity context.

mod domain_tests;
mod session_tests;
