//! In-memory integration tests across the full stack.
//!
//! Tests are organized into modules by functionality:
//! - `board_flow_tests`: Load, drag, projection, and WIP behaviour
//! - `project_lifecycle_tests`: Catalog listing and cascade deletion
//! - `session_flow_tests`: Registration and sign-in against stored records

mod in_memory {
    pub mod helpers;

    mod board_flow_tests;
    mod project_lifecycle_tests;
    mod session_flow_tests;
}
