//! Application services for task management.

mod store;

pub use store::{TaskStore, TaskStoreError, TaskStoreEvent, TaskStoreResult};
