//! Shared fixtures for board tests.

use crate::identity::domain::UserId;
use crate::project::domain::{ColumnId, ProjectId};
use crate::task::domain::{Position, Task, TaskDraft, TaskId, TaskRecord};
use mockable::DefaultClock;
use uuid::Uuid;

/// Builds a task filed under `status` at `position`.
pub fn board_task(project: ProjectId, title: &str, status: &str, position: i64) -> Task {
    let mut record = TaskRecord::create(
        TaskDraft::new(title),
        project,
        UserId::new(),
        &DefaultClock,
    )
    .expect("record should build");
    record.status = ColumnId::new(status).expect("valid column key");
    record.position = Position::new(position);
    Task::from_persisted(TaskId::from_uuid(Uuid::new_v4()), record)
}

/// Returns a throwaway project id.
pub fn project_id() -> ProjectId {
    ProjectId::from_uuid(Uuid::new_v4())
}

/// Builds a column key, panicking on invalid test input.
pub fn column_id(key: &str) -> ColumnId {
    ColumnId::new(key).expect("valid column key")
}
