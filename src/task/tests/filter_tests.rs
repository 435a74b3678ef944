//! Tests for display filter predicates.

use crate::identity::domain::UserId;
use crate::project::domain::{ColumnId, Priority, ProjectId};
use crate::task::domain::{Task, TaskDraft, TaskFilters, TaskId, TaskKind, TaskRecord};
use mockable::DefaultClock;
use uuid::Uuid;

fn task(draft: TaskDraft) -> Task {
    let record = TaskRecord::create(
        draft,
        ProjectId::from_uuid(Uuid::new_v4()),
        UserId::new(),
        &DefaultClock,
    )
    .expect("record should build");
    Task::from_persisted(TaskId::from_uuid(Uuid::new_v4()), record)
}

#[test]
fn empty_filters_match_everything() {
    let filters = TaskFilters::new();
    assert!(filters.is_empty());
    assert!(filters.matches(&task(TaskDraft::new("Anything"))));
}

#[test]
fn status_filters_match_the_backlog_column() {
    let backlog_only =
        TaskFilters::new().with_statuses([ColumnId::new("backlog").expect("valid key")]);
    let done_only = TaskFilters::new().with_statuses([ColumnId::new("done").expect("valid key")]);
    let subject = task(TaskDraft::new("Fresh"));

    assert!(backlog_only.matches(&subject));
    assert!(!done_only.matches(&subject));
}

#[test]
fn assignee_filters_reject_unassigned_tasks() {
    let reviewer = UserId::new();
    let filters = TaskFilters::new().with_assignees([reviewer]);

    assert!(filters.matches(&task(TaskDraft::new("Mine").with_assignee(reviewer))));
    assert!(!filters.matches(&task(TaskDraft::new("Unassigned"))));
    assert!(!filters.matches(&task(TaskDraft::new("Theirs").with_assignee(UserId::new()))));
}

#[test]
fn priority_and_kind_filters_compose() {
    let filters = TaskFilters::new()
        .with_priorities([Priority::Urgent])
        .with_kinds([TaskKind::Bug]);

    assert!(filters.matches(&task(
        TaskDraft::new("Prod down")
            .with_priority(Priority::Urgent)
            .with_kind(TaskKind::Bug)
    )));
    assert!(!filters.matches(&task(
        TaskDraft::new("Urgent chore").with_priority(Priority::Urgent)
    )));
}

#[test]
fn tag_filters_match_any_overlap() {
    let filters = TaskFilters::new().with_tags(["backend".to_owned(), "infra".to_owned()]);

    assert!(filters.matches(&task(
        TaskDraft::new("API work").with_tags(["backend".to_owned()])
    )));
    assert!(!filters.matches(&task(
        TaskDraft::new("Design work").with_tags(["design".to_owned()])
    )));
}

#[test]
fn sprint_filters_require_the_exact_sprint() {
    let filters = TaskFilters::new().with_sprint("sprint-7");

    assert!(filters.matches(&task(TaskDraft::new("Planned").with_sprint("sprint-7"))));
    assert!(!filters.matches(&task(TaskDraft::new("Unplanned"))));
}
