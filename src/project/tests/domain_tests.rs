//! Domain validation tests for project types.

use crate::identity::domain::{TeamId, UserId};
use crate::project::domain::{
    Column, ColumnId, Priority, ProjectDomainError, ProjectDraft, ProjectRecord, ProjectStatus,
    default_columns,
};
use mockable::DefaultClock;
use rstest::rstest;

#[test]
fn default_columns_cover_the_standard_flow_in_order() {
    let columns = default_columns();
    let keys: Vec<_> = columns
        .iter()
        .map(|column| column.id().as_str().to_owned())
        .collect();
    assert_eq!(keys, vec!["backlog", "todo", "in-progress", "review", "done"]);

    let positions: Vec<_> = columns.iter().map(Column::position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    assert!(columns.iter().all(|column| column.wip_limit().is_none()));
}

#[rstest]
#[case("in-progress")]
#[case("done")]
#[case("qa_review")]
fn valid_column_keys_are_accepted(#[case] key: &str) {
    let id = ColumnId::new(key).expect("valid column key");
    assert_eq!(id.as_str(), key);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("in progress")]
fn invalid_column_keys_are_rejected(#[case] key: &str) {
    assert!(matches!(
        ColumnId::new(key),
        Err(ProjectDomainError::InvalidColumnKey(_))
    ));
}

#[test]
fn new_project_records_get_planning_defaults_and_owner_first_members() {
    let owner = UserId::new();
    let teammate = UserId::new();
    let record = ProjectRecord::create(
        ProjectDraft::new("Apollo").with_members([teammate, owner]),
        TeamId::new(),
        owner,
        &DefaultClock,
    )
    .expect("record should build");

    assert_eq!(record.status, ProjectStatus::Planning);
    assert_eq!(record.priority, Priority::Medium);
    assert_eq!(record.members, vec![owner, teammate]);
    assert_eq!(record.settings.columns, default_columns());
    assert!(!record.settings.is_public);
}

#[test]
fn empty_project_names_are_rejected() {
    let result = ProjectRecord::create(
        ProjectDraft::new("   "),
        TeamId::new(),
        UserId::new(),
        &DefaultClock,
    );
    assert!(matches!(result, Err(ProjectDomainError::EmptyProjectName)));
}
