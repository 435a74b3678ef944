//! End-to-end board flow: create, load, drag, and project.

use super::helpers::{Stack, column_id, stack};
use quadro::board::domain::{BoardEntityId, project_board};
use quadro::identity::services::SignUpRequest;
use quadro::project::domain::{Column, ProjectDraft, ProjectPatch, ProjectSettings};
use quadro::task::domain::{Position, Task, TaskDraft};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_surface_on_the_board_in_the_backlog(stack: Stack) {
    let user = stack
        .session
        .sign_up(SignUpRequest::new("dev@example.com", "hunter22", "Dev"))
        .await
        .expect("sign up should succeed");
    let team = quadro::identity::domain::TeamId::new();
    let project = stack
        .catalog
        .create(ProjectDraft::new("Apollo"), team, user.id())
        .await
        .expect("project create should succeed");

    stack
        .tasks
        .create(TaskDraft::new("First"), project.id(), user.id())
        .await
        .expect("task create should succeed");
    stack
        .tasks
        .create(TaskDraft::new("Second"), project.id(), user.id())
        .await
        .expect("task create should succeed");

    let loaded = stack
        .tasks
        .load(project.id())
        .await
        .expect("load should succeed");
    let board = project_board(&loaded, project.columns());

    let backlog = board
        .column(&column_id("backlog"))
        .expect("backlog projected");
    let titles: Vec<_> = backlog.tasks().iter().map(Task::title).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert!(board.unfiled().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dragging_across_columns_commits_and_projects(stack: Stack) {
    let user = stack
        .session
        .sign_up(SignUpRequest::new("dev@example.com", "hunter22", "Dev"))
        .await
        .expect("sign up should succeed");
    let project = stack
        .catalog
        .create(
            ProjectDraft::new("Apollo"),
            quadro::identity::domain::TeamId::new(),
            user.id(),
        )
        .await
        .expect("project create should succeed");

    let dragged = stack
        .tasks
        .create(TaskDraft::new("Dragged"), project.id(), user.id())
        .await
        .expect("task create should succeed");
    let target = stack
        .tasks
        .create(TaskDraft::new("Target"), project.id(), user.id())
        .await
        .expect("task create should succeed");
    stack
        .tasks
        .move_task(target.id(), column_id("in-progress"), Position::new(10))
        .await
        .expect("placement should succeed");

    stack.coordinator.begin(dragged.id());
    let outcome = stack
        .coordinator
        .hover(&BoardEntityId::Task(target.id()), project.columns())
        .await
        .expect("hover should succeed");
    assert!(!outcome.is_noop());
    stack.coordinator.finish();

    // The hover itself committed: a fresh load sees the move.
    let reloaded = stack
        .tasks
        .load(project.id())
        .await
        .expect("load should succeed");
    let board = project_board(&reloaded, project.columns());
    let in_progress = board
        .column(&column_id("in-progress"))
        .expect("column projected");
    assert!(in_progress
        .tasks()
        .iter()
        .any(|task| task.id() == dragged.id() && task.position() == Position::new(11)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_column_leaves_its_tasks_unfiled(stack: Stack) {
    let user = stack
        .session
        .sign_up(SignUpRequest::new("dev@example.com", "hunter22", "Dev"))
        .await
        .expect("sign up should succeed");
    let project = stack
        .catalog
        .create(
            ProjectDraft::new("Apollo"),
            quadro::identity::domain::TeamId::new(),
            user.id(),
        )
        .await
        .expect("project create should succeed");

    let stranded = stack
        .tasks
        .create(TaskDraft::new("Stranded"), project.id(), user.id())
        .await
        .expect("task create should succeed");
    stack
        .tasks
        .move_task(stranded.id(), column_id("review"), Position::ZERO)
        .await
        .expect("placement should succeed");

    // Reconfigure the board without the review column.
    let remaining: Vec<Column> = project
        .columns()
        .iter()
        .filter(|column| column.id() != &column_id("review"))
        .cloned()
        .collect();
    stack
        .catalog
        .update(
            project.id(),
            ProjectPatch::new().with_settings(ProjectSettings {
                columns: remaining,
                is_public: project.settings().is_public,
                allow_client_access: project.settings().allow_client_access,
            }),
        )
        .await
        .expect("project update should succeed");
    let reconfigured = stack
        .catalog
        .fetch(project.id())
        .await
        .expect("fetch should succeed");

    let tasks = stack
        .tasks
        .load(project.id())
        .await
        .expect("load should succeed");
    let board = project_board(&tasks, reconfigured.columns());

    assert!(board.column(&column_id("review")).is_none());
    assert!(board
        .unfiled()
        .iter()
        .any(|task| task.id() == stranded.id()));
    assert!(board
        .columns()
        .iter()
        .all(|column| column.tasks().iter().all(|task| task.id() != stranded.id())));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wip_limits_warn_but_never_block_moves(stack: Stack) {
    let user = stack
        .session
        .sign_up(SignUpRequest::new("dev@example.com", "hunter22", "Dev"))
        .await
        .expect("sign up should succeed");
    let project = stack
        .catalog
        .create(
            ProjectDraft::new("Apollo"),
            quadro::identity::domain::TeamId::new(),
            user.id(),
        )
        .await
        .expect("project create should succeed");

    // Tighten the to-do column to a single task.
    let constrained: Vec<Column> = project
        .columns()
        .iter()
        .map(|column| {
            if column.id() == &column_id("todo") {
                Column::new(column.id().clone(), column.title(), column.position(), column.color())
                    .with_wip_limit(1)
            } else {
                column.clone()
            }
        })
        .collect();
    stack
        .catalog
        .update(
            project.id(),
            ProjectPatch::new().with_settings(ProjectSettings {
                columns: constrained,
                is_public: false,
                allow_client_access: false,
            }),
        )
        .await
        .expect("project update should succeed");
    let reconfigured = stack
        .catalog
        .fetch(project.id())
        .await
        .expect("fetch should succeed");

    for title in ["One", "Two"] {
        let task = stack
            .tasks
            .create(TaskDraft::new(title), project.id(), user.id())
            .await
            .expect("task create should succeed");
        // Both moves land even though the second breaches the limit.
        stack
            .tasks
            .move_task(task.id(), column_id("todo"), Position::new(task.position().value()))
            .await
            .expect("move should succeed despite the limit");
    }

    let tasks = stack
        .tasks
        .load(project.id())
        .await
        .expect("load should succeed");
    let board = project_board(&tasks, reconfigured.columns());
    let todo = board.column(&column_id("todo")).expect("column projected");
    assert_eq!(todo.tasks().len(), 2);
    assert!(todo.over_wip_limit());
}
