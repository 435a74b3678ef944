//! Given steps for board drag BDD scenarios.

use super::world::{BoardDragWorld, run_async};
use eyre::WrapErr;
use quadro::identity::domain::UserId;
use quadro::project::domain::{ColumnId, default_columns};
use quadro::task::domain::{Position, TaskDraft};
use rstest_bdd_macros::given;

#[given("a project with the default columns")]
fn project_with_default_columns(world: &mut BoardDragWorld) {
    world.columns = default_columns();
}

#[given(r#"a task "{name}" in column "{column}" at position {position:i64}"#)]
fn task_in_column(
    world: &mut BoardDragWorld,
    name: String,
    column: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let created = run_async(world.store.create(
        TaskDraft::new(name.clone()),
        world.project,
        UserId::new(),
    ))
    .wrap_err("create task for drag scenario")?;

    let status = ColumnId::new(column).wrap_err("parse column key in scenario")?;
    run_async(
        world
            .store
            .move_task(created.id(), status, Position::new(position)),
    )
    .wrap_err("place task for drag scenario")?;

    world.task_ids.insert(name, created.id());
    Ok(())
}
