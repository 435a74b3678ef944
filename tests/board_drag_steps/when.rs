//! When steps for board drag BDD scenarios.

use super::world::{BoardDragWorld, run_async};
use eyre::WrapErr;
use quadro::board::domain::BoardEntityId;
use quadro::project::domain::ColumnId;
use rstest_bdd_macros::when;

#[when(r#"task "{name}" is dragged over task "{target}""#)]
fn drag_over_task(
    world: &mut BoardDragWorld,
    name: String,
    target: String,
) -> Result<(), eyre::Report> {
    let active = world.task_named(&name)?;
    let over = world.task_named(&target)?;

    world.coordinator.begin(active);
    run_async(
        world
            .coordinator
            .hover(&BoardEntityId::Task(over), &world.columns),
    )
    .wrap_err("hover over task in scenario")?;
    Ok(())
}

#[when(r#"task "{name}" is dragged over column "{column}""#)]
fn drag_over_column(
    world: &mut BoardDragWorld,
    name: String,
    column: String,
) -> Result<(), eyre::Report> {
    let active = world.task_named(&name)?;
    let target = ColumnId::new(column).wrap_err("parse column key in scenario")?;

    world.coordinator.begin(active);
    run_async(
        world
            .coordinator
            .hover(&BoardEntityId::Column(target), &world.columns),
    )
    .wrap_err("hover over column in scenario")?;
    Ok(())
}

#[when("the drag ends")]
fn drag_ends(world: &mut BoardDragWorld) {
    world.coordinator.finish();
}
