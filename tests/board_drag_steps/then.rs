//! Then steps for board drag BDD scenarios.

use super::world::BoardDragWorld;
use rstest_bdd_macros::then;

#[then(r#"task "{name}" sits in column "{column}" at position {position:i64}"#)]
fn task_sits_at(
    world: &BoardDragWorld,
    name: String,
    column: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let id = world.task_named(&name)?;
    let tasks = world.store.tasks();
    let task = tasks
        .iter()
        .find(|task| task.id() == id)
        .ok_or_else(|| eyre::eyre!("task {name:?} missing from the store"))?;

    if task.status().as_str() != column {
        return Err(eyre::eyre!(
            "expected column {column}, found {}",
            task.status()
        ));
    }
    if task.position().value() != position {
        return Err(eyre::eyre!(
            "expected position {position}, found {}",
            task.position()
        ));
    }
    Ok(())
}
