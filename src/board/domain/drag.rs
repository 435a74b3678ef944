//! Classification of drag gestures into move intents.

use crate::project::domain::{Column, ColumnId};
use crate::task::domain::{Position, Task, TaskId};

/// What a pointer can hover over during a drag: another task's card or a
/// column surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEntityId {
    /// A task card.
    Task(TaskId),
    /// A column drop area.
    Column(ColumnId),
}

/// A computed instruction to refile a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
    task: TaskId,
    status: ColumnId,
    position: Position,
}

impl MoveIntent {
    /// Returns the task to refile.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the destination column.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.status
    }

    /// Returns the destination sort key.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// Result of classifying one hover transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// The hover refiles the active task.
    Move(MoveIntent),
    /// The hover changes nothing.
    NoOp,
}

impl DragOutcome {
    /// Returns whether the hover changes nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Classifies a hover of the dragged task `active` over `over`.
///
/// - Hovering over itself, an unknown task, or a task in the same column
///   changes nothing; reordering within a column is not classified.
/// - Hovering over a task in another column refiles after that task, at its
///   position plus one.
/// - Hovering over a different, configured column refiles to its end: after
///   the largest position present, or at zero when the column is empty.
#[must_use]
pub fn classify_drag(
    active: TaskId,
    over: &BoardEntityId,
    tasks: &[Task],
    columns: &[Column],
) -> DragOutcome {
    if matches!(over, BoardEntityId::Task(id) if *id == active) {
        return DragOutcome::NoOp;
    }
    let Some(active_task) = tasks.iter().find(|task| task.id() == active) else {
        return DragOutcome::NoOp;
    };

    match over {
        BoardEntityId::Task(over_id) => {
            let Some(over_task) = tasks.iter().find(|task| task.id() == *over_id) else {
                return DragOutcome::NoOp;
            };
            if over_task.status() == active_task.status() {
                return DragOutcome::NoOp;
            }
            DragOutcome::Move(MoveIntent {
                task: active,
                status: over_task.status().clone(),
                position: over_task.position().successor(),
            })
        }
        BoardEntityId::Column(column_id) => {
            if !columns.iter().any(|column| column.id() == column_id) {
                return DragOutcome::NoOp;
            }
            if active_task.status() == column_id {
                return DragOutcome::NoOp;
            }
            let position = tasks
                .iter()
                .filter(|task| task.status() == column_id)
                .map(Task::position)
                .max()
                .map_or(Position::ZERO, Position::successor);
            DragOutcome::Move(MoveIntent {
                task: active,
                status: column_id.clone(),
                position,
            })
        }
    }
}
