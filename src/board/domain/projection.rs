//! Per-column grouping of the task list.

use crate::project::domain::{Column, ColumnId};
use crate::task::domain::Task;

/// One column of the projected board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    id: ColumnId,
    title: String,
    color: String,
    wip_limit: Option<usize>,
    over_wip_limit: bool,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Returns the column key.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the display colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the advisory WIP limit, if configured.
    #[must_use]
    pub const fn wip_limit(&self) -> Option<usize> {
        self.wip_limit
    }

    /// Returns whether the column holds more tasks than its WIP limit.
    ///
    /// Purely a warning indicator; no move is ever blocked by it.
    #[must_use]
    pub const fn over_wip_limit(&self) -> bool {
        self.over_wip_limit
    }

    /// Returns the tasks filed under this column, in source-list order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Derived, non-persistent board for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    columns: Vec<BoardColumn>,
    unfiled: Vec<Task>,
}

impl BoardView {
    /// Returns the projected columns in configured order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the column with the given key, if configured.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Returns tasks whose status matches no configured column.
    ///
    /// Such tasks appear in no column; surfacing them here keeps a removed
    /// column from silently hiding its tasks.
    #[must_use]
    pub fn unfiled(&self) -> &[Task] {
        &self.unfiled
    }
}

/// Groups `tasks` into per-column sequences in the configured column order.
///
/// Each column keeps the relative order of the source list; the list is
/// expected to arrive position-sorted from the load step and is not
/// re-sorted here. The derivation is side-effect free and idempotent, and
/// is recomputed whenever the task list or column configuration changes.
#[must_use]
pub fn project_board(tasks: &[Task], columns: &[Column]) -> BoardView {
    let projected = columns
        .iter()
        .map(|column| {
            let grouped: Vec<Task> = tasks
                .iter()
                .filter(|task| task.status() == column.id())
                .cloned()
                .collect();
            let over_wip_limit = column
                .wip_limit()
                .is_some_and(|limit| grouped.len() > limit);
            BoardColumn {
                id: column.id().clone(),
                title: column.title().to_owned(),
                color: column.color().to_owned(),
                wip_limit: column.wip_limit(),
                over_wip_limit,
                tasks: grouped,
            }
        })
        .collect();

    let unfiled = tasks
        .iter()
        .filter(|task| !columns.iter().any(|column| column.id() == task.status()))
        .cloned()
        .collect();

    BoardView {
        columns: projected,
        unfiled,
    }
}
