//! Display filters over the task list.

use super::{Task, TaskKind};
use crate::identity::domain::UserId;
use crate::project::domain::{ColumnId, Priority};
use chrono::{DateTime, Utc};

/// Criteria narrowing the visible task list.
///
/// Every populated criterion must hold for a task to match; empty criteria
/// are ignored. Filtering changes what is displayed, never what is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    statuses: Vec<ColumnId>,
    assignees: Vec<UserId>,
    priorities: Vec<Priority>,
    kinds: Vec<TaskKind>,
    sprint: Option<String>,
    tags: Vec<String>,
    due_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TaskFilters {
    /// Creates an empty filter set matching every task.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statuses: Vec::new(),
            assignees: Vec::new(),
            priorities: Vec::new(),
            kinds: Vec::new(),
            sprint: None,
            tags: Vec::new(),
            due_between: None,
        }
    }

    /// Restricts matches to the given status columns.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ColumnId>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Restricts matches to tasks assigned to one of the given users.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Restricts matches to the given priorities.
    #[must_use]
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities = priorities.into_iter().collect();
        self
    }

    /// Restricts matches to the given work item kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = TaskKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Restricts matches to tasks in the given sprint.
    #[must_use]
    pub fn with_sprint(mut self, sprint: impl Into<String>) -> Self {
        self.sprint = Some(sprint.into());
        self
    }

    /// Restricts matches to tasks carrying at least one of the given labels.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Restricts matches to tasks due within the inclusive range.
    #[must_use]
    pub const fn with_due_between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.due_between = Some((start, end));
        self
    }

    /// Returns whether no criteria are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
            && self.assignees.is_empty()
            && self.priorities.is_empty()
            && self.kinds.is_empty()
            && self.sprint.is_none()
            && self.tags.is_empty()
            && self.due_between.is_none()
    }

    /// Returns whether `task` satisfies every populated criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(task.status());
        let assignee_ok = self.assignees.is_empty()
            || task
                .assignee_id()
                .is_some_and(|assignee| self.assignees.contains(&assignee));
        let priority_ok = self.priorities.is_empty() || self.priorities.contains(&task.priority());
        let kind_ok = self.kinds.is_empty() || self.kinds.contains(&task.kind());
        let sprint_ok = self
            .sprint
            .as_deref()
            .is_none_or(|sprint| task.sprint_id() == Some(sprint));
        let tags_ok = self.tags.is_empty()
            || task.tags().iter().any(|tag| self.tags.contains(tag));
        let due_ok = self.due_between.is_none_or(|(start, end)| {
            task.due_date()
                .is_some_and(|due| due >= start && due <= end)
        });

        status_ok && assignee_ok && priority_ok && kind_ok && sprint_ok && tags_ok && due_ok
    }
}
