//! Board column configuration.
//!
//! Columns are configuration carried inside a project's settings, not
//! independently persisted entities. A task's status references a column by
//! key; nothing enforces that the key still exists, so removing a column
//! orphans its tasks into the board's unfiled bucket.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key identifying a column within a project's board.
///
/// Doubles as the status value carried by tasks filed under the column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a validated column key.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidColumnKey`] when the value is
    /// empty after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(ProjectDomainError::InvalidColumnKey(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the key of the column new tasks are filed under.
    #[must_use]
    pub fn backlog() -> Self {
        Self("backlog".to_owned())
    }

    /// Returns the column key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named bucket partitioning tasks by status on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    position: u32,
    color: String,
    wip_limit: Option<usize>,
}

impl Column {
    /// Creates a column without a WIP limit.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>, position: u32, color: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            position,
            color: color.into(),
            wip_limit: None,
        }
    }

    /// Sets an advisory work-in-progress limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, limit: usize) -> Self {
        self.wip_limit = Some(limit);
        self
    }

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

    /// Returns the display position within the board.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
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
}

/// Returns the column set every new project starts with.
#[must_use]
pub fn default_columns() -> Vec<Column> {
    [
        ("backlog", "Backlog", "#94a3b8"),
        ("todo", "To Do", "#3b82f6"),
        ("in-progress", "In Progress", "#f59e0b"),
        ("review", "Review", "#8b5cf6"),
        ("done", "Done", "#10b981"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (key, title, color))| {
        Column::new(
            ColumnId(key.to_owned()),
            title,
            u32::try_from(index).unwrap_or(u32::MAX),
            color,
        )
    })
    .collect()
}
