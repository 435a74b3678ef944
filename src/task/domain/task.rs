//! Task aggregate root, creation draft, and partial update types.

use super::{Attachment, Comment, Position, TaskDomainError, TaskId, TaskKind, TimeTracking};
use crate::document::domain::stored_instant;
use crate::identity::domain::UserId;
use crate::project::domain::{ColumnId, Priority, ProjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Persistence payload for a task document.
///
/// Collateral collections default to empty on decode so documents written
/// before a field existed stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned user, if any.
    pub assignee_id: Option<UserId>,
    /// Creating user.
    pub reporter_id: UserId,
    /// Column key the task is filed under.
    pub status: ColumnId,
    /// Urgency.
    pub priority: Priority,
    /// Work item kind.
    pub kind: TaskKind,
    /// Story point estimate.
    pub story_points: Option<u32>,
    /// Due date, stored as epoch milliseconds.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub due_date: Option<DateTime<Utc>>,
    /// Planned start date, stored as epoch milliseconds.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_date: Option<DateTime<Utc>>,
    /// Completion date, stored as epoch milliseconds.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub completed_date: Option<DateTime<Utc>>,
    /// Parent task for subtasks.
    pub parent_id: Option<TaskId>,
    /// Opaque reference to an externally managed sprint.
    pub sprint_id: Option<String>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Sort key within the status column.
    pub position: Position,
    /// Creation timestamp, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// File attachments.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Discussion comments.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Effort counters.
    #[serde(default)]
    pub time_tracking: TimeTracking,
}

impl TaskRecord {
    /// Builds the payload for a new task: filed under the backlog column, a
    /// clock-derived position, empty collateral, and zeroed effort counters.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn create(
        draft: TaskDraft,
        project_id: ProjectId,
        reporter_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let TaskDraft {
            title,
            description,
            assignee_id,
            priority,
            kind,
            story_points,
            due_date,
            parent_id,
            sprint_id,
            tags,
        } = draft;
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        let timestamp = stored_instant(clock.utc());
        Ok(Self {
            title,
            description,
            project_id,
            assignee_id,
            reporter_id,
            status: ColumnId::backlog(),
            priority,
            kind,
            story_points,
            due_date,
            start_date: None,
            completed_date: None,
            parent_id,
            sprint_id,
            tags,
            position: Position::at(timestamp),
            created_at: timestamp,
            updated_at: timestamp,
            attachments: Vec::new(),
            comments: Vec::new(),
            time_tracking: TimeTracking::zeroed(),
        })
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    record: TaskRecord,
}

impl Task {
    /// Reconstructs a task from its persisted record.
    #[must_use]
    pub const fn from_persisted(id: TaskId, record: TaskRecord) -> Self {
        Self { id, record }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.record.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.record.description.as_deref()
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.record.project_id
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.record.assignee_id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn reporter_id(&self) -> UserId {
        self.record.reporter_id
    }

    /// Returns the column key the task is filed under.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.record.status
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.record.priority
    }

    /// Returns the work item kind.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.record.kind
    }

    /// Returns the story point estimate, if any.
    #[must_use]
    pub const fn story_points(&self) -> Option<u32> {
        self.record.story_points
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.record.due_date
    }

    /// Returns the sprint reference, if any.
    #[must_use]
    pub fn sprint_id(&self) -> Option<&str> {
        self.record.sprint_id.as_deref()
    }

    /// Returns the labels.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.record.tags
    }

    /// Returns the sort key within the status column.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.record.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.record.updated_at
    }

    /// Returns the effort counters.
    #[must_use]
    pub const fn time_tracking(&self) -> TimeTracking {
        self.record.time_tracking
    }

    /// Returns the discussion comments.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.record.comments
    }

    /// Returns the file attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.record.attachments
    }

    /// Returns the persistence payload.
    #[must_use]
    pub const fn record(&self) -> &TaskRecord {
        &self.record
    }

    /// Merges patch fields into the task and refreshes `updated_at`.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        let TaskPatch {
            title,
            description,
            assignee_id,
            priority,
            kind,
            story_points,
            due_date,
            start_date,
            completed_date,
            sprint_id,
            tags,
            time_tracking,
        } = patch;
        if let Some(value) = title {
            self.record.title = value;
        }
        if let Some(value) = description {
            self.record.description = Some(value);
        }
        if let Some(value) = assignee_id {
            self.record.assignee_id = Some(value);
        }
        if let Some(value) = priority {
            self.record.priority = value;
        }
        if let Some(value) = kind {
            self.record.kind = value;
        }
        if let Some(value) = story_points {
            self.record.story_points = Some(value);
        }
        if let Some(value) = due_date {
            self.record.due_date = Some(value);
        }
        if let Some(value) = start_date {
            self.record.start_date = Some(value);
        }
        if let Some(value) = completed_date {
            self.record.completed_date = Some(value);
        }
        if let Some(value) = sprint_id {
            self.record.sprint_id = Some(value);
        }
        if let Some(value) = tags {
            self.record.tags = value;
        }
        if let Some(value) = time_tracking {
            self.record.time_tracking = value;
        }
        self.record.updated_at = stored_instant(clock.utc());
    }

    /// Refiles the task under `status` at `position` and refreshes
    /// `updated_at`. Last writer wins; there is no version check.
    pub fn relocate(&mut self, status: ColumnId, position: Position, clock: &impl Clock) {
        self.record.status = status;
        self.record.position = position;
        self.record.updated_at = stored_instant(clock.utc());
    }
}

/// Creation request for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    assignee_id: Option<UserId>,
    priority: Priority,
    kind: TaskKind,
    story_points: Option<u32>,
    due_date: Option<DateTime<Utc>>,
    parent_id: Option<TaskId>,
    sprint_id: Option<String>,
    tags: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with the given title, medium priority, and the plain
    /// task kind.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            assignee_id: None,
            priority: Priority::Medium,
            kind: TaskKind::Task,
            story_points: None,
            due_date: None,
            parent_id: None,
            sprint_id: None,
            tags: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Assigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee_id = Some(assignee);
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the work item kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: DateTime<Utc>) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Marks the task as a subtask of `parent`.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// References an externally managed sprint.
    #[must_use]
    pub fn with_sprint(mut self, sprint: impl Into<String>) -> Self {
        self.sprint_id = Some(sprint.into());
        self
    }

    /// Sets free-form labels.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// Partial update for a task.
///
/// Serializes to a shallow document patch containing only the set fields;
/// status and position change through the store's move operation instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    /// New urgency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New work item kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskKind>,
    /// New story point estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    /// New due date, stored as epoch milliseconds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
    /// New planned start date, stored as epoch milliseconds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub start_date: Option<DateTime<Utc>>,
    /// New completion date, stored as epoch milliseconds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub completed_date: Option<DateTime<Utc>>,
    /// New sprint reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    /// Replacement labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Replacement effort counters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_tracking: Option<TimeTracking>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            assignee_id: None,
            priority: None,
            kind: None,
            story_points: None,
            due_date: None,
            start_date: None,
            completed_date: None,
            sprint_id: None,
            tags: None,
            time_tracking: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee_id = Some(assignee);
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the work item kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: DateTime<Utc>) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Sets the completion date.
    #[must_use]
    pub const fn with_completed_date(mut self, date: DateTime<Utc>) -> Self {
        self.completed_date = Some(date);
        self
    }

    /// Replaces the labels.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Replaces the effort counters.
    #[must_use]
    pub const fn with_time_tracking(mut self, tracking: TimeTracking) -> Self {
        self.time_tracking = Some(tracking);
        self
    }
}
