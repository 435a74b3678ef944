//! Project aggregate root and its persistence payload.

use super::{Column, Priority, ProjectDomainError, ProjectId, ProjectStatus, default_columns};
use crate::document::domain::stored_instant;
use crate::identity::domain::{TeamId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Board and visibility configuration carried inside a project document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Ordered board columns.
    pub columns: Vec<Column>,
    /// Whether the project is visible outside its team.
    pub is_public: bool,
    /// Whether client-role users may open the project.
    pub allow_client_access: bool,
}

/// Persistence payload for a project document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning team.
    pub team_id: TeamId,
    /// Creating user.
    pub owner_id: UserId,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Urgency.
    pub priority: Priority,
    /// Planned start date, stored as epoch milliseconds.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end date, stored as epoch milliseconds.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub end_date: Option<DateTime<Utc>>,
    /// Member user ids, owner first.
    pub members: Vec<UserId>,
    /// Free-form labels.
    pub tags: Vec<String>,
    /// Display colour.
    pub color: String,
    /// Creation timestamp, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Board and visibility configuration.
    pub settings: ProjectSettings,
}

impl ProjectRecord {
    /// Builds the payload for a new project: planning status, medium
    /// priority, the owner prepended to the member list, and the default
    /// column set.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// empty after trimming.
    pub fn create(
        draft: ProjectDraft,
        team_id: TeamId,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let ProjectDraft {
            name,
            description,
            start_date,
            end_date,
            members,
            tags,
            color,
            is_public,
            allow_client_access,
        } = draft;
        if name.trim().is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }

        let mut all_members = vec![owner_id];
        all_members.extend(members.into_iter().filter(|member| *member != owner_id));

        let timestamp = stored_instant(clock.utc());
        Ok(Self {
            name,
            description,
            team_id,
            owner_id,
            status: ProjectStatus::Planning,
            priority: Priority::Medium,
            start_date,
            end_date,
            members: all_members,
            tags,
            color,
            created_at: timestamp,
            updated_at: timestamp,
            settings: ProjectSettings {
                columns: default_columns(),
                is_public,
                allow_client_access,
            },
        })
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    record: ProjectRecord,
}

impl Project {
    /// Reconstructs a project from its persisted record.
    #[must_use]
    pub const fn from_persisted(id: ProjectId, record: ProjectRecord) -> Self {
        Self { id, record }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.record.description.as_deref()
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.record.team_id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.record.owner_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.record.status
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.record.priority
    }

    /// Returns the member list, owner first.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.record.members
    }

    /// Returns the ordered board columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.record.settings.columns
    }

    /// Returns the board and visibility configuration.
    #[must_use]
    pub const fn settings(&self) -> &ProjectSettings {
        &self.record.settings
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

    /// Returns the persistence payload.
    #[must_use]
    pub const fn record(&self) -> &ProjectRecord {
        &self.record
    }

    /// Merges patch fields into the project and refreshes `updated_at`.
    pub fn apply(&mut self, patch: ProjectPatch, clock: &impl Clock) {
        let ProjectPatch {
            name,
            description,
            status,
            priority,
            start_date,
            end_date,
            members,
            tags,
            color,
            settings,
        } = patch;
        if let Some(value) = name {
            self.record.name = value;
        }
        if let Some(value) = description {
            self.record.description = Some(value);
        }
        if let Some(value) = status {
            self.record.status = value;
        }
        if let Some(value) = priority {
            self.record.priority = value;
        }
        if let Some(value) = start_date {
            self.record.start_date = Some(value);
        }
        if let Some(value) = end_date {
            self.record.end_date = Some(value);
        }
        if let Some(value) = members {
            self.record.members = value;
        }
        if let Some(value) = tags {
            self.record.tags = value;
        }
        if let Some(value) = color {
            self.record.color = value;
        }
        if let Some(value) = settings {
            self.record.settings = value;
        }
        self.record.updated_at = stored_instant(clock.utc());
    }
}

/// Creation request for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    name: String,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    members: Vec<UserId>,
    tags: Vec<String>,
    color: String,
    is_public: bool,
    allow_client_access: bool,
}

impl ProjectDraft {
    /// Creates a draft with required fields and private, team-only defaults.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
            members: Vec::new(),
            tags: Vec::new(),
            color: "#3b82f6".to_owned(),
            is_public: false,
            allow_client_access: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the planned start date.
    #[must_use]
    pub const fn with_start_date(mut self, date: DateTime<Utc>) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the planned end date.
    #[must_use]
    pub const fn with_end_date(mut self, date: DateTime<Utc>) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the initial member list; the owner is always included.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    /// Sets free-form labels.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the display colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Makes the project visible outside its team.
    #[must_use]
    pub const fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Allows client-role users to open the project.
    #[must_use]
    pub const fn with_client_access(mut self) -> Self {
        self.allow_client_access = true;
        self
    }
}

/// Partial update for a project.
///
/// Serializes to a shallow document patch containing only the set fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectPatch {
    /// New project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    /// New urgency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New planned start date, stored as epoch milliseconds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub start_date: Option<DateTime<Utc>>,
    /// New planned end date, stored as epoch milliseconds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub end_date: Option<DateTime<Utc>>,
    /// Replacement member list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<UserId>>,
    /// Replacement labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New display colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Replacement board and visibility configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProjectSettings>,
}

impl ProjectPatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            description: None,
            status: None,
            priority: None,
            start_date: None,
            end_date: None,
            members: None,
            tags: None,
            color: None,
            settings: None,
        }
    }

    /// Sets the project name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the board and visibility configuration.
    #[must_use]
    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}
