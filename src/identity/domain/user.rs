//! User account aggregate and its settings records.

use super::{EmailAddress, IdentityDomainError, ParseUserRoleError, TeamId, UserId};
use crate::document::domain::stored_instant;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role a user holds within their team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Project manager.
    #[serde(rename = "pm")]
    ProjectManager,
    /// Developer.
    Developer,
    /// External client with restricted visibility.
    Client,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "pm",
            Self::Developer => "developer",
            Self::Client => "client",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "pm" => Ok(Self::ProjectManager),
            "developer" => Ok(Self::Developer),
            "client" => Ok(Self::Client),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

/// Per-channel notification switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Email notifications.
    pub email: bool,
    /// Push notifications.
    pub push: bool,
    /// Notifications when the user is mentioned.
    pub mentions: bool,
    /// Notifications when an assigned task changes.
    pub task_updates: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            mentions: true,
            task_updates: true,
        }
    }
}

/// User preference record stored with the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Colour theme.
    pub theme: Theme,
    /// IANA timezone name.
    pub timezone: String,
    /// Notification switches.
    pub notifications: NotificationPreferences,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            timezone: "UTC".to_owned(),
            notifications: NotificationPreferences::default(),
        }
    }
}

/// Persistence payload for a user account document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Normalized email address.
    pub email: EmailAddress,
    /// Display name.
    pub name: String,
    /// Team role.
    pub role: UserRole,
    /// Owning team, if the user has joined one.
    pub team_id: Option<TeamId>,
    /// Account creation timestamp, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Latest account update timestamp, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Preference record.
    pub settings: UserSettings,
}

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    record: UserRecord,
}

impl UserAccount {
    /// Creates an account with registration defaults: developer role, no
    /// team, light theme, and every notification channel enabled.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the display name is
    /// empty after trimming.
    pub fn register(
        id: UserId,
        email: EmailAddress,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let display_name = name.into();
        if display_name.trim().is_empty() {
            return Err(IdentityDomainError::EmptyName);
        }
        let timestamp = stored_instant(clock.utc());
        Ok(Self {
            id,
            record: UserRecord {
                email,
                name: display_name,
                role: UserRole::Developer,
                team_id: None,
                created_at: timestamp,
                updated_at: timestamp,
                settings: UserSettings::default(),
            },
        })
    }

    /// Reconstructs an account from its persisted record.
    #[must_use]
    pub const fn from_persisted(id: UserId, record: UserRecord) -> Self {
        Self { id, record }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.record.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Returns the team role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.record.role
    }

    /// Returns the owning team, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<TeamId> {
        self.record.team_id
    }

    /// Returns the preference record.
    #[must_use]
    pub const fn settings(&self) -> &UserSettings {
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
    pub const fn record(&self) -> &UserRecord {
        &self.record
    }

    /// Merges patch fields into the account and refreshes `updated_at`.
    pub fn apply(&mut self, patch: UserPatch, clock: &impl Clock) {
        let UserPatch {
            name,
            role,
            team_id,
            settings,
        } = patch;
        if let Some(value) = name {
            self.record.name = value;
        }
        if let Some(value) = role {
            self.record.role = value;
        }
        if let Some(value) = team_id {
            self.record.team_id = Some(value);
        }
        if let Some(value) = settings {
            self.record.settings = value;
        }
        self.record.updated_at = stored_instant(clock.utc());
    }
}

/// Partial update for a user account.
///
/// Serializes to a shallow document patch containing only the set fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New team role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// New owning team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Replacement preference record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
}

impl UserPatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            role: None,
            team_id: None,
            settings: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the team role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the owning team.
    #[must_use]
    pub const fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Replaces the preference record.
    #[must_use]
    pub fn with_settings(mut self, settings: UserSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}
