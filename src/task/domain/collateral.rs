//! Collateral records carried on a task document.

use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estimated, logged, and remaining effort in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTracking {
    /// Estimated effort.
    pub estimated: u32,
    /// Effort logged so far.
    pub logged: u32,
    /// Effort believed to remain.
    pub remaining: u32,
}

impl TimeTracking {
    /// Returns a record with all counters at zero.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            estimated: 0,
            logged: 0,
            remaining: 0,
        }
    }
}

/// Discussion comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment author.
    pub author_id: UserId,
    /// Comment body.
    pub content: String,
    /// When the comment was written, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Users mentioned in the body.
    #[serde(default)]
    pub mentions: Vec<UserId>,
}

/// File attachment referenced by a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Uploading user.
    pub uploaded_by: UserId,
    /// Stored file name.
    pub filename: String,
    /// Download location.
    pub url: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Declared media type.
    pub mime_type: String,
}
