//! Ordering sort key for tasks within a column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric sort key establishing task order within a column.
///
/// New tasks take the creation wall-clock time in milliseconds, so
/// sequentially created tasks sort in creation order. Keys are not unique
/// across concurrent actors; within a column, equal keys keep their
/// original array order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// First position in an empty column.
    pub const ZERO: Self = Self(0);

    /// Creates a position from a raw sort key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Derives a position from a timestamp, in milliseconds.
    #[must_use]
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp.timestamp_millis())
    }

    /// Returns the position immediately after this one.
    ///
    /// A third task already holding the successor key will collide and
    /// re-sort on the next reload; callers accept that.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the raw sort key.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
