//! Timestamp precision shared with the collaborator.

use chrono::{DateTime, Utc};

/// Truncates a timestamp to the millisecond precision the collaborator
/// stores.
///
/// Records hold the truncated value from construction, so an aggregate
/// compares equal to itself after a store round trip.
#[must_use]
pub fn stored_instant(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp.timestamp_millis()).unwrap_or(timestamp)
}
