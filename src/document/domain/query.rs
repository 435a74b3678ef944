//! Query constraints for document collections.

use serde_json::Value;

/// Equality constraint on a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: String,
    value: Value,
}

impl Filter {
    /// Creates a filter requiring `field` to equal `value`.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns the constrained field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the required field value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// Result ordering over a top-level document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    field: String,
    direction: SortDirection,
}

impl Ordering {
    /// Orders results by `field`, smallest value first.
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Orders results by `field`, largest value first.
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Returns the ordering field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}
