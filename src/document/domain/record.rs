//! Fetched document representation.

use super::DocumentId;
use serde_json::Value;

/// A document fetched from the collaborator.
///
/// The payload is an untyped JSON object; owning contexts convert it to and
/// from their domain aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    data: Value,
}

impl Document {
    /// Creates a document from its identifier and payload.
    #[must_use]
    pub const fn new(id: DocumentId, data: Value) -> Self {
        Self { id, data }
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the document payload.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Consumes the document, returning its payload.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }
}
