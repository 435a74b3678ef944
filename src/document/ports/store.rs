//! Store port for document persistence and lookup.

use crate::document::domain::{CollectionName, Document, DocumentId, Filter, Ordering};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Generic CRUD contract over the hosted document collaborator.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection` matching all of `filters`,
    /// sorted by `ordering`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Unavailable`] when the collaborator
    /// call fails.
    async fn query(
        &self,
        collection: CollectionName,
        filters: &[Filter],
        ordering: &Ordering,
    ) -> DocumentStoreResult<Vec<Document>>;

    /// Fetches a single document.
    ///
    /// Returns `None` when the document does not exist.
    async fn get(
        &self,
        collection: CollectionName,
        id: DocumentId,
    ) -> DocumentStoreResult<Option<Document>>;

    /// Stores a new document and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Unavailable`] when persistence fails.
    async fn add(&self, collection: CollectionName, data: Value) -> DocumentStoreResult<DocumentId>;

    /// Creates or replaces the document at a caller-chosen identifier.
    ///
    /// Used for records keyed to an external identity, where the identifier
    /// is assigned outside the store.
    async fn set(
        &self,
        collection: CollectionName,
        id: DocumentId,
        data: Value,
    ) -> DocumentStoreResult<()>;

    /// Merges the top-level fields of `patch` into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when the document does not
    /// exist.
    async fn update(
        &self,
        collection: CollectionName,
        id: DocumentId,
        patch: Value,
    ) -> DocumentStoreResult<()>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when the document does not
    /// exist.
    async fn delete(&self, collection: CollectionName, id: DocumentId) -> DocumentStoreResult<()>;

    /// Atomically deletes every referenced document.
    ///
    /// References to already-missing documents are skipped so a cascade
    /// cannot fail halfway through.
    async fn batch_delete(
        &self,
        refs: &[(CollectionName, DocumentId)],
    ) -> DocumentStoreResult<()>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// The referenced document does not exist.
    #[error("document not found: {collection}/{id}")]
    NotFound {
        /// Collection that was searched.
        collection: CollectionName,
        /// Identifier that was not found.
        id: DocumentId,
    },

    /// The collaborator call failed.
    #[error("document store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Creates a not-found error for `collection` and `id`.
    #[must_use]
    pub const fn not_found(collection: CollectionName, id: DocumentId) -> Self {
        Self::NotFound { collection, id }
    }

    /// Wraps a collaborator failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
