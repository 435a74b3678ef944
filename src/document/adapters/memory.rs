//! In-memory document store for tests and local development.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::document::{
    domain::{CollectionName, Document, DocumentId, Filter, Ordering, SortDirection},
    ports::{DocumentStore, DocumentStoreError, DocumentStoreResult},
};

/// Thread-safe in-memory document store.
///
/// Documents are held per collection in insertion order, which keeps query
/// results deterministic and makes ordering ties resolve by original array
/// order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<InMemoryDocumentState>>,
}

#[derive(Debug, Default)]
struct InMemoryDocumentState {
    collections: HashMap<CollectionName, Vec<StoredDocument>>,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    id: DocumentId,
    data: Value,
}

impl InMemoryDocumentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_failure(err: impl std::fmt::Display) -> DocumentStoreError {
    DocumentStoreError::unavailable(std::io::Error::other(err.to_string()))
}

fn matches_filters(data: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|filter| data.get(filter.field()) == Some(filter.value()))
}

/// Compares two field values the way the backing store sorts them: numbers
/// numerically, strings lexically, anything else as equal.
fn compare_fields(left: &Value, right: &Value) -> CmpOrdering {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l
            .as_f64()
            .zip(r.as_f64())
            .map_or(CmpOrdering::Equal, |(x, y)| x.total_cmp(&y)),
        (Value::String(l), Value::String(r)) => l.cmp(r),
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        _ => CmpOrdering::Equal,
    }
}

fn remove_document(
    collections: &mut HashMap<CollectionName, Vec<StoredDocument>>,
    collection: CollectionName,
    id: DocumentId,
) -> bool {
    collections.get_mut(&collection).is_some_and(|documents| {
        let before = documents.len();
        documents.retain(|document| document.id != id);
        documents.len() < before
    })
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn query(
        &self,
        collection: CollectionName,
        filters: &[Filter],
        ordering: &Ordering,
    ) -> DocumentStoreResult<Vec<Document>> {
        let state = self.state.read().map_err(lock_failure)?;
        let mut matched: Vec<Document> = state
            .collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches_filters(&document.data, filters))
                    .map(|document| Document::new(document.id, document.data.clone()))
                    .collect()
            })
            .unwrap_or_default();

        // Stable sort: equal keys keep insertion order.
        matched.sort_by(|a, b| {
            let left = a.data().get(ordering.field()).unwrap_or(&Value::Null);
            let right = b.data().get(ordering.field()).unwrap_or(&Value::Null);
            match ordering.direction() {
                SortDirection::Ascending => compare_fields(left, right),
                SortDirection::Descending => compare_fields(right, left),
            }
        });
        Ok(matched)
    }

    async fn get(
        &self,
        collection: CollectionName,
        id: DocumentId,
    ) -> DocumentStoreResult<Option<Document>> {
        let state = self.state.read().map_err(lock_failure)?;
        let document = state.collections.get(&collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| document.id == id)
                .map(|document| Document::new(document.id, document.data.clone()))
        });
        Ok(document)
    }

    async fn add(&self, collection: CollectionName, data: Value) -> DocumentStoreResult<DocumentId> {
        let mut state = self.state.write().map_err(lock_failure)?;
        let id = DocumentId::new();
        state
            .collections
            .entry(collection)
            .or_default()
            .push(StoredDocument { id, data });
        Ok(id)
    }

    async fn set(
        &self,
        collection: CollectionName,
        id: DocumentId,
        data: Value,
    ) -> DocumentStoreResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        let documents = state.collections.entry(collection).or_default();
        match documents.iter_mut().find(|document| document.id == id) {
            Some(existing) => existing.data = data,
            None => documents.push(StoredDocument { id, data }),
        }
        Ok(())
    }

    async fn update(
        &self,
        collection: CollectionName,
        id: DocumentId,
        patch: Value,
    ) -> DocumentStoreResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        let existing = state
            .collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|document| document.id == id))
            .ok_or(DocumentStoreError::not_found(collection, id))?;

        let Value::Object(fields) = patch else {
            return Err(DocumentStoreError::unavailable(std::io::Error::other(
                "update patch must be a JSON object",
            )));
        };
        let Value::Object(target) = &mut existing.data else {
            return Err(DocumentStoreError::unavailable(std::io::Error::other(
                "stored document is not a JSON object",
            )));
        };
        for (key, value) in fields {
            target.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: CollectionName, id: DocumentId) -> DocumentStoreResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        if remove_document(&mut state.collections, collection, id) {
            Ok(())
        } else {
            Err(DocumentStoreError::not_found(collection, id))
        }
    }

    async fn batch_delete(
        &self,
        refs: &[(CollectionName, DocumentId)],
    ) -> DocumentStoreResult<()> {
        // Single write lock covers the whole batch, so it applies atomically
        // with respect to other store calls.
        let mut state = self.state.write().map_err(lock_failure)?;
        for (collection, id) in refs {
            remove_document(&mut state.collections, *collection, *id);
        }
        Ok(())
    }
}
