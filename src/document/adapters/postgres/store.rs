//! `PostgreSQL`-backed document store.
//!
//! Documents live in a single JSONB table partitioned by a `collection`
//! column. Equality filters compile to one JSONB containment bind and
//! ordering to a `data -> field` expression, which `PostgreSQL` compares
//! numerically for numbers and lexically for strings.

use super::{
    models::{DocumentRow, NewDocumentRow},
    schema::documents,
};
use crate::document::{
    domain::{CollectionName, Document, DocumentId, Filter, Ordering, SortDirection},
    ports::{DocumentStore, DocumentStoreError, DocumentStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by the document adapter.
pub type DocumentPgPool = Pool<ConnectionManager<PgConnection>>;

const QUERY_ASCENDING_SQL: &str = concat!(
    "SELECT id, collection, data, created_at, updated_at FROM documents ",
    "WHERE collection = $1 AND data @> $2 ",
    "ORDER BY data -> $3 ASC",
);

const QUERY_DESCENDING_SQL: &str = concat!(
    "SELECT id, collection, data, created_at, updated_at FROM documents ",
    "WHERE collection = $1 AND data @> $2 ",
    "ORDER BY data -> $3 DESC",
);

const MERGE_PATCH_SQL: &str = concat!(
    "UPDATE documents SET data = data || $3, updated_at = $4 ",
    "WHERE collection = $1 AND id = $2",
);

/// `PostgreSQL`-backed document store.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore<C> {
    pool: DocumentPgPool,
    clock: Arc<C>,
}

impl<C> PostgresDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DocumentPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DocumentStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DocumentStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DocumentStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(DocumentStoreError::unavailable)?
    }
}

#[async_trait]
impl<C> DocumentStore for PostgresDocumentStore<C>
where
    C: Clock + Send + Sync,
{
    async fn query(
        &self,
        collection: CollectionName,
        filters: &[Filter],
        ordering: &Ordering,
    ) -> DocumentStoreResult<Vec<Document>> {
        let containment = containment_object(filters);
        let sql = match ordering.direction() {
            SortDirection::Ascending => QUERY_ASCENDING_SQL,
            SortDirection::Descending => QUERY_DESCENDING_SQL,
        };
        let order_field = ordering.field().to_owned();

        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(sql)
                .bind::<diesel::sql_types::Text, _>(collection.as_str())
                .bind::<diesel::sql_types::Jsonb, _>(containment)
                .bind::<diesel::sql_types::Text, _>(order_field)
                .load::<DocumentRow>(connection)
                .map_err(DocumentStoreError::unavailable)?;
            Ok(rows.into_iter().map(row_to_document).collect())
        })
        .await
    }

    async fn get(
        &self,
        collection: CollectionName,
        id: DocumentId,
    ) -> DocumentStoreResult<Option<Document>> {
        self.run_blocking(move |connection| {
            let row = documents::table
                .filter(documents::id.eq(id.into_inner()))
                .filter(documents::collection.eq(collection.as_str()))
                .select(DocumentRow::as_select())
                .first::<DocumentRow>(connection)
                .optional()
                .map_err(DocumentStoreError::unavailable)?;
            Ok(row.map(row_to_document))
        })
        .await
    }

    async fn add(&self, collection: CollectionName, data: Value) -> DocumentStoreResult<DocumentId> {
        let id = DocumentId::new();
        let new_row = new_row(collection, id, data, self.clock.utc());

        self.run_blocking(move |connection| {
            diesel::insert_into(documents::table)
                .values(&new_row)
                .execute(connection)
                .map_err(DocumentStoreError::unavailable)?;
            Ok(id)
        })
        .await
    }

    async fn set(
        &self,
        collection: CollectionName,
        id: DocumentId,
        data: Value,
    ) -> DocumentStoreResult<()> {
        let new_row = new_row(collection, id, data, self.clock.utc());

        self.run_blocking(move |connection| {
            diesel::insert_into(documents::table)
                .values(&new_row)
                .on_conflict(documents::id)
                .do_update()
                .set((
                    documents::data.eq(diesel::upsert::excluded(documents::data)),
                    documents::updated_at.eq(diesel::upsert::excluded(documents::updated_at)),
                ))
                .execute(connection)
                .map_err(DocumentStoreError::unavailable)?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        collection: CollectionName,
        id: DocumentId,
        patch: Value,
    ) -> DocumentStoreResult<()> {
        let now = self.clock.utc();

        self.run_blocking(move |connection| {
            let affected = diesel::sql_query(MERGE_PATCH_SQL)
                .bind::<diesel::sql_types::Text, _>(collection.as_str())
                .bind::<diesel::sql_types::Uuid, _>(id.into_inner())
                .bind::<diesel::sql_types::Jsonb, _>(patch)
                .bind::<diesel::sql_types::Timestamptz, _>(now)
                .execute(connection)
                .map_err(DocumentStoreError::unavailable)?;
            if affected == 0 {
                return Err(DocumentStoreError::not_found(collection, id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, collection: CollectionName, id: DocumentId) -> DocumentStoreResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                documents::table
                    .filter(documents::id.eq(id.into_inner()))
                    .filter(documents::collection.eq(collection.as_str())),
            )
            .execute(connection)
            .map_err(DocumentStoreError::unavailable)?;
            if affected == 0 {
                return Err(DocumentStoreError::not_found(collection, id));
            }
            Ok(())
        })
        .await
    }

    async fn batch_delete(
        &self,
        refs: &[(CollectionName, DocumentId)],
    ) -> DocumentStoreResult<()> {
        let owned_refs: Vec<(CollectionName, DocumentId)> = refs.to_vec();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|transaction| {
                    for (collection, id) in &owned_refs {
                        diesel::delete(
                            documents::table
                                .filter(documents::id.eq(id.into_inner()))
                                .filter(documents::collection.eq(collection.as_str())),
                        )
                        .execute(transaction)?;
                    }
                    Ok(())
                })
                .map_err(DocumentStoreError::unavailable)
        })
        .await
    }
}

/// Folds equality filters into a single JSONB containment object.
fn containment_object(filters: &[Filter]) -> Value {
    let mut object = Map::new();
    for filter in filters {
        object.insert(filter.field().to_owned(), filter.value().clone());
    }
    Value::Object(object)
}

fn new_row(
    collection: CollectionName,
    id: DocumentId,
    data: Value,
    now: DateTime<Utc>,
) -> NewDocumentRow {
    NewDocumentRow {
        id: id.into_inner(),
        collection: collection.as_str().to_owned(),
        data,
        created_at: now,
        updated_at: now,
    }
}

fn row_to_document(row: DocumentRow) -> Document {
    Document::new(DocumentId::from_uuid(row.id), row.data)
}
