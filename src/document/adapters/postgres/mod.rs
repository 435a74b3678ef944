//! `PostgreSQL` adapter for the document store port.

mod models;
mod schema;
mod store;

pub use store::{DocumentPgPool, PostgresDocumentStore};
