//! Diesel schema for collaborator document persistence.

diesel::table! {
    /// JSON documents grouped into named collections.
    documents (id) {
        /// Document identifier.
        id -> Uuid,
        /// Owning collection name.
        #[max_length = 100]
        collection -> Varchar,
        /// Document payload.
        data -> Jsonb,
        /// Row creation timestamp.
        created_at -> Timestamptz,
        /// Row update timestamp.
        updated_at -> Timestamptz,
    }
}
