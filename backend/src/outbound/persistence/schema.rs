//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Listing documents of every kind.
    ///
    /// Metadata lives in typed columns; the normalised profile is stored
    /// whole in `body`.
    documents (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Listing kind, e.g. `teacher` or `non_teacher`.
        kind -> Text,
        /// URL slug, unique across kinds.
        slug -> Text,
        /// Owner's user id.
        owner_user_id -> Uuid,
        /// Owner's email at creation time.
        owner_email -> Text,
        /// Normalised profile document.
        body -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
