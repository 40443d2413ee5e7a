//! Driven port for the listing document store.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ListingKind, ListingRecord};

use super::define_port_error;

define_port_error! {
    /// Failures raised by document store adapters.
    pub enum DocumentRepositoryError {
        /// No connection to the store could be obtained.
        Connection { message: String } => "document store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "document store query failed: {message}",
        /// A stored row could not be converted to or from a record.
        Serialization { message: String } => "document encoding failed: {message}",
        /// Another document already uses the slug.
        DuplicateSlug { slug: String } => "slug already in use: {slug}",
    }
}

/// Persistence for listing documents.
///
/// Records are stored whole. Adapters do not interpret the body; they only
/// index `id`, `kind` and `slug`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Store a new record. Fails with `DuplicateSlug` when the slug is taken.
    async fn insert(&self, record: &ListingRecord) -> Result<(), DocumentRepositoryError>;

    /// Fetch a record of any kind by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ListingRecord>, DocumentRepositoryError>;

    /// Fetch a record of any kind by slug.
    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ListingRecord>, DocumentRepositoryError>;

    /// All records of one kind, newest first.
    async fn list(&self, kind: ListingKind) -> Result<Vec<ListingRecord>, DocumentRepositoryError>;

    /// Overwrite an existing record. Returns `false` when no row had the id.
    async fn replace(&self, record: &ListingRecord) -> Result<bool, DocumentRepositoryError>;

    /// Remove a record. Returns `false` when no row had the id.
    async fn delete(&self, id: &Uuid) -> Result<bool, DocumentRepositoryError>;
}
