//! Driving port for listing reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, ListingFilter, ListingKind, ListingRecord};

/// Read access to listings. Reads never require a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// Fetch one listing by id; `not_found` when missing or of another kind.
    async fn get(&self, kind: ListingKind, id: Uuid) -> Result<ListingRecord, Error>;

    /// Fetch one listing by slug.
    async fn get_by_slug(&self, kind: ListingKind, slug: &str) -> Result<ListingRecord, Error>;

    /// All listings of `kind` matching `filter`, newest first.
    async fn list(
        &self,
        kind: ListingKind,
        filter: &ListingFilter,
    ) -> Result<Vec<ListingRecord>, Error>;
}
