//! Driving port for listing mutations.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Error, ListingKind, ListingRecord, Principal};

/// Create, update and delete listings on behalf of an authenticated caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCommand: Send + Sync {
    /// Validate `body` for `kind` and store it owned by `principal`.
    async fn create(
        &self,
        principal: &Principal,
        kind: ListingKind,
        body: Value,
    ) -> Result<ListingRecord, Error>;

    /// Replace the body of an existing listing.
    async fn update(
        &self,
        principal: &Principal,
        kind: ListingKind,
        id: Uuid,
        body: Value,
    ) -> Result<ListingRecord, Error>;

    /// Remove a listing.
    async fn delete(
        &self,
        principal: &Principal,
        kind: ListingKind,
        id: Uuid,
    ) -> Result<(), Error>;
}
