//! Stored listing documents.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::facets::Facets;
use super::kind::ListingKind;
use crate::domain::Owner;

/// A listing as persisted: metadata columns plus the normalised JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    /// Primary key.
    pub id: Uuid,
    /// Listing kind.
    pub kind: ListingKind,
    /// Unique URL slug.
    pub slug: String,
    /// Who created the listing.
    pub owner: Owner,
    /// Normalised profile document.
    pub body: Value,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl ListingRecord {
    /// Filterable facets of the stored body.
    #[must_use]
    pub fn facets(&self) -> Facets {
        self.kind.facets(&self.body)
    }
}
