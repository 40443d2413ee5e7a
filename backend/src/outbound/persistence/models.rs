//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::documents;

/// Row struct for reading from the documents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub kind: String,
    pub slug: String,
    pub owner_user_id: Uuid,
    pub owner_email: String,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating document records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub id: Uuid,
    pub kind: &'a str,
    pub slug: &'a str,
    pub owner_user_id: Uuid,
    pub owner_email: &'a str,
    pub body: &'a Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by `replace`. Identity and ownership never change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = documents)]
pub(crate) struct DocumentUpdate<'a> {
    pub body: &'a Value,
    pub updated_at: DateTime<Utc>,
}
