//! PostgreSQL-backed `DocumentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{Email, ListingKind, ListingRecord, Owner, UnknownListingKind, UserId};

use super::models::{DocumentRow, DocumentUpdate, NewDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::documents;

/// Diesel-backed implementation of the `DocumentRepository` port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DocumentRepositoryError {
    DocumentRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> DocumentRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DocumentRepositoryError::connection("database connection error")
        }
        DieselError::DeserializationError(err) | DieselError::SerializationError(err) => {
            DocumentRepositoryError::serialization(err.to_string())
        }
        DieselError::QueryBuilderError(_) => DocumentRepositoryError::query("database query error"),
        _ => DocumentRepositoryError::query("database error"),
    }
}

/// As [`map_diesel_error`], reporting a unique violation as a taken slug.
///
/// `slug` carries the only unique index besides the primary key, and ids are
/// random v4 UUIDs.
fn map_insert_error(error: diesel::result::Error, slug: &str) -> DocumentRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DocumentRepositoryError::duplicate_slug(slug)
        }
        other => map_diesel_error(other),
    }
}

fn row_to_record(row: DocumentRow) -> Result<ListingRecord, DocumentRepositoryError> {
    let kind: ListingKind = row
        .kind
        .parse()
        .map_err(|err: UnknownListingKind| DocumentRepositoryError::serialization(err.to_string()))?;
    let email = Email::new(&row.owner_email).map_err(|err| {
        DocumentRepositoryError::serialization(format!("owner email of {}: {err}", row.id))
    })?;
    Ok(ListingRecord {
        id: row.id,
        kind,
        slug: row.slug,
        owner: Owner::new(UserId::from_uuid(row.owner_user_id), email),
        body: row.body,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_records(rows: Vec<DocumentRow>) -> Result<Vec<ListingRecord>, DocumentRepositoryError> {
    rows.into_iter().map(row_to_record).collect()
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn insert(&self, record: &ListingRecord) -> Result<(), DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDocumentRow {
            id: record.id,
            kind: record.kind.as_str(),
            slug: &record.slug,
            owner_user_id: *record.owner.user_id().as_uuid(),
            owner_email: record.owner.email().as_ref(),
            body: &record.body,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };

        diesel::insert_into(documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, &record.slug))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ListingRecord>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DocumentRow> = documents::table
            .find(*id)
            .select(DocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ListingRecord>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DocumentRow> = documents::table
            .filter(documents::slug.eq(slug))
            .select(DocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn list(&self, kind: ListingKind) -> Result<Vec<ListingRecord>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::kind.eq(kind.as_str()))
            .order((documents::created_at.desc(), documents::id.desc()))
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_records(rows)
    }

    async fn replace(&self, record: &ListingRecord) -> Result<bool, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = DocumentUpdate {
            body: &record.body,
            updated_at: record.updated_at,
        };
        let affected = diesel::update(documents::table.find(record.id))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(documents::table.find(*id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
