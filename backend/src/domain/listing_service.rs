//! Listing service implementing the listing command and query ports.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ports::{
    DocumentRepository, DocumentRepositoryError, ListingCommand, ListingQuery,
};
use crate::domain::{
    Error, ListingFilter, ListingKind, ListingRecord, Owner, Principal, authorize_mutation,
    generate_slug,
};

/// Listing use-cases backed by a [`DocumentRepository`].
#[derive(Clone)]
pub struct ListingService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ListingService<R> {
    /// Create a service over a repository and a clock.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use marketplace::domain::ListingService;
    /// # use marketplace::outbound::persistence::InMemoryDocumentRepository;
    /// # use mockable::DefaultClock;
    /// let service = ListingService::new(
    ///     Arc::new(InMemoryDocumentRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

pub(crate) fn map_document_error(error: DocumentRepositoryError) -> Error {
    match error {
        DocumentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("document store unavailable: {message}"))
        }
        DocumentRepositoryError::Query { message } => {
            Error::internal(format!("document store error: {message}"))
        }
        DocumentRepositoryError::Serialization { message } => {
            Error::internal(format!("stored document is unreadable: {message}"))
        }
        DocumentRepositoryError::DuplicateSlug { slug } => {
            Error::internal(format!("could not allocate a unique slug: {slug}"))
        }
    }
}

fn listing_not_found(kind: ListingKind, reference: impl std::fmt::Display) -> Error {
    Error::not_found(format!("{kind} {reference} not found"))
}

impl<R> ListingService<R>
where
    R: DocumentRepository,
{
    async fn load(&self, kind: ListingKind, id: Uuid) -> Result<ListingRecord, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(map_document_error)?
            .filter(|record| record.kind == kind)
            .ok_or_else(|| listing_not_found(kind, id))
    }

    async fn insert_with_fresh_slug(
        &self,
        mut record: ListingRecord,
        display_name: &str,
    ) -> Result<ListingRecord, Error> {
        match self.repo.insert(&record).await {
            Ok(()) => return Ok(record),
            Err(DocumentRepositoryError::DuplicateSlug { .. }) => {}
            Err(err) => return Err(map_document_error(err)),
        }

        // Same-millisecond creations share a slug; retry once with a later stamp.
        let retry_at = self
            .clock
            .utc()
            .max(record.created_at + TimeDelta::milliseconds(1));
        record.slug = generate_slug(display_name, retry_at);
        self.repo
            .insert(&record)
            .await
            .map_err(map_document_error)?;
        Ok(record)
    }

    fn stamp(&self, created_at: Option<DateTime<Utc>>) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = self.clock.utc();
        (created_at.unwrap_or(now), now)
    }
}

#[async_trait]
impl<R> ListingCommand for ListingService<R>
where
    R: DocumentRepository,
{
    async fn create(
        &self,
        principal: &Principal,
        kind: ListingKind,
        body: Value,
    ) -> Result<ListingRecord, Error> {
        let normalized = kind.normalize_body(body)?;
        let (created_at, updated_at) = self.stamp(None);
        let record = ListingRecord {
            id: Uuid::new_v4(),
            kind,
            slug: generate_slug(&normalized.display_name, created_at),
            owner: Owner::from_principal(principal),
            body: normalized.body,
            created_at,
            updated_at,
        };
        self.insert_with_fresh_slug(record, &normalized.display_name)
            .await
    }

    async fn update(
        &self,
        principal: &Principal,
        kind: ListingKind,
        id: Uuid,
        body: Value,
    ) -> Result<ListingRecord, Error> {
        let existing = self.load(kind, id).await?;
        authorize_mutation(principal, &existing.owner)?;
        let normalized = kind.normalize_body(body)?;
        let (created_at, updated_at) = self.stamp(Some(existing.created_at));
        let record = ListingRecord {
            body: normalized.body,
            created_at,
            updated_at,
            ..existing
        };
        let replaced = self
            .repo
            .replace(&record)
            .await
            .map_err(map_document_error)?;
        if replaced {
            Ok(record)
        } else {
            Err(listing_not_found(kind, id))
        }
    }

    async fn delete(
        &self,
        principal: &Principal,
        kind: ListingKind,
        id: Uuid,
    ) -> Result<(), Error> {
        let existing = self.load(kind, id).await?;
        authorize_mutation(principal, &existing.owner)?;
        let removed = self
            .repo
            .delete(&id)
            .await
            .map_err(map_document_error)?;
        if removed {
            Ok(())
        } else {
            Err(listing_not_found(kind, id))
        }
    }
}

#[async_trait]
impl<R> ListingQuery for ListingService<R>
where
    R: DocumentRepository,
{
    async fn get(&self, kind: ListingKind, id: Uuid) -> Result<ListingRecord, Error> {
        self.load(kind, id).await
    }

    async fn get_by_slug(&self, kind: ListingKind, slug: &str) -> Result<ListingRecord, Error> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(map_document_error)?
            .filter(|record| record.kind == kind)
            .ok_or_else(|| listing_not_found(kind, slug))
    }

    async fn list(
        &self,
        kind: ListingKind,
        filter: &ListingFilter,
    ) -> Result<Vec<ListingRecord>, Error> {
        let records = self.repo.list(kind).await.map_err(map_document_error)?;
        if filter.is_empty() {
            return Ok(records);
        }
        Ok(records
            .into_iter()
            .filter(|record| filter.matches(&record.facets(), &record.owner))
            .collect())
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
