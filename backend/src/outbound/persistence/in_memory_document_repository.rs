//! Process-local `DocumentRepository` used without a database and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{ListingKind, ListingRecord};

/// Documents held in a map keyed by id. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<Uuid, ListingRecord>>,
}

impl InMemoryDocumentRepository {
    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert(&self, record: &ListingRecord) -> Result<(), DocumentRepositoryError> {
        let mut documents = self.documents.write().await;
        if documents.values().any(|stored| stored.slug == record.slug) {
            return Err(DocumentRepositoryError::duplicate_slug(record.slug.clone()));
        }
        if documents.contains_key(&record.id) {
            return Err(DocumentRepositoryError::query(format!(
                "document {} already exists",
                record.id
            )));
        }
        documents.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ListingRecord>, DocumentRepositoryError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ListingRecord>, DocumentRepositoryError> {
        Ok(self
            .documents
            .read()
            .await
            .values()
            .find(|record| record.slug == slug)
            .cloned())
    }

    async fn list(&self, kind: ListingKind) -> Result<Vec<ListingRecord>, DocumentRepositoryError> {
        let mut records: Vec<ListingRecord> = self
            .documents
            .read()
            .await
            .values()
            .filter(|record| record.kind == kind)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn replace(&self, record: &ListingRecord) -> Result<bool, DocumentRepositoryError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&record.id) {
            Some(stored) => {
                stored.body = record.body.clone();
                stored.updated_at = record.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DocumentRepositoryError> {
        Ok(self.documents.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, Owner, UserId};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn record(kind: ListingKind, slug: &str, minutes: i64) -> ListingRecord {
        let at = base_time() + Duration::minutes(minutes);
        ListingRecord {
            id: Uuid::new_v4(),
            kind,
            slug: slug.to_owned(),
            owner: Owner::new(
                UserId::random(),
                Email::new("owner@example.com").expect("fixture email"),
            ),
            body: json!({ "name": slug }),
            created_at: at,
            updated_at: at,
        }
    }

    #[fixture]
    fn repo() -> InMemoryDocumentRepository {
        InMemoryDocumentRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn stored_documents_are_found_by_id_and_slug(repo: InMemoryDocumentRepository) {
        let stored = record(ListingKind::School, "green-valley-1", 0);
        repo.insert(&stored).await.expect("insert");

        assert_eq!(repo.find_by_id(&stored.id).await.expect("find"), Some(stored.clone()));
        assert_eq!(
            repo.find_by_slug("green-valley-1").await.expect("find"),
            Some(stored)
        );
        assert_eq!(repo.find_by_slug("missing").await.expect("find"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn slugs_are_unique_across_kinds(repo: InMemoryDocumentRepository) {
        repo.insert(&record(ListingKind::School, "shared-1", 0))
            .await
            .expect("first insert");

        let err = repo
            .insert(&record(ListingKind::Coaching, "shared-1", 1))
            .await
            .expect_err("duplicate slug");

        assert_eq!(err, DocumentRepositoryError::duplicate_slug("shared-1"));
        assert_eq!(repo.len().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn list_returns_one_kind_newest_first(repo: InMemoryDocumentRepository) {
        for (kind, slug, minutes) in [
            (ListingKind::Parent, "older-1", 0),
            (ListingKind::Student, "other-kind-1", 5),
            (ListingKind::Parent, "newer-1", 10),
        ] {
            repo.insert(&record(kind, slug, minutes)).await.expect("insert");
        }

        let parents = repo.list(ListingKind::Parent).await.expect("list");

        let slugs: Vec<&str> = parents.iter().map(|record| record.slug.as_str()).collect();
        assert_eq!(slugs, ["newer-1", "older-1"]);
    }

    #[rstest]
    #[tokio::test]
    async fn replace_only_touches_body_and_updated_at(repo: InMemoryDocumentRepository) {
        let stored = record(ListingKind::Vacancy, "maths-teacher-1", 0);
        repo.insert(&stored).await.expect("insert");
        let mut changed = stored.clone();
        changed.slug = "renamed-1".to_owned();
        changed.body = json!({ "title": "Physics Teacher" });
        changed.updated_at = base_time() + Duration::hours(1);

        assert!(repo.replace(&changed).await.expect("replace"));

        let reloaded = repo
            .find_by_id(&stored.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(reloaded.slug, "maths-teacher-1");
        assert_eq!(reloaded.body, changed.body);
        assert_eq!(reloaded.updated_at, changed.updated_at);
        assert_eq!(reloaded.created_at, stored.created_at);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_ids_report_false(repo: InMemoryDocumentRepository) {
        let absent = record(ListingKind::Teacher, "ghost-1", 0);

        assert!(!repo.replace(&absent).await.expect("replace"));
        assert!(!repo.delete(&absent.id).await.expect("delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_the_document(repo: InMemoryDocumentRepository) {
        let stored = record(ListingKind::NonTeacher, "lab-assistant-1", 0);
        repo.insert(&stored).await.expect("insert");

        assert!(repo.delete(&stored.id).await.expect("delete"));
        assert!(repo.is_empty().await);
    }
}
