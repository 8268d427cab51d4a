//! Process-local [`Repository`] backing the test suites.

use crate::model::Record;
use crate::repository::record_repo::Repository;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use std::sync::RwLock;

pub struct MemoryRepository<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        MemoryRepository {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<std::sync::RwLockReadGuard<'_, Vec<T>>> {
        self.records
            .read()
            .map_err(|_| RepositoryError::database("memory store lock poisoned"))
    }

    fn write(&self) -> RepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<T>>> {
        self.records
            .write()
            .map_err(|_| RepositoryError::database("memory store lock poisoned"))
    }

    /// Mimics a unique index: fails when another record shares a unique field value.
    fn check_unique(records: &[T], candidate: &T) -> RepositoryResult<()> {
        if T::UNIQUE_FIELDS.is_empty() {
            return Ok(());
        }
        let candidate_doc = bson::to_document(candidate)?;
        for other in records.iter().filter(|other| other.id() != candidate.id()) {
            let other_doc = bson::to_document(other)?;
            for field in T::UNIQUE_FIELDS {
                if candidate_doc.get(*field).is_some() && candidate_doc.get(*field) == other_doc.get(*field) {
                    return Err(RepositoryError::already_exists(format!(
                        "E11000 duplicate key error collection: {} index: {}_1",
                        T::COLLECTION,
                        field
                    )));
                }
            }
        }
        Ok(())
    }
}

fn matches<T: Record>(record: &T, filter: &Document) -> bool {
    match bson::to_document(record) {
        Ok(doc) => filter.iter().all(|(key, value)| doc.get(key) == Some(value)),
        Err(_) => false,
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn insert(&self, mut record: T) -> RepositoryResult<T> {
        record.set_id(ObjectId::new());
        record.touch(&chrono::Local::now().to_rfc3339(), true);
        let mut records = self.write()?;
        Self::check_unique(&records, &record)?;
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>> {
        Ok(self.read()?.iter().find(|r| r.id().as_ref() == Some(id)).cloned())
    }

    async fn find_one(&self, filter: Document) -> RepositoryResult<Option<T>> {
        Ok(self.read()?.iter().find(|r| matches(*r, &filter)).cloned())
    }

    async fn find_many(&self, filter: Option<Document>) -> RepositoryResult<Vec<T>> {
        let records = self.read()?;
        Ok(match filter {
            Some(filter) => records.iter().filter(|r| matches(*r, &filter)).cloned().collect(),
            None => records.clone(),
        })
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<T>> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.id().map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn replace(&self, id: &ObjectId, mut record: T) -> RepositoryResult<T> {
        record.set_id(*id);
        record.touch(&chrono::Local::now().to_rfc3339(), false);
        let mut records = self.write()?;
        Self::check_unique(&records, &record)?;
        let slot = records
            .iter_mut()
            .find(|r| r.id().as_ref() == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No document found to update for ID: {}", id)))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|r| r.id().as_ref() != Some(id));
        if records.len() == before {
            return Err(RepositoryError::not_found(format!("No document found to delete for ID: {}", id)));
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.read()?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::member::Member;
    use bson::doc;

    fn member(email: &str) -> Member {
        Member {
            id: None,
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            email: email.to_string(),
            address: "1 rue de la Paix".to_string(),
            phone: "0600000000".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let repo = MemoryRepository::<Member>::new();
        let stored = repo.insert(member("d@x.com")).await.unwrap();
        assert!(stored.id.is_some());
        assert!(stored.created_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unique_email_is_enforced_on_insert_and_replace() {
        let repo = MemoryRepository::<Member>::new();
        repo.insert(member("a@x.com")).await.unwrap();
        let second = repo.insert(member("b@x.com")).await.unwrap();

        let dup = repo.insert(member("a@x.com")).await;
        assert!(matches!(dup, Err(RepositoryError::AlreadyExists(_))));

        let mut changed = second.clone();
        changed.email = "a@x.com".to_string();
        let res = repo.replace(&second.id.unwrap(), changed).await;
        assert!(matches!(res, Err(RepositoryError::AlreadyExists(_))));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn equality_filters_select_matching_records() {
        let repo = MemoryRepository::<Member>::new();
        repo.insert(member("a@x.com")).await.unwrap();
        repo.insert(member("b@x.com")).await.unwrap();

        let found = repo.find_one(doc! { "email": "b@x.com" }).await.unwrap();
        assert_eq!(found.unwrap().email, "b@x.com");
        let all = repo.find_many(Some(doc! { "nom": "Dupont" })).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(repo.find_one(doc! { "email": "c@x.com" }).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let repo = MemoryRepository::<Member>::new();
        let stored = repo.insert(member("a@x.com")).await.unwrap();
        let id = stored.id.unwrap();
        repo.delete(&id).await.unwrap();
        assert!(matches!(repo.delete(&id).await, Err(RepositoryError::NotFound(_))));
    }
}
