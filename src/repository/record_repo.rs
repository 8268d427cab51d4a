use crate::model::Record;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::{error, info};

/// Persistence contract shared by every collection.
///
/// Filters are plain equality documents (`{ "email": "a@b.c" }`), which keeps
/// them portable across backends.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Assigns a fresh id and timestamps, then stores the record.
    async fn insert(&self, record: T) -> RepositoryResult<T>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>>;
    async fn find_one(&self, filter: Document) -> RepositoryResult<Option<T>>;
    async fn find_many(&self, filter: Option<Document>) -> RepositoryResult<Vec<T>>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<T>>;
    /// Replaces the stored document, refreshing `updatedAt`.
    async fn replace(&self, id: &ObjectId, record: T) -> RepositoryResult<T>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoRepository<T: Record> {
    collection: Collection<T>,
}

impl<T: Record> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        MongoRepository {
            collection: db.collection::<T>(T::COLLECTION),
        }
    }

    /// Create the unique indexes declared by the record type.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        for field in T::UNIQUE_FIELDS {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            let model = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection.create_index(model, None).await?;
            info!("Unique index on {}.{} ensured", T::COLLECTION, field);
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MongoRepository<T> {
    #[tracing::instrument(skip(self, record), fields(collection = T::COLLECTION))]
    async fn insert(&self, mut record: T) -> RepositoryResult<T> {
        record.set_id(ObjectId::new());
        record.touch(&chrono::Local::now().to_rfc3339(), true);

        match self.collection.insert_one(&record, None).await {
            Ok(_) => {
                info!("Document created successfully");
                Ok(record)
            }
            Err(e) => {
                error!("Failed to create document: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn find_one(&self, filter: Document) -> RepositoryResult<Option<T>> {
        self.collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch from {}: {}", T::COLLECTION, e)))
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_many(&self, filter: Option<Document>) -> RepositoryResult<Vec<T>> {
        let cursor = self
            .collection
            .find(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list {}: {}", T::COLLECTION, e)))?;
        let records: Vec<T> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to read {}: {}", T::COLLECTION, e)))?;
        info!("Fetched {} documents", records.len());
        Ok(records)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_many(Some(doc! { "_id": { "$in": ids.to_vec() } })).await
    }

    #[tracing::instrument(skip(self, record), fields(collection = T::COLLECTION, id = %id))]
    async fn replace(&self, id: &ObjectId, mut record: T) -> RepositoryResult<T> {
        record.set_id(*id);
        record.touch(&chrono::Local::now().to_rfc3339(), false);

        let result = self.collection.replace_one(doc! { "_id": id }, &record, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Document updated successfully");
                Ok(record)
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No document found to update for ID: {}", id))),
            Err(e) => {
                error!("Failed to update document: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION, id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Document deleted successfully");
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No document found to delete for ID: {}", id))),
            Err(e) => {
                error!("Failed to delete document: {}", e);
                Err(RepositoryError::database(format!("Failed to delete document: {}", e)))
            }
        }
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count {}: {}", T::COLLECTION, e)))
    }
}
