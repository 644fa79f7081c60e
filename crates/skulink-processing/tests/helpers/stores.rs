//! Object stores with scripted behaviour.

use async_trait::async_trait;
use bytes::Bytes;
use skulink_core::models::ObjectId;
use skulink_storage::{MemoryObjectStore, ObjectStore, StorageError, StorageResult, StoredObject};
use std::sync::Mutex;

/// Assigns the same id to every stored object and records deletions
pub struct FixedIdStore {
    pub id: ObjectId,
    deleted: Mutex<Vec<ObjectId>>,
}

impl FixedIdStore {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn deleted(&self) -> Vec<ObjectId> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FixedIdStore {
    async fn store_object(&self, data: Bytes, filename: &str) -> StorageResult<StoredObject> {
        Ok(StoredObject {
            id: self.id,
            key: format!("objects/{}/{}", self.id, filename),
            size_bytes: data.len() as u64,
        })
    }

    async fn delete_object(&self, id: ObjectId) -> StorageResult<bool> {
        self.deleted.lock().unwrap().push(id);
        Ok(true)
    }

    async fn exists(&self, id: ObjectId) -> StorageResult<bool> {
        Ok(id == self.id)
    }
}

/// Memory store whose deletes always fail
#[derive(Default)]
pub struct FailingDeleteStore {
    pub inner: MemoryObjectStore,
}

#[async_trait]
impl ObjectStore for FailingDeleteStore {
    async fn store_object(&self, data: Bytes, filename: &str) -> StorageResult<StoredObject> {
        self.inner.store_object(data, filename).await
    }

    async fn delete_object(&self, _id: ObjectId) -> StorageResult<bool> {
        Err(StorageError::DeleteFailed("permission denied".to_string()))
    }

    async fn exists(&self, id: ObjectId) -> StorageResult<bool> {
        self.inner.exists(id).await
    }
}

/// Store that refuses every write
pub struct FullStore;

#[async_trait]
impl ObjectStore for FullStore {
    async fn store_object(&self, _data: Bytes, _filename: &str) -> StorageResult<StoredObject> {
        Err(StorageError::UploadFailed("disk full".to_string()))
    }

    async fn delete_object(&self, _id: ObjectId) -> StorageResult<bool> {
        Ok(false)
    }

    async fn exists(&self, _id: ObjectId) -> StorageResult<bool> {
        Ok(false)
    }
}
