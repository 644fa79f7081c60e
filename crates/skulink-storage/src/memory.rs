//! In-memory object store for tests and dry runs.

use crate::keys::generate_object_key;
use crate::traits::{ObjectStore, StorageResult, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use skulink_core::models::ObjectId;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory object store.
///
/// Objects are kept in a `HashMap` behind a [`RwLock`], so all trait methods
/// operate on `&self` without external synchronisation.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, (String, Bytes)>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Stored bytes of an object
    pub async fn get(&self, id: ObjectId) -> Option<Bytes> {
        self.objects.read().await.get(&id).map(|(_, data)| data.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn store_object(&self, data: Bytes, filename: &str) -> StorageResult<StoredObject> {
        let id = ObjectId::new();
        let key = generate_object_key(id, filename);
        let size_bytes = data.len() as u64;
        self.objects.write().await.insert(id, (key.clone(), data));
        tracing::debug!(object_id = %id, key = %key, size_bytes, "Memory object store upload");
        Ok(StoredObject { id, key, size_bytes })
    }

    async fn delete_object(&self, id: ObjectId) -> StorageResult<bool> {
        Ok(self.objects.write().await.remove(&id).is_some())
    }

    async fn exists(&self, id: ObjectId) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(&id))
    }
}
