#[cfg(feature = "storage-local")]
use crate::LocalObjectStore;
use crate::{ObjectStore, StorageResult};
use skulink_core::Config;
use std::sync::Arc;

/// Create the object store backend based on configuration
#[cfg(feature = "storage-local")]
pub async fn create_store(config: &Config) -> StorageResult<Arc<dyn ObjectStore>> {
    let store = LocalObjectStore::new(config.storage_path.clone()).await?;
    Ok(Arc::new(store))
}

/// Without a persistent backend, objects only live for the process lifetime
#[cfg(not(feature = "storage-local"))]
pub async fn create_store(_config: &Config) -> StorageResult<Arc<dyn ObjectStore>> {
    tracing::warn!("storage-local feature not enabled, using in-memory object store");
    Ok(Arc::new(crate::MemoryObjectStore::new()))
}
