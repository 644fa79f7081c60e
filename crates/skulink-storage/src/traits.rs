//! Object store abstraction trait
//!
//! This module defines the ObjectStore trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use skulink_core::models::ObjectId;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Handle to a persisted object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub id: ObjectId,
    pub key: String,
    pub size_bytes: u64,
}

/// Object store abstraction trait
///
/// Backends assign the object id. Deleting an unknown id is not an error; it
/// reports `false`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Persist `data` as a new object named after `filename`
    async fn store_object(&self, data: Bytes, filename: &str) -> StorageResult<StoredObject>;

    /// Delete an object, returning whether it existed
    async fn delete_object(&self, id: ObjectId) -> StorageResult<bool>;

    /// Check if an object exists
    async fn exists(&self, id: ObjectId) -> StorageResult<bool>;
}
