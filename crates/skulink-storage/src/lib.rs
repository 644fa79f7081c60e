//! skulink Storage Library
//!
//! This crate provides the object store abstraction used to persist uploaded image
//! bytes, with a local filesystem backend and an in-memory backend.
//!
//! # Object key format
//!
//! Every stored object lives under its own directory: `objects/{object_id}/{filename}`,
//! where `filename` is the sanitized upload filename. Keys must not contain `..` or a
//! leading `/`. Key generation is centralized in the `keys` module.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
#[cfg(feature = "storage-local")]
pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;
pub use traits::{ObjectStore, StorageError, StorageResult, StoredObject};
