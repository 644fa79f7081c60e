//! skulink Core Library
//!
//! This crate provides the domain models, error types, configuration, filename/SKU
//! validation and the catalog collaborator trait shared across all skulink components.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CatalogResult, NewAttachment};
pub use config::{Config, ConfigError, EngineConfig};
pub use error::{AttachError, ErrorMetadata, LogLevel, TransportError};
// Note: ObjectStore and StorageError live in the skulink-storage crate.
