//! skulink Catalog Library
//!
//! Backends for the [`Catalog`](skulink_core::Catalog) collaborator: an in-memory
//! catalog indexed by product id and exact SKU, and a JSON snapshot catalog that
//! loads from and persists to a file.

pub mod json;
pub mod memory;
pub mod snapshot;

pub use json::JsonCatalog;
pub use memory::InMemoryCatalog;
pub use snapshot::{AttachmentEntry, CatalogSnapshot, ProductEntry};
