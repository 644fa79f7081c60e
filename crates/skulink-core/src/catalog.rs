//! Catalog collaborator interface
//!
//! The product catalog is owned by an external system. The engine only reads and
//! writes it through this trait, so any store (an e-commerce database, a JSON
//! snapshot, an in-memory map for tests) can back a batch.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{GalleryImages, ObjectId, ProductDisplay, ProductId, ProductRef};

/// Catalog operation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Attachment already exists: {0}")]
    AttachmentExists(ObjectId),

    #[error("Catalog rejected update: {0}")]
    Rejected(String),

    #[error("Catalog backend error: {0}")]
    Backend(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Attachment entity registered for a freshly stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub object_id: ObjectId,
    pub product_id: ProductId,
    pub title: String,
    pub mime_type: String,
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Exact SKU lookup
    async fn find_product_id_by_sku(&self, sku: &str) -> CatalogResult<Option<ProductId>>;

    async fn get_primary_image(&self, product_id: ProductId) -> CatalogResult<Option<ObjectId>>;

    /// Returns `false` if the catalog refused the change.
    async fn set_primary_image(&self, product_id: ProductId, object_id: ObjectId)
        -> CatalogResult<bool>;

    async fn clear_primary_image(&self, product_id: ProductId) -> CatalogResult<()>;

    async fn get_gallery_image_ids(&self, product_id: ProductId) -> CatalogResult<GalleryImages>;

    /// Persist the gallery; an empty set removes the gallery entry entirely.
    async fn set_gallery_image_ids(
        &self,
        product_id: ProductId,
        ids: GalleryImages,
    ) -> CatalogResult<()>;

    async fn get_product_display(&self, product_id: ProductId) -> CatalogResult<ProductDisplay>;

    async fn create_attachment(&self, attachment: NewAttachment) -> CatalogResult<()>;

    async fn set_attachment_metadata(
        &self,
        object_id: ObjectId,
        metadata: serde_json::Value,
    ) -> CatalogResult<()>;

    /// Returns whether an attachment entity was removed.
    async fn delete_attachment(&self, object_id: ObjectId) -> CatalogResult<bool>;

    /// Snapshot of a product for one batch
    async fn product_ref(&self, product_id: ProductId) -> CatalogResult<ProductRef> {
        let display = self.get_product_display(product_id).await?;
        let primary_image_id = self.get_primary_image(product_id).await?;
        Ok(ProductRef {
            id: product_id,
            display,
            primary_image_id,
        })
    }
}
