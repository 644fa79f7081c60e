//! Catalog wrappers with scripted failures.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use skulink_catalog::InMemoryCatalog;
use skulink_core::catalog::{Catalog, CatalogResult, NewAttachment};
use skulink_core::models::{GalleryImages, ObjectId, ProductDisplay, ProductId};

/// Delegates to an in-memory catalog but reports `false` from `set_primary_image`
pub struct RefusingPrimaryCatalog {
    pub inner: InMemoryCatalog,
}

#[async_trait]
impl Catalog for RefusingPrimaryCatalog {
    async fn find_product_id_by_sku(&self, sku: &str) -> CatalogResult<Option<ProductId>> {
        self.inner.find_product_id_by_sku(sku).await
    }

    async fn get_primary_image(&self, product_id: ProductId) -> CatalogResult<Option<ObjectId>> {
        self.inner.get_primary_image(product_id).await
    }

    async fn set_primary_image(&self, _: ProductId, _: ObjectId) -> CatalogResult<bool> {
        Ok(false)
    }

    async fn clear_primary_image(&self, product_id: ProductId) -> CatalogResult<()> {
        self.inner.clear_primary_image(product_id).await
    }

    async fn get_gallery_image_ids(&self, product_id: ProductId) -> CatalogResult<GalleryImages> {
        self.inner.get_gallery_image_ids(product_id).await
    }

    async fn set_gallery_image_ids(
        &self,
        product_id: ProductId,
        ids: GalleryImages,
    ) -> CatalogResult<()> {
        self.inner.set_gallery_image_ids(product_id, ids).await
    }

    async fn get_product_display(&self, product_id: ProductId) -> CatalogResult<ProductDisplay> {
        self.inner.get_product_display(product_id).await
    }

    async fn create_attachment(&self, attachment: NewAttachment) -> CatalogResult<()> {
        self.inner.create_attachment(attachment).await
    }

    async fn set_attachment_metadata(
        &self,
        object_id: ObjectId,
        metadata: JsonValue,
    ) -> CatalogResult<()> {
        self.inner.set_attachment_metadata(object_id, metadata).await
    }

    async fn delete_attachment(&self, object_id: ObjectId) -> CatalogResult<bool> {
        self.inner.delete_attachment(object_id).await
    }
}
