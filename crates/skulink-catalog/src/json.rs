//! JSON snapshot catalog
//!
//! Loads a [`CatalogSnapshot`] from disk, serves it through an [`InMemoryCatalog`]
//! and writes it back on [`JsonCatalog::persist`].

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use skulink_core::catalog::{Catalog, CatalogError, CatalogResult, NewAttachment};
use skulink_core::models::{GalleryImages, ObjectId, ProductDisplay, ProductId};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::memory::InMemoryCatalog;
use crate::snapshot::CatalogSnapshot;

pub struct JsonCatalog {
    path: PathBuf,
    inner: InMemoryCatalog,
}

impl JsonCatalog {
    /// Load the catalog file at `path`
    pub async fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let raw = fs::read(&path).await.map_err(|e| {
            CatalogError::Backend(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let snapshot: CatalogSnapshot = serde_json::from_slice(&raw).map_err(|e| {
            CatalogError::Backend(format!("Failed to parse catalog {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            products = snapshot.products.len(),
            attachments = snapshot.attachments.len(),
            "Catalog loaded"
        );

        Ok(Self {
            inner: InMemoryCatalog::from_snapshot(snapshot)?,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn inner(&self) -> &InMemoryCatalog {
        &self.inner
    }

    /// Write the current state back to the catalog file.
    ///
    /// The snapshot is written to a sibling temp file and renamed over the original.
    pub async fn persist(&self) -> CatalogResult<()> {
        let snapshot = self.inner.snapshot().await;
        let body = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| CatalogError::Backend(format!("Failed to serialize catalog: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &body).await.map_err(|e| {
            CatalogError::Backend(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            CatalogError::Backend(format!(
                "Failed to replace catalog {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %self.path.display(),
            products = snapshot.products.len(),
            attachments = snapshot.attachments.len(),
            "Catalog persisted"
        );
        Ok(())
    }
}

#[async_trait]
impl Catalog for JsonCatalog {
    async fn find_product_id_by_sku(&self, sku: &str) -> CatalogResult<Option<ProductId>> {
        self.inner.find_product_id_by_sku(sku).await
    }

    async fn get_primary_image(&self, product_id: ProductId) -> CatalogResult<Option<ObjectId>> {
        self.inner.get_primary_image(product_id).await
    }

    async fn set_primary_image(
        &self,
        product_id: ProductId,
        object_id: ObjectId,
    ) -> CatalogResult<bool> {
        self.inner.set_primary_image(product_id, object_id).await
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
