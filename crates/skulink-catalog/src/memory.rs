//! In-memory catalog backend.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use skulink_core::catalog::{Catalog, CatalogError, CatalogResult, NewAttachment};
use skulink_core::models::{GalleryImages, ObjectId, ProductDisplay, ProductId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::snapshot::{AttachmentEntry, CatalogSnapshot, ProductEntry};

#[derive(Default)]
struct CatalogState {
    products: HashMap<ProductId, ProductEntry>,
    sku_index: HashMap<String, ProductId>,
    attachments: HashMap<ObjectId, AttachmentEntry>,
}

impl CatalogState {
    fn product_mut(&mut self, id: ProductId) -> CatalogResult<&mut ProductEntry> {
        self.products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))
    }

    fn product(&self, id: ProductId) -> CatalogResult<&ProductEntry> {
        self.products.get(&id).ok_or(CatalogError::ProductNotFound(id))
    }
}

/// Catalog held entirely in memory.
///
/// Products are indexed by id and by exact SKU. State sits behind a
/// [`RwLock`] so the trait methods work on `&self`.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from products, rejecting duplicate ids or SKUs
    pub fn with_products(products: impl IntoIterator<Item = ProductEntry>) -> CatalogResult<Self> {
        Self::from_snapshot(CatalogSnapshot {
            products: products.into_iter().collect(),
            attachments: Vec::new(),
        })
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> CatalogResult<Self> {
        let mut state = CatalogState::default();

        for product in snapshot.products {
            if state.products.contains_key(&product.id) {
                return Err(CatalogError::Backend(format!(
                    "Duplicate product id {}",
                    product.id
                )));
            }
            if state.sku_index.contains_key(&product.sku) {
                return Err(CatalogError::Backend(format!(
                    "Duplicate SKU {}",
                    product.sku
                )));
            }
            state.sku_index.insert(product.sku.clone(), product.id);
            state.products.insert(product.id, product);
        }

        for attachment in snapshot.attachments {
            state.attachments.insert(attachment.id, attachment);
        }

        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Snapshot ordered by product id / attachment id
    pub async fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.read().await;
        let mut products: Vec<ProductEntry> = state.products.values().cloned().collect();
        products.sort_by_key(|p| p.id);
        let mut attachments: Vec<AttachmentEntry> = state.attachments.values().cloned().collect();
        attachments.sort_by_key(|a| a.id);
        CatalogSnapshot {
            products,
            attachments,
        }
    }

    pub async fn product(&self, id: ProductId) -> Option<ProductEntry> {
        self.state.read().await.products.get(&id).cloned()
    }

    pub async fn attachment(&self, id: ObjectId) -> Option<AttachmentEntry> {
        self.state.read().await.attachments.get(&id).cloned()
    }

    pub async fn attachment_count(&self) -> usize {
        self.state.read().await.attachments.len()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn find_product_id_by_sku(&self, sku: &str) -> CatalogResult<Option<ProductId>> {
        Ok(self.state.read().await.sku_index.get(sku).copied())
    }

    async fn get_primary_image(&self, product_id: ProductId) -> CatalogResult<Option<ObjectId>> {
        Ok(self.state.read().await.product(product_id)?.primary_image)
    }

    async fn set_primary_image(
        &self,
        product_id: ProductId,
        object_id: ObjectId,
    ) -> CatalogResult<bool> {
        let mut state = self.state.write().await;
        state.product_mut(product_id)?.primary_image = Some(object_id);
        Ok(true)
    }

    async fn clear_primary_image(&self, product_id: ProductId) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        state.product_mut(product_id)?.primary_image = None;
        Ok(())
    }

    async fn get_gallery_image_ids(&self, product_id: ProductId) -> CatalogResult<GalleryImages> {
        Ok(self.state.read().await.product(product_id)?.gallery.clone())
    }

    async fn set_gallery_image_ids(
        &self,
        product_id: ProductId,
        ids: GalleryImages,
    ) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        state.product_mut(product_id)?.gallery = ids;
        Ok(())
    }

    async fn get_product_display(&self, product_id: ProductId) -> CatalogResult<ProductDisplay> {
        Ok(self.state.read().await.product(product_id)?.display())
    }

    async fn create_attachment(&self, attachment: NewAttachment) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        state.product(attachment.product_id)?;
        if state.attachments.contains_key(&attachment.object_id) {
            return Err(CatalogError::AttachmentExists(attachment.object_id));
        }
        state.attachments.insert(
            attachment.object_id,
            AttachmentEntry {
                id: attachment.object_id,
                product_id: attachment.product_id,
                title: attachment.title,
                mime_type: attachment.mime_type,
                metadata: None,
            },
        );
        Ok(())
    }

    async fn set_attachment_metadata(
        &self,
        object_id: ObjectId,
        metadata: JsonValue,
    ) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        let entry = state.attachments.get_mut(&object_id).ok_or_else(|| {
            CatalogError::Backend(format!("Attachment not found: {}", object_id))
        })?;
        entry.metadata = Some(metadata);
        Ok(())
    }

    async fn delete_attachment(&self, object_id: ObjectId) -> CatalogResult<bool> {
        Ok(self.state.write().await.attachments.remove(&object_id).is_some())
    }
}
