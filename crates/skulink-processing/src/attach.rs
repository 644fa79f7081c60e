//! Attachment engine
//!
//! Turns one validated upload into a stored object, registers it as a catalog
//! attachment and binds it to the product: as the primary image when the
//! product has none, otherwise appended to the gallery.

use serde_json::Value as JsonValue;
use skulink_core::catalog::{Catalog, NewAttachment};
use skulink_core::models::{AttachmentResult, ObjectId, ProductDisplay, ProductId, UploadItem};
use skulink_core::validation::{file_stem, sanitize_file_name};
use skulink_core::AttachError;
use skulink_storage::ObjectStore;
use std::sync::Arc;
use std::time::Instant;

use crate::image::ImageInspector;
use crate::validator::UploadValidator;

/// Failure of one attach attempt, with the object left behind if any
struct AttachFailure {
    error: AttachError,
    orphan: Option<ObjectId>,
}

impl From<AttachError> for AttachFailure {
    fn from(error: AttachError) -> Self {
        Self {
            error,
            orphan: None,
        }
    }
}

struct Attached {
    object_id: ObjectId,
    is_featured: bool,
    display: ProductDisplay,
}

pub struct AttachmentEngine {
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn ObjectStore>,
    inspector: Arc<dyn ImageInspector>,
    validator: UploadValidator,
}

impl AttachmentEngine {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn ObjectStore>,
        inspector: Arc<dyn ImageInspector>,
        validator: UploadValidator,
    ) -> Self {
        Self {
            catalog,
            store,
            inspector,
            validator,
        }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Validate, store and bind `item` to `product_id`. Never fails: every
    /// outcome is reported through the returned result.
    #[tracing::instrument(skip(self, item, product_id), fields(filename = %item.filename, product_id = %product_id))]
    pub async fn attach(&self, item: &UploadItem, product_id: ProductId) -> AttachmentResult {
        let start = Instant::now();

        match self.try_attach(item, product_id).await {
            Ok(attached) => {
                tracing::info!(
                    attachment_id = %attached.object_id,
                    is_featured = attached.is_featured,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Image attached"
                );
                AttachmentResult::success(
                    &item.filename,
                    attached.object_id,
                    product_id,
                    attached.is_featured,
                    attached.display,
                )
            }
            Err(failure) => {
                failure.error.log(&item.filename);
                let result = AttachmentResult::from_error(&item.filename, &failure.error);
                match failure.orphan {
                    Some(orphan) => result.with_orphan(orphan),
                    None => result,
                }
            }
        }
    }

    async fn try_attach(
        &self,
        item: &UploadItem,
        product_id: ProductId,
    ) -> Result<Attached, AttachFailure> {
        let validated = self.validator.validate(item).await?;

        let safe_name = sanitize_file_name(&item.filename);
        let stored = self
            .store
            .store_object(validated.content.clone(), &safe_name)
            .await
            .map_err(|e| AttachError::Store(e.to_string()))?;
        let object_id = stored.id;

        tracing::debug!(
            attachment_id = %object_id,
            key = %stored.key,
            size_bytes = stored.size_bytes,
            "Object stored"
        );

        let registration = self
            .catalog
            .create_attachment(NewAttachment {
                object_id,
                product_id,
                title: file_stem(&item.filename).to_string(),
                mime_type: validated.mime_type.clone(),
            })
            .await;
        if let Err(e) = registration {
            // Nothing references the object yet.
            if let Err(cleanup) = self.store.delete_object(object_id).await {
                tracing::warn!(attachment_id = %object_id, error = %cleanup, "Failed to remove unregistered object");
            }
            return Err(AttachError::Catalog(e.to_string()).into());
        }

        self.record_metadata(object_id, validated.content).await;

        self.bind(product_id, object_id).await?;

        let is_featured = match self.catalog.get_primary_image(product_id).await {
            Ok(primary) => primary == Some(object_id),
            Err(e) => {
                tracing::warn!(product_id = %product_id, error = %e, "Failed to re-read primary image");
                false
            }
        };

        let display = match self.catalog.get_product_display(product_id).await {
            Ok(display) => display,
            Err(e) => {
                tracing::warn!(product_id = %product_id, error = %e, "Failed to load product display data");
                ProductDisplay::default()
            }
        };

        Ok(Attached {
            object_id,
            is_featured,
            display,
        })
    }

    /// Derived metadata is best effort; failures never fail the item.
    async fn record_metadata(&self, object_id: ObjectId, content: bytes::Bytes) {
        let inspector = self.inspector.clone();
        let extracted = tokio::task::spawn_blocking(move || inspector.extract_metadata(&content)).await;

        let metadata = match extracted {
            Ok(Ok(metadata)) => metadata,
            Ok(Err(e)) => {
                tracing::warn!(attachment_id = %object_id, error = %e, "Metadata extraction failed");
                return;
            }
            Err(e) => {
                tracing::warn!(attachment_id = %object_id, error = %e, "Metadata extraction task failed");
                return;
            }
        };

        let value: JsonValue = match serde_json::to_value(&metadata) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(attachment_id = %object_id, error = %e, "Failed to serialize metadata");
                return;
            }
        };

        if let Err(e) = self.catalog.set_attachment_metadata(object_id, value).await {
            tracing::warn!(attachment_id = %object_id, error = %e, "Failed to record attachment metadata");
        }
    }

    async fn bind(&self, product_id: ProductId, object_id: ObjectId) -> Result<(), AttachFailure> {
        let orphaned = |error: AttachError| AttachFailure {
            error,
            orphan: Some(object_id),
        };

        let primary = self
            .catalog
            .get_primary_image(product_id)
            .await
            .map_err(|e| orphaned(e.into()))?;

        if primary.is_none() {
            return match self.catalog.set_primary_image(product_id, object_id).await {
                Ok(true) => Ok(()),
                Ok(false) => Err(orphaned(AttachError::Catalog(format!(
                    "Failed to set featured image for product {}",
                    product_id
                )))),
                Err(e) => Err(orphaned(e.into())),
            };
        }

        let mut gallery = self
            .catalog
            .get_gallery_image_ids(product_id)
            .await
            .map_err(|e| orphaned(e.into()))?;

        if !gallery.insert(object_id) {
            self.discard(object_id).await;
            return Err(AttachError::Conflict(format!(
                "Image already in gallery for product {}",
                product_id
            ))
            .into());
        }

        self.catalog
            .set_gallery_image_ids(product_id, gallery)
            .await
            .map_err(|e| orphaned(e.into()))
    }

    /// Remove a freshly created object and its attachment entity
    async fn discard(&self, object_id: ObjectId) {
        if let Err(e) = self.store.delete_object(object_id).await {
            tracing::warn!(attachment_id = %object_id, error = %e, "Failed to delete duplicate object");
        }
        if let Err(e) = self.catalog.delete_attachment(object_id).await {
            tracing::warn!(attachment_id = %object_id, error = %e, "Failed to delete duplicate attachment");
        }
    }
}
