//! Undo ledger
//!
//! Reverses successful attachments from the caller's records: deletes the
//! stored object and its attachment entity, then removes the product
//! reference that pointed at it.

use skulink_core::catalog::Catalog;
use skulink_core::models::{UndoRecord, UndoSummary};
use skulink_storage::ObjectStore;
use std::sync::Arc;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UndoError {
    #[error("No undo data provided")]
    Empty,
}

pub struct UndoLedger {
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn ObjectStore>,
}

impl UndoLedger {
    pub fn new(catalog: Arc<dyn Catalog>, store: Arc<dyn ObjectStore>) -> Self {
        Self { catalog, store }
    }

    /// Undo every record, counting successes and failures.
    ///
    /// A record whose object cannot be deleted leaves the product untouched.
    /// Records that could not be undone are returned in the summary.
    pub async fn undo(&self, records: &[UndoRecord]) -> Result<UndoSummary, UndoError> {
        if records.is_empty() {
            return Err(UndoError::Empty);
        }

        let mut undone = 0;
        let mut failed = Vec::new();

        for record in records {
            match self.undo_one(record).await {
                Ok(()) => undone += 1,
                Err(reason) => {
                    tracing::error!(
                        attachment_id = %record.attachment_id,
                        product_id = %record.product_id,
                        error = %reason,
                        "Undo failed"
                    );
                    failed.push(*record);
                }
            }
        }

        let summary = UndoSummary::new(undone, failed);
        tracing::info!(undone, errors = summary.errors, "Undo finished");
        Ok(summary)
    }

    async fn undo_one(&self, record: &UndoRecord) -> Result<(), String> {
        let id = record.attachment_id;

        match self.store.delete_object(id).await {
            Ok(true) => {}
            Ok(false) => return Err(format!("Object {} not found", id)),
            Err(e) => return Err(e.to_string()),
        }

        if let Err(e) = self.catalog.delete_attachment(id).await {
            tracing::warn!(attachment_id = %id, error = %e, "Failed to delete attachment entity");
        }

        if record.is_featured {
            let primary = self
                .catalog
                .get_primary_image(record.product_id)
                .await
                .map_err(|e| e.to_string())?;
            if primary == Some(id) {
                self.catalog
                    .clear_primary_image(record.product_id)
                    .await
                    .map_err(|e| e.to_string())?;
            } else {
                tracing::debug!(
                    attachment_id = %id,
                    product_id = %record.product_id,
                    "Primary image changed since upload, left as is"
                );
            }
        } else {
            let mut gallery = self
                .catalog
                .get_gallery_image_ids(record.product_id)
                .await
                .map_err(|e| e.to_string())?;
            if gallery.remove(&id) {
                self.catalog
                    .set_gallery_image_ids(record.product_id, gallery)
                    .await
                    .map_err(|e| e.to_string())?;
            }
        }

        tracing::debug!(attachment_id = %id, product_id = %record.product_id, "Upload undone");
        Ok(())
    }
}
