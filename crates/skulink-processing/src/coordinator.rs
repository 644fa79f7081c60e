//! Rename and conflict resolution for staged batch items

use skulink_core::catalog::Catalog;
use skulink_core::models::{
    AttachmentResult, ConflictChoice, ConflictDecision, PendingConflict, RenameDecision,
    UploadItem,
};
use skulink_core::validation::validate_sku;
use skulink_core::AttachError;
use skulink_storage::ObjectStore;
use std::sync::Arc;

use crate::attach::AttachmentEngine;
use crate::resolver::SkuResolver;
use crate::session::{BatchSession, SessionError};

pub struct Coordinator {
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn ObjectStore>,
    resolver: Arc<SkuResolver>,
    engine: Arc<AttachmentEngine>,
}

impl Coordinator {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn ObjectStore>,
        resolver: Arc<SkuResolver>,
        engine: Arc<AttachmentEngine>,
    ) -> Self {
        Self {
            catalog,
            store,
            resolver,
            engine,
        }
    }

    /// Apply replacement SKUs to staged items.
    ///
    /// Each decision consumes its staged item; a blank SKU skips it. Replacement SKUs are looked up
    /// exactly, without variant fallback, and a match is attached directly
    /// even when the product already has a primary image.
    pub async fn resolve_renames(
        &self,
        session: &mut BatchSession,
        decisions: &[RenameDecision],
    ) -> Vec<AttachmentResult> {
        let mut results = Vec::with_capacity(decisions.len());

        for decision in decisions {
            let Some((pending, item)) = session.take_rename(decision.index) else {
                results.push(AttachmentResult::error(
                    format!("item {}", decision.index),
                    format!("No pending rename for item {}", decision.index),
                ));
                continue;
            };

            let new_sku = decision.new_sku.trim();
            if new_sku.is_empty() {
                tracing::debug!(filename = %pending.filename, "Rename skipped");
                results.push(AttachmentResult::skipped(
                    &pending.filename,
                    "No replacement SKU provided",
                ));
                continue;
            }
            if let Err(reason) = validate_sku(new_sku).into_result() {
                tracing::debug!(filename = %pending.filename, sku = %new_sku, reason = %reason, "Replacement SKU rejected");
                results.push(AttachmentResult::invalid(&pending.filename, reason));
                continue;
            }

            let result = match self.resolver.resolve_exact(new_sku).await {
                Ok(Some(product_id)) => {
                    tracing::info!(
                        filename = %pending.filename,
                        original_sku = %pending.original_sku,
                        new_sku = %new_sku,
                        product_id = %product_id,
                        "Renamed item matched"
                    );
                    self.engine.attach(&item, product_id).await
                }
                Ok(None) => {
                    let err = AttachError::NotFound(new_sku.to_string());
                    err.log(&pending.filename);
                    AttachmentResult::from_error(&pending.filename, &err)
                }
                Err(err) => {
                    err.log(&pending.filename);
                    AttachmentResult::from_error(&pending.filename, &err)
                }
            };
            results.push(result);
        }

        results
    }

    /// Apply conflict choices to staged items.
    ///
    /// Refused while renames are pending in the same session. A decision whose
    /// product does not match the staged item is reported as an error and the
    /// item stays staged.
    pub async fn resolve_conflicts(
        &self,
        session: &mut BatchSession,
        decisions: &[ConflictDecision],
    ) -> Result<Vec<AttachmentResult>, SessionError> {
        if session.has_pending_renames() {
            return Err(SessionError::RenamesOutstanding);
        }

        let mut results = Vec::with_capacity(decisions.len());

        for decision in decisions {
            let Some((pending, item)) = session.take_conflict(decision.index) else {
                results.push(AttachmentResult::error(
                    format!("item {}", decision.index),
                    format!("No pending conflict for item {}", decision.index),
                ));
                continue;
            };

            if pending.product_id != decision.product_id {
                tracing::warn!(
                    filename = %pending.filename,
                    staged_product_id = %pending.product_id,
                    decision_product_id = %decision.product_id,
                    "Conflict decision names a different product"
                );
                results.push(AttachmentResult::error(
                    &pending.filename,
                    format!(
                        "Product {} does not match the staged product {}",
                        decision.product_id, pending.product_id
                    ),
                ));
                session.stage_conflict(item, pending);
                continue;
            }

            let result = match decision.choice {
                ConflictChoice::KeepExisting => {
                    tracing::info!(filename = %pending.filename, product_id = %pending.product_id, "Kept existing featured image");
                    AttachmentResult::skipped(&pending.filename, "Kept existing featured image")
                }
                ConflictChoice::UseNew => self.replace_primary(&pending, &item).await,
            };
            results.push(result);
        }

        Ok(results)
    }

    /// Swap the product's primary image for `item`.
    ///
    /// The upload is validated before anything is deleted. The primary is
    /// re-read at this point; if it no longer matches the staged image the
    /// item is reported as a conflict and nothing is changed.
    async fn replace_primary(&self, pending: &PendingConflict, item: &UploadItem) -> AttachmentResult {
        if let Err(err) = self.engine.validator().validate(item).await {
            err.log(&pending.filename);
            return AttachmentResult::from_error(&pending.filename, &err);
        }

        let current = match self.catalog.get_primary_image(pending.product_id).await {
            Ok(current) => current,
            Err(e) => {
                let err = AttachError::from(e);
                err.log(&pending.filename);
                return AttachmentResult::from_error(&pending.filename, &err);
            }
        };

        let existing = match current {
            Some(id) if id == pending.existing_image_id => id,
            None => {
                tracing::info!(
                    filename = %pending.filename,
                    product_id = %pending.product_id,
                    "Featured image already removed, attaching directly"
                );
                return self.engine.attach(item, pending.product_id).await;
            }
            Some(other) => {
                let err = AttachError::Conflict(format!(
                    "Featured image for product {} changed to {} after the batch was staged",
                    pending.product_id, other
                ));
                err.log(&pending.filename);
                return AttachmentResult::from_error(&pending.filename, &err);
            }
        };

        match self.store.delete_object(existing).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(attachment_id = %existing, "Existing featured image was already gone from the store");
            }
            Err(e) => {
                let err = AttachError::Store(format!("Failed to delete existing image: {}", e));
                err.log(&pending.filename);
                return AttachmentResult::from_error(&pending.filename, &err);
            }
        }

        if let Err(e) = self.catalog.delete_attachment(existing).await {
            tracing::warn!(attachment_id = %existing, error = %e, "Failed to delete existing attachment entity");
        }

        if let Err(e) = self.catalog.clear_primary_image(pending.product_id).await {
            let err = AttachError::from(e);
            err.log(&pending.filename);
            return AttachmentResult::from_error(&pending.filename, &err);
        }

        tracing::info!(
            filename = %pending.filename,
            product_id = %pending.product_id,
            replaced = %existing,
            "Existing featured image removed"
        );

        self.engine.attach(item, pending.product_id).await
    }
}
