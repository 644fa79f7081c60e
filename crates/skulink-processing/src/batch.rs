//! Batch orchestration
//!
//! Processes the items of one batch in order. Each item is either attached,
//! rejected with a result, or staged for a caller decision. Items are handled
//! one at a time, so read-modify-write of a product's primary and gallery
//! references never interleaves within a batch.

use serde::{Deserialize, Serialize};
use skulink_core::catalog::Catalog;
use skulink_core::config::EngineConfig;
use skulink_core::models::{
    AttachmentResult, ConflictDecision, PendingConflict, PendingRename, ProductId,
    RenameDecision, UploadItem,
};
use skulink_core::validation::validate_filename;
use skulink_core::AttachError;
use skulink_storage::ObjectStore;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::attach::AttachmentEngine;
use crate::coordinator::Coordinator;
use crate::image::ImageInspector;
use crate::resolver::SkuResolver;
use crate::session::{BatchSession, SessionError, SessionRegistry};
use crate::validator::UploadValidator;

/// Per-batch switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Stage unmatched items for a replacement SKU instead of rejecting them
    pub rename_enabled: bool,
    /// Stage items whose product already has a primary image
    pub handle_conflicts: bool,
}

/// Outcome of one batch request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Session holding staged items; `None` when nothing was staged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
    pub results: Vec<AttachmentResult>,
    pub pending_renames: Vec<PendingRename>,
    pub pending_conflicts: Vec<PendingConflict>,
}

impl BatchResponse {
    fn from_session(session: &BatchSession, results: Vec<AttachmentResult>) -> Self {
        let pending_renames = session.pending_renames();
        let pending_conflicts = session.pending_conflicts();
        let batch_id = if pending_renames.is_empty() && pending_conflicts.is_empty() {
            None
        } else {
            Some(session.id)
        };
        Self {
            batch_id,
            results,
            pending_renames,
            pending_conflicts,
        }
    }
}

pub struct BatchOrchestrator {
    catalog: Arc<dyn Catalog>,
    resolver: Arc<SkuResolver>,
    engine: Arc<AttachmentEngine>,
    coordinator: Coordinator,
    sessions: SessionRegistry,
}

impl BatchOrchestrator {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn ObjectStore>,
        inspector: Arc<dyn ImageInspector>,
        config: EngineConfig,
        sessions: SessionRegistry,
    ) -> Self {
        let resolver = Arc::new(SkuResolver::new(catalog.clone()));
        let validator = UploadValidator::new(config, inspector.clone());
        let engine = Arc::new(AttachmentEngine::new(
            catalog.clone(),
            store.clone(),
            inspector,
            validator,
        ));
        let coordinator = Coordinator::new(
            catalog.clone(),
            store,
            resolver.clone(),
            engine.clone(),
        );

        Self {
            catalog,
            resolver,
            engine,
            coordinator,
            sessions,
        }
    }

    pub fn resolver(&self) -> &SkuResolver {
        &self.resolver
    }

    pub fn engine(&self) -> &AttachmentEngine {
        &self.engine
    }

    /// Process a batch. Results follow input order for every item that was not staged.
    #[tracing::instrument(skip(self, items), fields(items = items.len(), rename_enabled = options.rename_enabled, handle_conflicts = options.handle_conflicts))]
    pub async fn run_batch(&self, items: Vec<UploadItem>, options: BatchOptions) -> BatchResponse {
        let start = Instant::now();
        let mut session = BatchSession::new();
        let mut results = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            if let Some(result) = self.process_item(&mut session, index, item, options).await {
                results.push(result);
            }
        }

        let response = BatchResponse::from_session(&session, results);
        tracing::info!(
            succeeded = response.results.iter().filter(|r| r.is_success()).count(),
            failed = response.results.iter().filter(|r| !r.is_success()).count(),
            pending_renames = response.pending_renames.len(),
            pending_conflicts = response.pending_conflicts.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch processed"
        );

        self.sessions.insert(session).await;
        response
    }

    /// Apply replacement SKUs to a staged batch
    pub async fn resolve_renames(
        &self,
        batch_id: Uuid,
        decisions: &[RenameDecision],
    ) -> Result<BatchResponse, SessionError> {
        let mut session = self.sessions.take(batch_id).await?;
        let results = self.coordinator.resolve_renames(&mut session, decisions).await;
        let response = BatchResponse::from_session(&session, results);
        self.sessions.insert(session).await;
        Ok(response)
    }

    /// Apply conflict choices to a staged batch
    pub async fn resolve_conflicts(
        &self,
        batch_id: Uuid,
        decisions: &[ConflictDecision],
    ) -> Result<BatchResponse, SessionError> {
        let mut session = self.sessions.take(batch_id).await?;
        let response = self
            .coordinator
            .resolve_conflicts(&mut session, decisions)
            .await
            .map(|results| BatchResponse::from_session(&session, results));
        self.sessions.insert(session).await;
        response
    }

    async fn process_item(
        &self,
        session: &mut BatchSession,
        index: usize,
        item: UploadItem,
        options: BatchOptions,
    ) -> Option<AttachmentResult> {
        if let Some(transport) = item.transport_error {
            return Some(self.reject(&item.filename, AttachError::Transport(transport)));
        }

        if let Err(reason) = validate_filename(&item.filename).into_result() {
            tracing::debug!(filename = %item.filename, reason = %reason, "Invalid filename");
            return Some(AttachmentResult::invalid(&item.filename, reason));
        }

        let resolution = match self.resolver.resolve(&item.filename).await {
            Ok(resolution) => resolution,
            Err(AttachError::Validation(reason)) => {
                tracing::debug!(filename = %item.filename, reason = %reason, "Invalid SKU");
                return Some(AttachmentResult::invalid(&item.filename, reason));
            }
            Err(err) => return Some(self.reject(&item.filename, err)),
        };

        let Some(product_id) = resolution.product_id else {
            if options.rename_enabled {
                tracing::debug!(filename = %item.filename, sku = %resolution.sku.raw, "Staged for rename");
                let pending = PendingRename {
                    index,
                    filename: item.filename.clone(),
                    original_sku: resolution.sku.raw.clone(),
                };
                session.stage_rename(item, pending);
                return None;
            }
            return Some(self.reject(&item.filename, AttachError::NotFound(resolution.sku.raw)));
        };

        // Variant images are gallery additions and never contend for the primary slot.
        if options.handle_conflicts && !resolution.via_fallback {
            match self.staged_conflict(index, &item, product_id).await {
                Ok(Some(pending)) => {
                    tracing::debug!(
                        filename = %item.filename,
                        product_id = %product_id,
                        existing = %pending.existing_image_id,
                        "Staged for conflict resolution"
                    );
                    session.stage_conflict(item, pending);
                    return None;
                }
                Ok(None) => {}
                Err(err) => return Some(self.reject(&item.filename, err)),
            }
        }

        Some(self.engine.attach(&item, product_id).await)
    }

    async fn staged_conflict(
        &self,
        index: usize,
        item: &UploadItem,
        product_id: ProductId,
    ) -> Result<Option<PendingConflict>, AttachError> {
        let product = self.catalog.product_ref(product_id).await?;
        Ok(product.primary_image_id.map(|existing| PendingConflict {
            index,
            filename: item.filename.clone(),
            product_id,
            product_display_name: product.display.name.clone(),
            existing_image_id: existing,
        }))
    }

    fn reject(&self, filename: &str, err: AttachError) -> AttachmentResult {
        err.log(filename);
        AttachmentResult::from_error(filename, &err)
    }
}
