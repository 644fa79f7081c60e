//! Test helpers: seeded catalog, object stores and a wired orchestrator.
//!
//! Run from workspace root: `cargo test -p skulink-processing`.

#![allow(dead_code)]

pub mod catalogs;
pub mod fixtures;
pub mod stores;

use skulink_catalog::{InMemoryCatalog, ProductEntry};
use skulink_core::catalog::Catalog;
use skulink_core::config::EngineConfig;
use skulink_core::models::{ObjectId, ProductId};
use skulink_processing::{BatchOrchestrator, ImageProcessor, SessionRegistry, UndoLedger};
use skulink_storage::{MemoryObjectStore, ObjectStore};
use std::sync::Arc;

pub const MUG: ProductId = ProductId(1);
pub const PLATE: ProductId = ProductId(2);
pub const BOWL: ProductId = ProductId(3);

/// Catalog with three products. BOWL already has a primary image.
pub fn seeded_catalog(existing_primary: ObjectId) -> InMemoryCatalog {
    InMemoryCatalog::with_products([
        ProductEntry::new(MUG.0, "ABC123", "Blue Mug"),
        ProductEntry::new(PLATE.0, "XYZ999", "Red Plate"),
        ProductEntry::new(BOWL.0, "BWL7", "Green Bowl").with_primary_image(existing_primary),
    ])
    .unwrap()
}

/// Orchestrator and undo ledger over shared collaborators
pub struct TestEngine<C, S> {
    pub catalog: Arc<C>,
    pub store: Arc<S>,
    pub orchestrator: BatchOrchestrator,
    pub ledger: UndoLedger,
}

impl<C, S> TestEngine<C, S>
where
    C: Catalog + 'static,
    S: ObjectStore + 'static,
{
    pub fn with(catalog: C, store: S) -> Self {
        let catalog = Arc::new(catalog);
        let store = Arc::new(store);
        let orchestrator = BatchOrchestrator::new(
            catalog.clone(),
            store.clone(),
            Arc::new(ImageProcessor),
            EngineConfig::default(),
            SessionRegistry::from_secs(3600),
        );
        let ledger = UndoLedger::new(catalog.clone(), store.clone());
        Self {
            catalog,
            store,
            orchestrator,
            ledger,
        }
    }
}

pub type MemoryEngine = TestEngine<InMemoryCatalog, MemoryObjectStore>;

/// Seeded catalog over an in-memory store. The existing primary of BOWL is
/// stored so it can be deleted by conflict resolution.
pub async fn setup_engine() -> (MemoryEngine, ObjectId) {
    let store = MemoryObjectStore::new();
    let existing = store
        .store_object(fixtures::png_bytes(80, 80), "BWL7.png")
        .await
        .unwrap()
        .id;
    (TestEngine::with(seeded_catalog(existing), store), existing)
}
