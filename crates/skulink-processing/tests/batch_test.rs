//! Batch orchestration integration tests.
//!
//! Run with: `cargo test -p skulink-processing --test batch_test`

mod helpers;

use helpers::catalogs::RefusingPrimaryCatalog;
use helpers::fixtures::{create_test_png, png_item};
use helpers::stores::{FixedIdStore, FullStore};
use helpers::{seeded_catalog, setup_engine, TestEngine, BOWL, MUG, PLATE};
use skulink_catalog::{InMemoryCatalog, ProductEntry};
use skulink_core::catalog::Catalog;
use skulink_core::models::{
    ConflictChoice, ConflictDecision, GalleryImages, ObjectId, ProductId, RenameDecision,
    ResultStatus, UploadItem,
};
use skulink_core::TransportError;
use skulink_processing::{BatchOptions, SessionError};
use skulink_storage::{MemoryObjectStore, ObjectStore};

const PLAIN: BatchOptions = BatchOptions {
    rename_enabled: false,
    handle_conflicts: false,
};

#[tokio::test]
async fn test_exact_match_becomes_featured() {
    let (engine, _) = setup_engine().await;

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("ABC123.jpg")], PLAIN)
        .await;

    assert_eq!(response.results.len(), 1);
    let result = &response.results[0];
    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.message, "Image set as featured");
    assert!(result.is_featured);
    assert_eq!(result.product_id, Some(MUG));
    assert_eq!(result.product.as_ref().unwrap().name, "Blue Mug");
    assert!(response.batch_id.is_none());

    let primary = engine.catalog.get_primary_image(MUG).await.unwrap();
    assert_eq!(primary, result.attachment_id);
    assert!(engine.store.exists(primary.unwrap()).await.unwrap());
}

#[tokio::test]
async fn test_variant_goes_to_gallery_after_primary() {
    let (engine, _) = setup_engine().await;

    let response = engine
        .orchestrator
        .run_batch(
            vec![png_item("ABC123.jpg"), png_item("ABC123-2.png")],
            PLAIN,
        )
        .await;

    let first = &response.results[0];
    let second = &response.results[1];
    assert!(first.is_featured);
    assert_eq!(second.status, ResultStatus::Success);
    assert!(!second.is_featured);
    assert_eq!(second.message, "Image added to gallery");

    let gallery = engine.catalog.get_gallery_image_ids(MUG).await.unwrap();
    assert_eq!(gallery.as_slice(), &[second.attachment_id.unwrap()]);
    assert_eq!(
        engine.catalog.get_primary_image(MUG).await.unwrap(),
        first.attachment_id
    );
}

#[tokio::test]
async fn test_variant_without_primary_becomes_featured() {
    let (engine, _) = setup_engine().await;

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("XYZ999-1.png")], PLAIN)
        .await;

    let result = &response.results[0];
    assert_eq!(result.product_id, Some(PLATE));
    assert!(result.is_featured);
}

#[tokio::test]
async fn test_mixed_batch_of_three() {
    let (engine, _) = setup_engine().await;
    let plate_primary = ObjectId::new();
    engine
        .catalog
        .set_primary_image(PLATE, plate_primary)
        .await
        .unwrap();

    let response = engine
        .orchestrator
        .run_batch(
            vec![
                png_item("ABC123.jpg"),
                png_item("XYZ999-2.jpg"),
                png_item("UNKNOWN.jpg"),
            ],
            PLAIN,
        )
        .await;

    let results = &response.results;
    assert_eq!(results[0].status, ResultStatus::Success);
    assert!(results[0].is_featured);
    assert_eq!(results[1].status, ResultStatus::Success);
    assert!(!results[1].is_featured);
    assert_eq!(results[1].product_id, Some(PLATE));
    assert_eq!(results[2].status, ResultStatus::Invalid);
    assert_eq!(
        engine.catalog.get_primary_image(PLATE).await.unwrap(),
        Some(plate_primary)
    );
}

#[tokio::test]
async fn test_plain_sku_filenames_attach() {
    for name in ["ABC123.jpg", "ABC123.png", "ABC123.gif", "ABC123.webp"] {
        let (engine, _) = setup_engine().await;
        let response = engine
            .orchestrator
            .run_batch(vec![png_item(name)], PLAIN)
            .await;
        assert_eq!(response.results[0].status, ResultStatus::Success, "{}", name);
    }
}

#[tokio::test]
async fn test_unmatched_sku_is_invalid() {
    let (engine, _) = setup_engine().await;

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("NOPE.jpg")], PLAIN)
        .await;

    let result = &response.results[0];
    assert_eq!(result.status, ResultStatus::Invalid);
    assert_eq!(result.message, "No product found with SKU: NOPE");
    assert_eq!(engine.store.len().await, 1);
}

#[tokio::test]
async fn test_failures_do_not_stop_the_batch_and_keep_order() {
    let (engine, _) = setup_engine().await;

    let items = vec![
        UploadItem::failed("ABC123.jpg", TransportError::Partial),
        png_item("bad|name.jpg"),
        UploadItem::new("XYZ999.png", create_test_png(10, 10), "image/png"),
        png_item("ABC123.png"),
    ];
    let response = engine.orchestrator.run_batch(items, PLAIN).await;

    let statuses: Vec<_> = response.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            ResultStatus::Error,
            ResultStatus::Invalid,
            ResultStatus::Error,
            ResultStatus::Success
        ]
    );
    assert_eq!(
        response.results[0].message,
        "File upload error: The uploaded file was only partially uploaded"
    );
    assert!(response.results[2].message.contains("50x50"));
    assert_eq!(response.results[3].filename, "ABC123.png");
}

#[tokio::test]
async fn test_success_iff_ids_present() {
    let (engine, _) = setup_engine().await;

    let items = vec![
        png_item("ABC123.jpg"),
        png_item("NOPE.jpg"),
        UploadItem::new("XYZ999.bmp", create_test_png(60, 60), "image/bmp"),
    ];
    let response = engine.orchestrator.run_batch(items, PLAIN).await;

    for result in &response.results {
        let has_ids = result.attachment_id.is_some() && result.product_id.is_some();
        assert_eq!(result.is_success(), has_ids, "{:?}", result);
    }
}

#[tokio::test]
async fn test_rename_staging_and_resolution() {
    let (engine, _) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: true,
        handle_conflicts: false,
    };

    let response = engine
        .orchestrator
        .run_batch(
            vec![png_item("ABC123.jpg"), png_item("typo-sku.png"), png_item("other.png")],
            options,
        )
        .await;

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.pending_renames.len(), 2);
    assert_eq!(response.pending_renames[0].index, 1);
    assert_eq!(response.pending_renames[0].original_sku, "typo-sku");
    let batch_id = response.batch_id.unwrap();

    let resolved = engine
        .orchestrator
        .resolve_renames(
            batch_id,
            &[
                RenameDecision {
                    index: 1,
                    new_sku: "XYZ999".to_string(),
                },
                RenameDecision {
                    index: 2,
                    new_sku: "STILL-MISSING".to_string(),
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(resolved.results[0].status, ResultStatus::Success);
    assert_eq!(resolved.results[0].product_id, Some(PLATE));
    assert_eq!(resolved.results[1].status, ResultStatus::Invalid);
    assert_eq!(
        resolved.results[1].message,
        "No product found with SKU: STILL-MISSING"
    );
    assert!(resolved.pending_renames.is_empty());
    assert!(resolved.batch_id.is_none());

    // Fully resolved sessions are gone.
    assert!(matches!(
        engine.orchestrator.resolve_renames(batch_id, &[]).await,
        Err(SessionError::UnknownBatch(_))
    ));
}

#[tokio::test]
async fn test_rename_uses_exact_lookup() {
    let (engine, _) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: true,
        handle_conflicts: false,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("zzz.png")], options)
        .await;
    let batch_id = response.batch_id.unwrap();

    let resolved = engine
        .orchestrator
        .resolve_renames(
            batch_id,
            &[RenameDecision {
                index: 0,
                new_sku: "ABC123-4".to_string(),
            }],
        )
        .await
        .unwrap();
    assert_eq!(resolved.results[0].status, ResultStatus::Invalid);
}

#[tokio::test]
async fn test_conflict_staged_only_for_exact_match() {
    let (engine, existing) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: false,
        handle_conflicts: true,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("BWL7.png"), png_item("BWL7-3.png")], options)
        .await;

    assert_eq!(response.pending_conflicts.len(), 1);
    let pending = &response.pending_conflicts[0];
    assert_eq!(pending.index, 0);
    assert_eq!(pending.product_id, BOWL);
    assert_eq!(pending.product_display_name, "Green Bowl");
    assert_eq!(pending.existing_image_id, existing);

    // The variant went straight to the gallery.
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].filename, "BWL7-3.png");
    assert!(!response.results[0].is_featured);
}

#[tokio::test]
async fn test_conflict_use_new_replaces_primary() {
    let (engine, existing) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: false,
        handle_conflicts: true,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("BWL7.png")], options)
        .await;
    let batch_id = response.batch_id.unwrap();

    let resolved = engine
        .orchestrator
        .resolve_conflicts(
            batch_id,
            &[ConflictDecision {
                index: 0,
                product_id: BOWL,
                choice: ConflictChoice::UseNew,
            }],
        )
        .await
        .unwrap();

    let result = &resolved.results[0];
    assert_eq!(result.status, ResultStatus::Success);
    assert!(result.is_featured);
    assert!(!engine.store.exists(existing).await.unwrap());
    assert_eq!(
        engine.catalog.get_primary_image(BOWL).await.unwrap(),
        result.attachment_id
    );
}

fn use_new(index: usize, product_id: ProductId) -> ConflictDecision {
    ConflictDecision {
        index,
        product_id,
        choice: ConflictChoice::UseNew,
    }
}

#[tokio::test]
async fn test_second_use_new_for_same_product_is_refused() {
    let (engine, existing) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: false,
        handle_conflicts: true,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("BWL7.png"), png_item("BWL7.jpg")], options)
        .await;
    assert_eq!(response.pending_conflicts.len(), 2);

    let resolved = engine
        .orchestrator
        .resolve_conflicts(
            response.batch_id.unwrap(),
            &[use_new(0, BOWL), use_new(1, BOWL)],
        )
        .await
        .unwrap();

    let first = &resolved.results[0];
    let second = &resolved.results[1];
    assert_eq!(first.status, ResultStatus::Success);
    assert!(first.is_featured);
    assert_eq!(second.status, ResultStatus::Error);
    assert!(second.message.contains("changed"));

    let first_id = first.attachment_id.unwrap();
    assert_eq!(
        engine.catalog.get_primary_image(BOWL).await.unwrap(),
        Some(first_id)
    );
    assert!(engine.store.exists(first_id).await.unwrap());
    assert!(!engine.store.exists(existing).await.unwrap());
}

#[tokio::test]
async fn test_invalid_use_new_keeps_existing_primary() {
    let (engine, existing) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: false,
        handle_conflicts: true,
    };
    let tiny = UploadItem::new("BWL7.png", create_test_png(20, 20), "image/png");

    let response = engine.orchestrator.run_batch(vec![tiny], options).await;
    let resolved = engine
        .orchestrator
        .resolve_conflicts(response.batch_id.unwrap(), &[use_new(0, BOWL)])
        .await
        .unwrap();

    let result = &resolved.results[0];
    assert_eq!(result.status, ResultStatus::Error);
    assert!(result.message.contains("20x20"));
    assert_eq!(
        engine.catalog.get_primary_image(BOWL).await.unwrap(),
        Some(existing)
    );
    assert!(engine.store.exists(existing).await.unwrap());
}

#[tokio::test]
async fn test_use_new_after_primary_cleared_attaches_as_featured() {
    let (engine, existing) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: false,
        handle_conflicts: true,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("BWL7.png")], options)
        .await;
    engine.catalog.clear_primary_image(BOWL).await.unwrap();

    let resolved = engine
        .orchestrator
        .resolve_conflicts(response.batch_id.unwrap(), &[use_new(0, BOWL)])
        .await
        .unwrap();

    let result = &resolved.results[0];
    assert_eq!(result.status, ResultStatus::Success);
    assert!(result.is_featured);
    assert!(engine.store.exists(existing).await.unwrap());
}

#[tokio::test]
async fn test_conflict_keep_existing_is_skipped() {
    let (engine, existing) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: false,
        handle_conflicts: true,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("BWL7.png")], options)
        .await;

    let resolved = engine
        .orchestrator
        .resolve_conflicts(
            response.batch_id.unwrap(),
            &[ConflictDecision {
                index: 0,
                product_id: BOWL,
                choice: ConflictChoice::KeepExisting,
            }],
        )
        .await
        .unwrap();

    assert_eq!(resolved.results[0].status, ResultStatus::Skipped);
    assert_eq!(
        engine.catalog.get_primary_image(BOWL).await.unwrap(),
        Some(existing)
    );
    assert_eq!(engine.store.len().await, 1);
}

#[tokio::test]
async fn test_conflicts_refused_while_renames_pending() {
    let (engine, _) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: true,
        handle_conflicts: true,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("BWL7.png"), png_item("unknown.png")], options)
        .await;
    let batch_id = response.batch_id.unwrap();
    let decision = ConflictDecision {
        index: 0,
        product_id: BOWL,
        choice: ConflictChoice::KeepExisting,
    };

    let refused = engine
        .orchestrator
        .resolve_conflicts(batch_id, &[decision.clone()])
        .await;
    assert_eq!(refused.unwrap_err(), SessionError::RenamesOutstanding);

    // The session survives the refusal.
    let renamed = engine
        .orchestrator
        .resolve_renames(
            batch_id,
            &[RenameDecision {
                index: 1,
                new_sku: "ABC123".to_string(),
            }],
        )
        .await
        .unwrap();
    assert_eq!(renamed.pending_conflicts.len(), 1);

    let resolved = engine
        .orchestrator
        .resolve_conflicts(batch_id, &[decision])
        .await
        .unwrap();
    assert_eq!(resolved.results[0].status, ResultStatus::Skipped);
}

#[tokio::test]
async fn test_conflict_decision_with_wrong_product_keeps_item_staged() {
    let (engine, _) = setup_engine().await;
    let options = BatchOptions {
        rename_enabled: false,
        handle_conflicts: true,
    };

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("BWL7.png")], options)
        .await;
    let batch_id = response.batch_id.unwrap();

    let resolved = engine
        .orchestrator
        .resolve_conflicts(
            batch_id,
            &[
                ConflictDecision {
                    index: 0,
                    product_id: MUG,
                    choice: ConflictChoice::UseNew,
                },
                ConflictDecision {
                    index: 7,
                    product_id: BOWL,
                    choice: ConflictChoice::UseNew,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(resolved.results[0].status, ResultStatus::Error);
    assert_eq!(resolved.results[1].status, ResultStatus::Error);
    assert_eq!(resolved.pending_conflicts.len(), 1);
    assert_eq!(resolved.batch_id, Some(batch_id));
}

#[tokio::test]
async fn test_duplicate_gallery_entry_is_discarded() {
    let fixed = ObjectId::new();
    let primary = ObjectId::new();
    let mut gallery = GalleryImages::new();
    gallery.insert(fixed);
    let mut product = ProductEntry::new(MUG.0, "ABC123", "Blue Mug").with_primary_image(primary);
    product.gallery = gallery;
    let catalog = InMemoryCatalog::with_products([product]).unwrap();
    let engine = TestEngine::with(catalog, FixedIdStore::new(fixed));

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("ABC123-2.png")], PLAIN)
        .await;

    let result = &response.results[0];
    assert_eq!(result.status, ResultStatus::Error);
    assert!(result.message.contains("already in gallery"));
    assert_eq!(engine.store.deleted(), vec![fixed]);
    assert_eq!(
        engine.catalog.get_gallery_image_ids(MUG).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_primary_refusal_reports_orphan() {
    let catalog = RefusingPrimaryCatalog {
        inner: seeded_catalog(ObjectId::new()),
    };
    let engine = TestEngine::with(catalog, MemoryObjectStore::new());

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("ABC123.png")], PLAIN)
        .await;

    let result = &response.results[0];
    assert_eq!(result.status, ResultStatus::Error);
    assert!(result.attachment_id.is_none());
    let orphan = result.orphaned_attachment_id.unwrap();
    assert!(engine.store.exists(orphan).await.unwrap());
    assert!(result.undo_record().is_none());
}

#[tokio::test]
async fn test_store_failure_surfaces_message() {
    let engine = TestEngine::with(seeded_catalog(ObjectId::new()), FullStore);

    let response = engine
        .orchestrator
        .run_batch(vec![png_item("ABC123.png")], PLAIN)
        .await;

    let result = &response.results[0];
    assert_eq!(result.status, ResultStatus::Error);
    assert_eq!(result.message, "Upload failed: disk full");
    assert_eq!(engine.catalog.attachment_count().await, 0);
}
