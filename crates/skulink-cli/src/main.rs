//! skulink: attach product images to catalog products by filename SKU.
//!
//! Settings come from SKULINK_* environment variables (or `.env`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use skulink_catalog::JsonCatalog;
use skulink_cli::{init_tracing, input, ledger, upload, DEFAULT_LEDGER_PATH};
use skulink_core::models::{AttachmentResult, ProductId};
use skulink_core::validation::validate_filename;
use skulink_core::Config;
use skulink_processing::{
    csv_report, BatchOptions, BatchOrchestrator, ImageProcessor, SessionRegistry, UndoLedger,
};
use skulink_storage::create_store;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "skulink", about = "Match product images to catalog SKUs")]
struct Cli {
    /// Catalog JSON file (overrides SKULINK_CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Object storage directory (overrides SKULINK_STORAGE_PATH)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload image files and attach them to products
    Upload {
        /// Image files named after product SKUs
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Ask for a replacement SKU when no product matches
        #[arg(long)]
        rename: bool,
        /// Ask before replacing an existing featured image
        #[arg(long)]
        handle_conflicts: bool,
        /// Write a CSV report of the results
        #[arg(long)]
        report: Option<PathBuf>,
        /// Undo ledger to write
        #[arg(long, default_value = DEFAULT_LEDGER_PATH)]
        ledger: PathBuf,
    },
    /// Reverse the uploads recorded in the undo ledger
    Undo {
        /// Undo ledger to consume
        #[arg(long, default_value = DEFAULT_LEDGER_PATH)]
        ledger: PathBuf,
    },
    /// Validate files and show which products they would match, without writing
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
struct UploadOutput {
    results: Vec<AttachmentResult>,
    succeeded: usize,
    failed: usize,
    undo_records: usize,
}

#[derive(Serialize)]
struct CheckEntry {
    filename: String,
    sku: Option<String>,
    product_id: Option<ProductId>,
    via_fallback: bool,
    message: String,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

struct Runtime {
    config: Config,
    catalog: Arc<JsonCatalog>,
    orchestrator: BatchOrchestrator,
    ledger: UndoLedger,
}

async fn build_runtime(cli: &Cli) -> anyhow::Result<Runtime> {
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(path) = &cli.catalog {
        config.catalog_path = path.clone();
    }
    if let Some(path) = &cli.storage_dir {
        config.storage_path = path.clone();
    }

    let catalog = Arc::new(
        JsonCatalog::open(&config.catalog_path)
            .await
            .with_context(|| format!("Failed to open catalog {}", config.catalog_path.display()))?,
    );
    let store = create_store(&config)
        .await
        .with_context(|| format!("Failed to open storage {}", config.storage_path.display()))?;

    let orchestrator = BatchOrchestrator::new(
        catalog.clone(),
        store.clone(),
        Arc::new(ImageProcessor),
        config.engine.clone(),
        SessionRegistry::from_secs(config.session_ttl_secs),
    );
    let ledger = UndoLedger::new(catalog.clone(), store);

    Ok(Runtime {
        config,
        catalog,
        orchestrator,
        ledger,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let runtime = build_runtime(&cli).await?;

    match cli.command {
        Commands::Upload {
            files,
            rename,
            handle_conflicts,
            report,
            ledger: ledger_path,
        } => {
            let items = input::read_uploads(&files).await;
            let options = BatchOptions {
                rename_enabled: rename,
                handle_conflicts,
            };

            let stdin = std::io::stdin();
            let mut prompt_in = stdin.lock();
            let mut prompt_out = std::io::stderr();
            let results = upload::run_rounds(
                &runtime.orchestrator,
                items,
                options,
                runtime.config.chunk_size,
                &mut prompt_in,
                &mut prompt_out,
            )
            .await?;

            runtime.catalog.persist().await?;

            let records = upload::undo_records(&results);
            if !records.is_empty() {
                ledger::save(&ledger_path, &records).await?;
            }

            if let Some(path) = report {
                tokio::fs::write(&path, csv_report(&results))
                    .await
                    .with_context(|| format!("Failed to write report {}", path.display()))?;
            }

            let succeeded = results.iter().filter(|r| r.is_success()).count();
            print_json(&UploadOutput {
                failed: results.len() - succeeded,
                succeeded,
                undo_records: records.len(),
                results,
            })?;
        }
        Commands::Undo { ledger: ledger_path } => {
            let records = ledger::load(&ledger_path).await?;
            let summary = runtime.ledger.undo(&records).await?;
            runtime.catalog.persist().await?;
            ledger::retain(&ledger_path, &summary.failed).await?;
            print_json(&summary)?;
        }
        Commands::Check { files } => {
            let items = input::read_uploads(&files).await;
            let mut entries = Vec::with_capacity(items.len());

            for item in &items {
                let mut entry = CheckEntry {
                    filename: item.filename.clone(),
                    sku: None,
                    product_id: None,
                    via_fallback: false,
                    message: String::new(),
                };

                if let Err(reason) = validate_filename(&item.filename).into_result() {
                    entry.message = reason;
                    entries.push(entry);
                    continue;
                }

                match runtime.orchestrator.resolver().resolve(&item.filename).await {
                    Ok(resolution) => {
                        entry.sku = Some(resolution.matched_sku);
                        entry.product_id = resolution.product_id;
                        entry.via_fallback = resolution.via_fallback;
                        entry.message = match resolution.product_id {
                            None => format!("No product found with SKU: {}", resolution.sku.raw),
                            Some(_) => match runtime
                                .orchestrator
                                .engine()
                                .validator()
                                .validate(item)
                                .await
                            {
                                Ok(validated) => format!(
                                    "OK ({} {}x{})",
                                    validated.type_name, validated.width, validated.height
                                ),
                                Err(e) => e.to_string(),
                            },
                        };
                    }
                    Err(e) => entry.message = e.to_string(),
                }
                entries.push(entry);
            }

            print_json(&entries)?;
        }
    }

    Ok(())
}
