//! Chunked upload rounds with interactive resolution

use skulink_core::models::{AttachmentResult, UndoRecord, UploadItem};
use skulink_processing::{BatchOptions, BatchOrchestrator};
use std::io::{BufRead, Write};

/// Run `items` through the orchestrator in rounds of `chunk_size`, asking for
/// decisions on staged items before the next round starts.
pub async fn run_rounds<R: BufRead, W: Write>(
    orchestrator: &BatchOrchestrator,
    items: Vec<UploadItem>,
    options: BatchOptions,
    chunk_size: usize,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Vec<AttachmentResult>> {
    let chunk_size = chunk_size.max(1);
    let total = items.len();
    let mut results = Vec::with_capacity(total);
    let mut items = items.into_iter().peekable();
    let mut round = 0;

    while items.peek().is_some() {
        let chunk: Vec<UploadItem> = items.by_ref().take(chunk_size).collect();
        round += 1;
        tracing::debug!(round, files = chunk.len(), total, "Upload round");

        let response = orchestrator.run_batch(chunk, options).await;
        results.extend(response.results);

        let Some(batch_id) = response.batch_id else {
            continue;
        };

        if !response.pending_renames.is_empty() {
            let decisions =
                crate::prompt::ask_renames(input, output, &response.pending_renames)?;
            let resolved = orchestrator.resolve_renames(batch_id, &decisions).await?;
            results.extend(resolved.results);
        }

        if !response.pending_conflicts.is_empty() {
            let decisions =
                crate::prompt::ask_conflicts(input, output, &response.pending_conflicts)?;
            let resolved = orchestrator.resolve_conflicts(batch_id, &decisions).await?;
            results.extend(resolved.results);
        }
    }

    Ok(results)
}

/// Undo records for every successful result, in result order
pub fn undo_records(results: &[AttachmentResult]) -> Vec<UndoRecord> {
    results.iter().filter_map(|r| r.undo_record()).collect()
}
