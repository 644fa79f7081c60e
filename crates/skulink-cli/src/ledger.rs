//! Undo ledger file: the success records of the last upload run

use anyhow::Context;
use skulink_core::models::UndoRecord;
use std::io::ErrorKind;
use std::path::Path;

/// Load records; a missing ledger holds none.
pub async fn load(path: &Path) -> anyhow::Result<Vec<UndoRecord>> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read ledger {}", path.display()))
        }
    };
    serde_json::from_slice(&raw).with_context(|| format!("Failed to parse ledger {}", path.display()))
}

pub async fn save(path: &Path, records: &[UndoRecord]) -> anyhow::Result<()> {
    let body = serde_json::to_vec_pretty(records).context("Serialize undo records")?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write ledger {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "Undo ledger written");
    Ok(())
}

pub async fn remove(path: &Path) -> anyhow::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove ledger {}", path.display())),
    }
}

/// Rewrite the ledger with the records still to be undone, removing it when none remain.
pub async fn retain(path: &Path, remaining: &[UndoRecord]) -> anyhow::Result<()> {
    if remaining.is_empty() {
        remove(path).await
    } else {
        save(path, remaining).await
    }
}
