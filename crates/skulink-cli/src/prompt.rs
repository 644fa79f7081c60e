//! Interactive decisions for staged items

use skulink_core::models::{
    ConflictChoice, ConflictDecision, PendingConflict, PendingRename, RenameDecision,
};
use std::io::{self, BufRead, Write};

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a replacement SKU per pending rename. A blank answer (or end of
/// input) skips the file.
pub fn ask_renames<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    pending: &[PendingRename],
) -> io::Result<Vec<RenameDecision>> {
    let mut decisions = Vec::with_capacity(pending.len());
    for rename in pending {
        write!(
            output,
            "No product found with SKU '{}' ({}). New SKU (blank to skip): ",
            rename.original_sku, rename.filename
        )?;
        output.flush()?;
        let new_sku = read_answer(input)?.unwrap_or_default();
        decisions.push(RenameDecision {
            index: rename.index,
            new_sku,
        });
    }
    Ok(decisions)
}

/// Ask `n` (use new) or `k` (keep existing) per pending conflict. End of input keeps the existing image.
pub fn ask_conflicts<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    pending: &[PendingConflict],
) -> io::Result<Vec<ConflictDecision>> {
    let mut decisions = Vec::with_capacity(pending.len());
    for conflict in pending {
        let choice = loop {
            write!(
                output,
                "'{}' already has a featured image ({}). Use [n]ew or [k]eep existing? ",
                conflict.product_display_name, conflict.filename
            )?;
            output.flush()?;
            match read_answer(input)?.map(|a| a.to_lowercase()).as_deref() {
                Some("n") | Some("new") => break ConflictChoice::UseNew,
                Some("k") | Some("keep") | None => break ConflictChoice::KeepExisting,
                Some(_) => writeln!(output, "Please answer 'n' or 'k'.")?,
            }
        };
        decisions.push(ConflictDecision {
            index: conflict.index,
            product_id: conflict.product_id,
            choice,
        });
    }
    Ok(decisions)
}
