use serde::{Deserialize, Serialize};

use super::{ObjectId, ProductId};

/// What the caller keeps to reverse one successful attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRecord {
    pub attachment_id: ObjectId,
    pub product_id: ProductId,
    pub is_featured: bool,
}

/// Outcome of an undo request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoSummary {
    pub undone: usize,
    pub errors: usize,
    pub message: String,
    /// Records that could not be undone, in input order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<UndoRecord>,
}

impl UndoSummary {
    pub fn new(undone: usize, failed: Vec<UndoRecord>) -> Self {
        let errors = failed.len();
        let suffix = if errors > 0 {
            format!(" with {} error(s)", errors)
        } else {
            String::new()
        };
        Self {
            undone,
            errors,
            message: format!("Successfully undone {} upload(s){}", undone, suffix),
            failed,
        }
    }
}
