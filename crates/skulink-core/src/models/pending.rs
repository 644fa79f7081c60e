use serde::{Deserialize, Serialize};

use super::{ObjectId, ProductId};

/// Item whose derived SKU matched no product, waiting for a replacement SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRename {
    pub index: usize,
    pub filename: String,
    pub original_sku: String,
}

/// Item whose product already has a primary image, waiting for a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConflict {
    pub index: usize,
    pub filename: String,
    pub product_id: ProductId,
    pub product_display_name: String,
    pub existing_image_id: ObjectId,
}

/// Caller decision for a pending conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictChoice {
    UseNew,
    KeepExisting,
}

/// Replacement SKU for a staged item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameDecision {
    pub index: usize,
    pub new_sku: String,
}

/// Conflict choice for a staged item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDecision {
    pub index: usize,
    pub product_id: ProductId,
    pub choice: ConflictChoice,
}
