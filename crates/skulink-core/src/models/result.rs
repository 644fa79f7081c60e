use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{ObjectId, ProductDisplay, ProductId, UndoRecord};
use crate::error::{AttachError, ErrorMetadata};

/// Outcome category of one upload item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
    Invalid,
    Skipped,
}

impl Display for ResultStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ResultStatus::Success => write!(f, "success"),
            ResultStatus::Error => write!(f, "error"),
            ResultStatus::Invalid => write!(f, "invalid"),
            ResultStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Per-file outcome.
///
/// `status == Success` exactly when both `attachment_id` and `product_id` are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentResult {
    pub filename: String,
    pub status: ResultStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDisplay>,
    /// Object that was stored and registered but could not be bound to the product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphaned_attachment_id: Option<ObjectId>,
}

impl AttachmentResult {
    pub fn success(
        filename: impl Into<String>,
        attachment_id: ObjectId,
        product_id: ProductId,
        is_featured: bool,
        product: ProductDisplay,
    ) -> Self {
        let message = if is_featured {
            "Image set as featured"
        } else {
            "Image added to gallery"
        };
        Self {
            filename: filename.into(),
            status: ResultStatus::Success,
            message: message.to_string(),
            attachment_id: Some(attachment_id),
            product_id: Some(product_id),
            is_featured,
            product: Some(product),
            orphaned_attachment_id: None,
        }
    }

    fn bare(filename: impl Into<String>, status: ResultStatus, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status,
            message: message.into(),
            attachment_id: None,
            product_id: None,
            is_featured: false,
            product: None,
            orphaned_attachment_id: None,
        }
    }

    pub fn error(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::bare(filename, ResultStatus::Error, message)
    }

    pub fn invalid(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::bare(filename, ResultStatus::Invalid, message)
    }

    pub fn skipped(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::bare(filename, ResultStatus::Skipped, message)
    }

    /// Error result built from an [`AttachError`]; name/SKU problems report as `invalid`.
    pub fn from_error(filename: impl Into<String>, err: &AttachError) -> Self {
        match err {
            AttachError::NotFound(_) => Self::invalid(filename, err.client_message()),
            _ => Self::error(filename, err.client_message()),
        }
    }

    pub fn with_orphan(mut self, orphan: ObjectId) -> Self {
        self.orphaned_attachment_id = Some(orphan);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    /// Undo record for a successful result
    pub fn undo_record(&self) -> Option<UndoRecord> {
        match (self.status, self.attachment_id, self.product_id) {
            (ResultStatus::Success, Some(attachment_id), Some(product_id)) => Some(UndoRecord {
                attachment_id,
                product_id,
                is_featured: self.is_featured,
            }),
            _ => None,
        }
    }
}
