//! Error types module
//!
//! Every per-file failure is expressed as an [`AttachError`]. The batch orchestrator
//! never propagates these upwards: each one is turned into an `AttachmentResult`
//! carrying the human-readable message, and logged at the level reported by
//! [`ErrorMetadata::log_level`].

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like conflicts
    Warn,
    /// Error level - for unexpected failures of a collaborator
    Error,
}

/// Metadata describing how an error should be reported.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "STORE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Message surfaced to the caller in the per-file result
    fn client_message(&self) -> String;
}

/// Upload failure declared by the transport layer before the file reached the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportError {
    SizeExceeded,
    Partial,
    NoFile,
    NoTempDir,
    WriteFailure,
    BlockedByPolicy,
    Unknown(i32),
}

impl TransportError {
    /// Map a numeric upload error code (as produced by common multipart decoders) to a variant.
    /// Returns `None` for the "no error" code `0`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => None,
            1 | 2 => Some(TransportError::SizeExceeded),
            3 => Some(TransportError::Partial),
            4 => Some(TransportError::NoFile),
            6 => Some(TransportError::NoTempDir),
            7 => Some(TransportError::WriteFailure),
            8 => Some(TransportError::BlockedByPolicy),
            other => Some(TransportError::Unknown(other)),
        }
    }

    /// Human-readable cause
    pub fn cause(&self) -> String {
        match self {
            TransportError::SizeExceeded => "The uploaded file exceeds the maximum upload size".to_string(),
            TransportError::Partial => "The uploaded file was only partially uploaded".to_string(),
            TransportError::NoFile => "No file was uploaded".to_string(),
            TransportError::NoTempDir => "Missing a temporary folder".to_string(),
            TransportError::WriteFailure => "Failed to write file to disk".to_string(),
            TransportError::BlockedByPolicy => "File upload stopped by extension".to_string(),
            TransportError::Unknown(code) => format!("Unknown upload error (code {})", code),
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.cause())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("File upload error: {0}")]
    Transport(TransportError),

    #[error("{0}")]
    Validation(String),

    #[error("No product found with SKU: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Catalog(String),
}

impl From<crate::catalog::CatalogError> for AttachError {
    fn from(err: crate::catalog::CatalogError) -> Self {
        AttachError::Catalog(err.to_string())
    }
}

impl ErrorMetadata for AttachError {
    fn error_code(&self) -> &'static str {
        match self {
            AttachError::Transport(_) => "TRANSPORT_ERROR",
            AttachError::Validation(_) => "VALIDATION_ERROR",
            AttachError::NotFound(_) => "NOT_FOUND",
            AttachError::Conflict(_) => "CONFLICT",
            AttachError::Store(_) => "STORE_ERROR",
            AttachError::Catalog(_) => "CATALOG_ERROR",
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AttachError::Transport(_) | AttachError::Validation(_) | AttachError::NotFound(_) => {
                LogLevel::Debug
            }
            AttachError::Conflict(_) => LogLevel::Warn,
            AttachError::Store(_) | AttachError::Catalog(_) => LogLevel::Error,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl AttachError {
    /// Emit this error through `tracing` at its own log level.
    pub fn log(&self, filename: &str) {
        match self.log_level() {
            LogLevel::Debug => tracing::debug!(
                filename = %filename,
                code = self.error_code(),
                error = %self,
                "Upload item rejected"
            ),
            LogLevel::Warn => tracing::warn!(
                filename = %filename,
                code = self.error_code(),
                error = %self,
                "Upload item rejected"
            ),
            LogLevel::Error => tracing::error!(
                filename = %filename,
                code = self.error_code(),
                error = %self,
                "Upload item failed"
            ),
        }
    }
}
