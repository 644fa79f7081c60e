//! Validation modules

pub mod filename;
pub mod sku;

pub use filename::{file_extension, file_stem, sanitize_file_name, validate_filename, MAX_FILENAME_LENGTH};
pub use sku::{validate_sku, MAX_SKU_LENGTH};

/// Outcome of a name check. `reason` is set exactly when `valid` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCheck {
    pub valid: bool,
    pub reason: Option<String>,
}

impl NameCheck {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    /// Convert into a `Result`, carrying the rejection reason as the error.
    pub fn into_result(self) -> Result<(), String> {
        match self.reason {
            Some(reason) if !self.valid => Err(reason),
            _ => Ok(()),
        }
    }
}
