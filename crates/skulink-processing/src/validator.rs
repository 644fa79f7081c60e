//! Upload validation
//!
//! Runs the per-item checks in a fixed order and stops at the first failure:
//! transport error, filename, readability, size limit, emptiness, type
//! resolution, allowed types, image decoding and minimum dimensions.

use bytes::Bytes;
use skulink_core::config::EngineConfig;
use skulink_core::models::UploadItem;
use skulink_core::validation::{file_extension, validate_filename};
use skulink_core::AttachError;
use std::sync::Arc;

use crate::image::{ImageHeader, ImageInspector};

/// Upload that passed every check
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub content: Bytes,
    /// Resolved type name (lowercase extension or MIME subtype)
    pub type_name: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// Content type for a lowercase file extension
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        // Documents
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        _ => return None,
    };
    Some(content_type)
}

pub struct UploadValidator {
    config: EngineConfig,
    inspector: Arc<dyn ImageInspector>,
}

impl UploadValidator {
    pub fn new(config: EngineConfig, inspector: Arc<dyn ImageInspector>) -> Self {
        Self { config, inspector }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn validate(&self, item: &UploadItem) -> Result<ValidatedUpload, AttachError> {
        if let Some(transport) = item.transport_error {
            return Err(AttachError::Transport(transport));
        }

        validate_filename(&item.filename)
            .into_result()
            .map_err(AttachError::Validation)?;

        let content = item
            .content
            .clone()
            .ok_or_else(|| AttachError::Validation("Cannot read uploaded file".to_string()))?;

        let size = item.declared_size;
        if size > self.config.max_upload_bytes {
            return Err(AttachError::Validation(format!(
                "File too large: {} bytes (max: {} bytes)",
                size, self.config.max_upload_bytes
            )));
        }
        if size == 0 {
            return Err(AttachError::Validation("File is empty".to_string()));
        }

        let (type_name, mime_type) = self.resolve_type(item)?;
        if !self.config.is_allowed_type(&type_name) {
            return Err(AttachError::Validation(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                type_name,
                self.config.allowed_types.join(", ")
            )));
        }

        let header = self.decode_header(content.clone()).await?;
        let min = self.config.min_image_dimension;
        if header.width < min || header.height < min {
            return Err(AttachError::Validation(format!(
                "Image dimensions {}x{} are below the minimum of {}x{}",
                header.width, header.height, min, min
            )));
        }

        Ok(ValidatedUpload {
            content,
            type_name,
            mime_type,
            width: header.width,
            height: header.height,
        })
    }

    /// Type name and MIME type, from the file extension only
    fn resolve_type(&self, item: &UploadItem) -> Result<(String, String), AttachError> {
        file_extension(&item.filename)
            .map(str::to_lowercase)
            .and_then(|ext| {
                content_type_for_extension(&ext).map(|content_type| (ext, content_type.to_string()))
            })
            .ok_or_else(|| AttachError::Validation("Invalid or unknown file type".to_string()))
    }

    async fn decode_header(&self, content: Bytes) -> Result<ImageHeader, AttachError> {
        let inspector = self.inspector.clone();
        tokio::task::spawn_blocking(move || inspector.decode_header(&content))
            .await
            .map_err(|e| AttachError::Validation(format!("Corrupted or invalid image: {}", e)))?
            .map_err(|e| AttachError::Validation(format!("Corrupted or invalid image: {}", e)))
    }
}
