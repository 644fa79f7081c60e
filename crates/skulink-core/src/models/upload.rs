use bytes::Bytes;

use crate::error::TransportError;

/// One file of a batch, as decoded by the transport layer.
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub filename: String,
    /// `None` when the transport could not hand over readable content.
    pub content: Option<Bytes>,
    pub declared_size: u64,
    pub declared_mime_type: String,
    pub transport_error: Option<TransportError>,
}

impl UploadItem {
    /// Build an item from fully received content; the declared size is the content length.
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<Bytes>,
        declared_mime_type: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            filename: filename.into(),
            declared_size: content.len() as u64,
            content: Some(content),
            declared_mime_type: declared_mime_type.into(),
            transport_error: None,
        }
    }

    /// Item whose upload failed at the transport level.
    pub fn failed(filename: impl Into<String>, error: TransportError) -> Self {
        Self {
            filename: filename.into(),
            content: None,
            declared_size: 0,
            declared_mime_type: String::new(),
            transport_error: Some(error),
        }
    }

    /// Item whose content could not be read.
    pub fn unreadable(
        filename: impl Into<String>,
        declared_size: u64,
        declared_mime_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: None,
            declared_size,
            declared_mime_type: declared_mime_type.into(),
            transport_error: None,
        }
    }

    pub fn with_declared_size(mut self, declared_size: u64) -> Self {
        self.declared_size = declared_size;
        self
    }
}

/// SKU candidate derived from a filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSku {
    /// Extension-stripped, sanitized stem
    pub raw: String,
    /// Trimmed and validated form used for lookups
    pub normalized: String,
}
