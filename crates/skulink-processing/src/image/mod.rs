//! Image inspection: header decoding and derived metadata

mod processor;

pub use processor::ImageProcessor;

use serde::{Deserialize, Serialize};

/// Image inspection errors
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("unrecognized image format")]
    UnknownFormat,

    #[error("{0}")]
    Decode(String),
}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Decode(err.to_string())
    }
}

/// Pixel dimensions read from an image header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
}

/// Derived metadata stored on the catalog attachment entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size_bytes: u64,
}

/// Reads image content. Implementations are CPU-bound and called off the async pool.
pub trait ImageInspector: Send + Sync {
    /// Probe the header for dimensions without decoding pixel data
    fn decode_header(&self, data: &[u8]) -> Result<ImageHeader, ImageError>;

    /// Fully decode and describe the image
    fn extract_metadata(&self, data: &[u8]) -> Result<ImageMetadata, ImageError>;
}
