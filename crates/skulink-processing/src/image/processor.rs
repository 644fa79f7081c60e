//! Image processor - header probing and metadata extraction

use image::{GenericImageView, ImageReader};
use std::io::Cursor;

use super::{ImageError, ImageHeader, ImageInspector, ImageMetadata};

pub struct ImageProcessor;

impl ImageInspector for ImageProcessor {
    fn decode_header(&self, data: &[u8]) -> Result<ImageHeader, ImageError> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        if reader.format().is_none() {
            return Err(ImageError::UnknownFormat);
        }
        let (width, height) = reader.into_dimensions()?;
        Ok(ImageHeader { width, height })
    }

    fn extract_metadata(&self, data: &[u8]) -> Result<ImageMetadata, ImageError> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader
            .format()
            .map(|f| format!("{:?}", f).to_lowercase())
            .ok_or(ImageError::UnknownFormat)?;
        let img = reader.decode()?;
        let (width, height) = img.dimensions();

        Ok(ImageMetadata {
            width,
            height,
            format,
            size_bytes: data.len() as u64,
        })
    }
}
