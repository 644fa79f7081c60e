//! Test fixtures: encoded images and upload items.

use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};
use skulink_core::models::UploadItem;
use std::io::Cursor;

/// PNG of the given dimensions
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

pub fn png_bytes(width: u32, height: u32) -> Bytes {
    Bytes::from(create_test_png(width, height))
}

/// Valid 60x60 PNG upload
pub fn png_item(filename: &str) -> UploadItem {
    UploadItem::new(filename, create_test_png(60, 60), "image/png")
}
