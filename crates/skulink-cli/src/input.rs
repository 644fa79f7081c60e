//! Reading local files into upload items

use skulink_core::models::UploadItem;
use skulink_core::TransportError;
use skulink_processing::content_type_for_extension;
use std::io::ErrorKind;
use std::path::Path;

/// Read `path` as an upload item named after its final path component.
///
/// Missing files become transport failures and other read errors unreadable
/// items, so they are reported per file instead of aborting the run.
pub async fn read_upload(path: &Path) -> UploadItem {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| content_type_for_extension(&e.to_lowercase()))
        .unwrap_or("application/octet-stream");

    match tokio::fs::read(path).await {
        Ok(data) => UploadItem::new(filename, data, mime_type),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Input file not found");
            UploadItem::failed(filename, TransportError::NoFile)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read input file");
            UploadItem::unreadable(filename, 0, mime_type)
        }
    }
}

pub async fn read_uploads(paths: &[impl AsRef<Path>]) -> Vec<UploadItem> {
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        items.push(read_upload(path.as_ref()).await);
    }
    items
}
