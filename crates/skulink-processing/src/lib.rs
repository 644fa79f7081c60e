//! skulink Processing Library
//!
//! The matching-and-attachment engine: derives a SKU from each upload filename,
//! resolves it against the catalog, validates and stores the image, binds it to
//! the product as primary or gallery image, and reverses those bindings on undo.
//!
//! Flow for one batch: [`BatchOrchestrator`] → filename validation →
//! [`SkuResolver`] → [`AttachmentEngine`], or staging into a [`BatchSession`]
//! that the [`Coordinator`] later resolves from caller decisions.

pub mod attach;
pub mod batch;
pub mod coordinator;
pub mod image;
pub mod report;
pub mod resolver;
pub mod session;
pub mod undo;
pub mod validator;

pub use attach::AttachmentEngine;
pub use batch::{BatchOptions, BatchOrchestrator, BatchResponse};
pub use coordinator::Coordinator;
pub use crate::image::{ImageError, ImageHeader, ImageInspector, ImageMetadata, ImageProcessor};
pub use report::csv_report;
pub use resolver::{Resolution, SkuResolver};
pub use session::{BatchSession, SessionError, SessionRegistry};
pub use undo::{UndoError, UndoLedger};
pub use validator::{content_type_for_extension, UploadValidator, ValidatedUpload};
