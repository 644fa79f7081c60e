//! Serializable catalog state

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use skulink_core::models::{GalleryImages, ObjectId, ProductDisplay, ProductId};

/// One catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub image_render_hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "GalleryImages::is_empty")]
    pub gallery: GalleryImages,
}

impl ProductEntry {
    pub fn new(id: u64, sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProductId(id),
            sku: sku.into(),
            name: name.into(),
            permalink: String::new(),
            image_render_hint: String::new(),
            primary_image: None,
            gallery: GalleryImages::new(),
        }
    }

    pub fn with_primary_image(mut self, id: ObjectId) -> Self {
        self.primary_image = Some(id);
        self
    }

    pub fn display(&self) -> ProductDisplay {
        ProductDisplay {
            name: self.name.clone(),
            permalink: self.permalink.clone(),
            image_render_hint: self.image_render_hint.clone(),
        }
    }
}

/// Attachment entity bound to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentEntry {
    pub id: ObjectId,
    pub product_id: ProductId,
    pub title: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

/// Whole-catalog snapshot, the on-disk format of [`JsonCatalog`](crate::JsonCatalog)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub attachments: Vec<AttachmentEntry>,
}
