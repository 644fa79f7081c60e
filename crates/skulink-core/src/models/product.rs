use serde::{Deserialize, Serialize};

use super::{ObjectId, ProductId};

/// Display metadata the catalog exposes for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDisplay {
    pub name: String,
    pub permalink: String,
    /// Opaque rendering hint (e.g. an HTML thumbnail snippet or image URL)
    pub image_render_hint: String,
}

/// Product as seen by the engine during one batch. Never cached beyond it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    #[serde(flatten)]
    pub display: ProductDisplay,
    pub primary_image_id: Option<ObjectId>,
}
