use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::ObjectId;

/// Ordered set of gallery image ids for one product.
///
/// Insertion order is preserved and duplicates are rejected, so an object can
/// appear in a product's gallery at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GalleryImages(Vec<ObjectId>);

impl GalleryImages {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `id`. Returns `false` (and leaves the set unchanged) if it is already present.
    pub fn insert(&mut self, id: ObjectId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove `id`, returning whether it was present.
    pub fn remove(&mut self, id: &ObjectId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        self.0.len() != before
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.0
    }
}

impl FromIterator<ObjectId> for GalleryImages {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        let mut gallery = GalleryImages::new();
        for id in iter {
            gallery.insert(id);
        }
        gallery
    }
}

// Deserialization goes through `FromIterator` so duplicates in stored data collapse.
impl<'de> Deserialize<'de> for GalleryImages {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ids = Vec::<ObjectId>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}

impl Display for GalleryImages {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let joined = self
            .0
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}
