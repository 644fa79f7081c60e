//! SKU resolution
//!
//! Derives a SKU candidate from an upload filename and looks it up in the
//! catalog. When the exact SKU is unknown, one trailing variant suffix
//! (`-2`, `3`) is stripped and the lookup retried once.

use regex::Regex;
use skulink_core::catalog::Catalog;
use skulink_core::models::{DerivedSku, ProductId};
use skulink_core::validation::{file_stem, sanitize_file_name, validate_sku};
use skulink_core::AttachError;
use std::sync::{Arc, LazyLock};

static VARIANT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?\d+$").expect("variant suffix pattern is valid")
});

/// Outcome of resolving one filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub sku: DerivedSku,
    pub product_id: Option<ProductId>,
    /// SKU that produced the match (or the last one tried)
    pub matched_sku: String,
    pub via_fallback: bool,
}

/// Strip one trailing variant suffix (optional `-` then digits)
pub fn strip_variant_suffix(sku: &str) -> &str {
    match VARIANT_SUFFIX.find(sku) {
        Some(m) => &sku[..m.start()],
        None => sku,
    }
}

/// SKU candidate for a filename: extension removed, sanitized, validated.
pub fn derive_sku(filename: &str) -> Result<DerivedSku, AttachError> {
    let raw = sanitize_file_name(file_stem(filename));
    validate_sku(&raw)
        .into_result()
        .map_err(AttachError::Validation)?;
    let normalized = raw.trim().to_string();
    Ok(DerivedSku { raw, normalized })
}

pub struct SkuResolver {
    catalog: Arc<dyn Catalog>,
}

impl SkuResolver {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a filename to a product, falling back to the suffix-stripped SKU.
    ///
    /// At most two catalog lookups; a single one when stripping changes nothing
    /// or leaves nothing to look up.
    pub async fn resolve(&self, filename: &str) -> Result<Resolution, AttachError> {
        let sku = derive_sku(filename)?;

        if let Some(product_id) = self.catalog.find_product_id_by_sku(&sku.normalized).await? {
            tracing::debug!(filename = %filename, sku = %sku.normalized, product_id = %product_id, "SKU matched");
            return Ok(Resolution {
                matched_sku: sku.normalized.clone(),
                sku,
                product_id: Some(product_id),
                via_fallback: false,
            });
        }

        let fallback = strip_variant_suffix(&sku.normalized).trim();
        if fallback.is_empty() || fallback == sku.normalized {
            tracing::debug!(filename = %filename, sku = %sku.normalized, "SKU not found");
            return Ok(Resolution {
                matched_sku: sku.normalized.clone(),
                sku,
                product_id: None,
                via_fallback: false,
            });
        }

        let fallback = fallback.to_string();
        let product_id = self.catalog.find_product_id_by_sku(&fallback).await?;
        tracing::debug!(
            filename = %filename,
            sku = %sku.normalized,
            fallback_sku = %fallback,
            found = product_id.is_some(),
            "Variant fallback lookup"
        );

        Ok(Resolution {
            via_fallback: product_id.is_some(),
            matched_sku: fallback,
            sku,
            product_id,
        })
    }

    /// Exact lookup of a caller-supplied SKU, without variant fallback
    pub async fn resolve_exact(&self, sku: &str) -> Result<Option<ProductId>, AttachError> {
        validate_sku(sku)
            .into_result()
            .map_err(AttachError::Validation)?;
        Ok(self.catalog.find_product_id_by_sku(sku.trim()).await?)
    }
}
