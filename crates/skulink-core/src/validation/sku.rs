//! SKU candidate validation

use super::NameCheck;

/// Maximum accepted SKU length (characters)
pub const MAX_SKU_LENGTH: usize = 100;

const FORBIDDEN_CHARS: &[char] = &['<', '>', '"', '\''];

/// Check a SKU candidate after trimming surrounding whitespace.
pub fn validate_sku(candidate: &str) -> NameCheck {
    let sku = candidate.trim();

    if sku.is_empty() {
        return NameCheck::rejected("SKU is empty");
    }

    let length = sku.chars().count();
    if length > MAX_SKU_LENGTH {
        return NameCheck::rejected(format!(
            "SKU is too long ({} characters, max {})",
            length, MAX_SKU_LENGTH
        ));
    }

    if let Some(c) = sku.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return NameCheck::rejected(format!("SKU contains invalid character '{}'", c));
    }

    if sku.chars().any(|c| c.is_control()) {
        return NameCheck::rejected("SKU contains control characters");
    }

    NameCheck::ok()
}
