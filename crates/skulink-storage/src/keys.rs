//! Shared key generation for storage backends.
//!
//! Key format: `objects/{object_id}/{filename}`.

use skulink_core::models::ObjectId;
use skulink_core::validation::sanitize_file_name;

/// Directory prefix holding one object
pub fn object_prefix(id: ObjectId) -> String {
    format!("objects/{}", id)
}

/// Generate a storage key for the given object and upload filename.
///
/// The filename is sanitized; an empty result falls back to `file`.
pub fn generate_object_key(id: ObjectId, filename: &str) -> String {
    let safe = sanitize_file_name(filename);
    let safe = if safe.is_empty() || safe.contains("..") {
        "file".to_string()
    } else {
        safe
    };
    format!("{}/{}", object_prefix(id), safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let id = ObjectId::new();
        assert_eq!(generate_object_key(id, "ABC 1.jpg"), format!("objects/{}/ABC-1.jpg", id));
    }

    #[test]
    fn test_unsafe_names_fall_back() {
        let id = ObjectId::new();
        assert_eq!(generate_object_key(id, "***"), format!("objects/{}/file", id));
        assert_eq!(generate_object_key(id, "a..b.jpg"), format!("objects/{}/file", id));
    }
}
