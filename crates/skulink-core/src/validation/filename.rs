//! Filename validation and sanitization
//!
//! Checks run before any I/O; none of these functions touch the filesystem.

use super::NameCheck;

/// Maximum accepted filename length (bytes)
pub const MAX_FILENAME_LENGTH: usize = 255;

const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

// Stripped by `sanitize_file_name`, in addition to control characters.
const SANITIZE_STRIP: &[char] = &[
    '?', '[', ']', '/', '\\', '=', '<', '>', ':', ';', ',', '\'', '"', '&', '$', '#', '*', '(',
    ')', '|', '~', '`', '!', '{', '}', '%', '+',
];

/// Structural filename check.
///
/// Rejects empty names, reserved characters `< > : " / \ | ? *`, control
/// characters, names longer than 255 bytes and names without an extension.
pub fn validate_filename(name: &str) -> NameCheck {
    if name.is_empty() {
        return NameCheck::rejected("Filename is empty");
    }

    if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return NameCheck::rejected(format!("Filename contains invalid character '{}'", c));
    }

    if name.chars().any(|c| c.is_control()) {
        return NameCheck::rejected("Filename contains control characters");
    }

    if name.len() > MAX_FILENAME_LENGTH {
        return NameCheck::rejected(format!(
            "Filename is too long ({} characters, max {})",
            name.len(),
            MAX_FILENAME_LENGTH
        ));
    }

    if file_extension(name).is_none() {
        return NameCheck::rejected("Filename has no extension");
    }

    NameCheck::ok()
}

/// Extension after the last `.`, if it has at least one character.
pub fn file_extension(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

/// Name with the final extension removed. Names without an extension are returned as-is.
pub fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => stem,
        _ => name,
    }
}

/// Make a filename safe to use as a storage and lookup token.
///
/// Removes reserved punctuation and control characters, collapses whitespace
/// runs into a single `-` and trims leading/trailing `.`, `-` and `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_control() || SANITIZE_STRIP.contains(&c) {
            continue;
        }
        if c.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if pending_dash {
            if !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
        }
        out.push(c);
    }

    out.trim_matches(|c| c == '.' || c == '-' || c == '_').to_string()
}
