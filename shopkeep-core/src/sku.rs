//! SKU parsing and image filename classification.
//!
//! Product images arrive named after the SKU they belong to:
//! `123456789.jpg` for the primary image, `123456789-1.jpg` for extra
//! variant shots. Everything else is routed out of the pending directory
//! before any catalog lookups happen.

use std::fmt;

/// Image formats the catalog accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Upload ceiling imposed by the catalog API.
pub const MAX_IMAGE_BYTES: u64 = 15_000_000;

/// Housekeeping files that appear in synced folders and are never images.
const IGNORED_FILES: &[&str] = &["desktop.ini"];

/// A 9-digit numeric stock keeping unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sku(String);

impl Sku {
    /// Parse a SKU from a string: exactly nine ASCII digits.
    pub fn parse(s: &str) -> Option<Sku> {
        if s.len() == 9 && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(Sku(s.to_owned()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal classification of a scanned image file.
///
/// Every non-ignored file lands in exactly one class; the router uses the
/// class to pick a destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageClass {
    /// Base name is a bare 9-digit SKU; eligible for catalog correlation.
    ValidSku(Sku),
    /// SKU plus a short numeric variant suffix (`123456789-1.jpg`).
    DuplicateVariant,
    /// Base name fits neither pattern.
    InvalidName,
    /// Extension outside [`ALLOWED_EXTENSIONS`], or no extension at all.
    InvalidType,
    /// File is larger than [`MAX_IMAGE_BYTES`].
    InvalidSize,
}

/// Returns true for housekeeping files the scan skips entirely.
pub fn is_ignored(file_name: &str) -> bool {
    IGNORED_FILES.contains(&file_name)
}

/// Classify a file by its name and byte size.
///
/// Checks run in a fixed order (type, then size, then name) so a file
/// that breaks several rules lands in the first failing class and the
/// classes stay mutually exclusive.
pub fn classify(file_name: &str, size: u64) -> ImageClass {
    let (base, extension) = split_name(file_name);

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {}
        _ => return ImageClass::InvalidType,
    }

    if size > MAX_IMAGE_BYTES {
        return ImageClass::InvalidSize;
    }

    classify_base_name(base)
}

/// Split a filename at its first dot into base name and extension token.
///
/// The extension is the token between the first and second dot, so
/// `"a.tar.gz"` yields `("a", Some("tar"))` and a dotless name has no
/// extension.
fn split_name(file_name: &str) -> (&str, Option<&str>) {
    match file_name.split_once('.') {
        Some((base, rest)) => (base, rest.split('.').next()),
        None => (file_name, None),
    }
}

fn classify_base_name(base: &str) -> ImageClass {
    let parts: Vec<&str> = base.split('-').collect();
    match parts.as_slice() {
        [sku] => match Sku::parse(sku) {
            Some(sku) => ImageClass::ValidSku(sku),
            None => ImageClass::InvalidName,
        },
        // A dash marks a variant shot; the suffix alone decides (one or
        // two digits), matching how the image folders have always been
        // curated.
        [_, suffix] => {
            if !suffix.is_empty()
                && suffix.len() < 3
                && suffix.bytes().all(|b| b.is_ascii_digit())
            {
                ImageClass::DuplicateVariant
            } else {
                ImageClass::InvalidName
            }
        }
        _ => ImageClass::InvalidName,
    }
}

#[cfg(test)]
#[path = "tests/sku_tests.rs"]
mod tests;
