// SPDX-License-Identifier: MPL-2.0
//! Page titles of the Commons content graph.
//!
//! Titles carry their namespace prefix (`Category:` or `File:`) exactly once,
//! so two spellings of the same page compare equal and can key a visited set.

use crate::error::{InputError, Result};
use std::fmt;

/// Namespace prefix of category pages.
pub const CATEGORY_PREFIX: &str = "Category:";

/// Namespace prefix of file pages.
pub const FILE_PREFIX: &str = "File:";

/// Image extensions accepted by the category lister (compared case-insensitively).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "webp", "tiff", "tif", "bmp", "ico",
];

/// MediaWiki namespace of a category member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Namespace 6.
    File,
    /// Namespace 14.
    Subcategory,
    /// Anything else (galleries, user pages, ...).
    Other(i64),
}

impl Namespace {
    #[must_use]
    pub fn from_id(id: i64) -> Self {
        match id {
            6 => Namespace::File,
            14 => Namespace::Subcategory,
            other => Namespace::Other(other),
        }
    }
}

/// A category title, normalized to carry the `Category:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryName(String);

impl CategoryName {
    /// Normalizes user input into a category title.
    ///
    /// Surrounding whitespace is trimmed, underscores become spaces and the
    /// namespace prefix is added when absent.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyCategory`] when nothing but whitespace
    /// (or a bare prefix) was given.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned = raw.trim().replace('_', " ");
        let name = cleaned
            .strip_prefix(CATEGORY_PREFIX)
            .unwrap_or(&cleaned)
            .trim();
        if name.is_empty() {
            return Err(InputError::EmptyCategory.into());
        }
        Ok(Self(format!("{CATEGORY_PREFIX}{name}")))
    }

    /// Full title including the namespace prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name without the namespace prefix.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.0.strip_prefix(CATEGORY_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file title, normalized to carry the `File:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileTitle(String);

impl FileTitle {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        let name = raw.strip_prefix(FILE_PREFIX).unwrap_or(raw);
        Self(format!("{FILE_PREFIX}{name}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without the namespace prefix.
    #[must_use]
    pub fn bare_name(&self) -> &str {
        self.0.strip_prefix(FILE_PREFIX).unwrap_or(&self.0)
    }

    /// Lower-cased extension, if the name has one.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let name = self.bare_name();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Checks the extension against [`SUPPORTED_IMAGE_EXTENSIONS`].
    #[must_use]
    pub fn is_supported_image(&self) -> bool {
        self.extension()
            .is_some_and(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Path segment of the description page: `File:` followed by the
    /// percent-encoded name, spaces turned into underscores.
    #[must_use]
    pub fn url_path(&self) -> String {
        let name = self.bare_name().replace(' ', "_");
        format!("{FILE_PREFIX}{}", urlencoding::encode(&name))
    }
}

impl fmt::Display for FileTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
