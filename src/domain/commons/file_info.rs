// SPDX-License-Identifier: MPL-2.0
//! Display data of a single file.

use super::title::FileTitle;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use std::borrow::Cow;

/// Basic image information from the image-info lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageInfo {
    /// Page id; the MediaInfo entity id is `M{page_id}`.
    pub page_id: u64,
    /// Unconstrained file URL.
    pub url: String,
    /// Width-constrained URL, or `url` when the backend returned none.
    pub thumb_url: String,
    /// Canonical description page.
    pub description_url: String,
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
    /// `LicenseShortName` from the extended metadata, as plain text.
    pub ext_license: Option<String>,
    /// `Artist` from the extended metadata, as plain text.
    pub ext_artist: Option<String>,
}

impl ImageInfo {
    /// MediaInfo entity id holding the structured statements of this file.
    #[must_use]
    pub fn media_info_id(&self) -> String {
        format!("M{}", self.page_id)
    }
}

/// Everything needed to render one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileInfo {
    pub title: String,
    pub url: String,
    pub thumb_url: String,
    pub description_url: String,
    pub mime: String,
    pub size: u64,
    /// License label, empty when unknown.
    pub license: String,
    /// Author label, empty when unknown.
    pub author: String,
}

impl FileInfo {
    #[must_use]
    pub fn from_image_info(title: &FileTitle, info: ImageInfo) -> Self {
        Self {
            title: title.as_str().to_string(),
            url: info.url,
            thumb_url: info.thumb_url,
            description_url: info.description_url,
            mime: info.mime,
            size: info.size,
            license: String::new(),
            author: String::new(),
        }
    }
}

/// Reduces an HTML fragment to plain text: tags are dropped, character
/// references decoded once and runs of whitespace collapsed.
///
/// Text with a malformed reference (e.g. a bare `&`) is kept undecoded.
#[must_use]
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let decoded = unescape_with(&text, resolve_html5_entity).unwrap_or_else(|err| {
        log::debug!("Keeping undecoded text {:?}: {}", text, err);
        Cow::Borrowed(text.as_str())
    });
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
