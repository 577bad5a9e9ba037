// SPDX-License-Identifier: MPL-2.0
//! Category membership pages.

use super::title::Namespace;
use std::collections::BTreeMap;

/// One entry of a category membership listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMember {
    pub namespace: Namespace,
    pub title: String,
}

impl CategoryMember {
    #[must_use]
    pub fn new(namespace: Namespace, title: impl Into<String>) -> Self {
        Self {
            namespace,
            title: title.into(),
        }
    }
}

/// Opaque continuation parameters returned by the backend.
///
/// They are merged verbatim into the next request of the same listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Continuation(BTreeMap<String, String>);

impl Continuation {
    #[must_use]
    pub fn new(params: BTreeMap<String, String>) -> Self {
        Self(params)
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single page of category members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberPage {
    pub members: Vec<CategoryMember>,
    /// `Some` while more pages remain.
    pub continuation: Option<Continuation>,
}
