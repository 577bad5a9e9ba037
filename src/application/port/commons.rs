// SPDX-License-Identifier: MPL-2.0
//! Commons backend port definition.
//!
//! The category lister and metadata resolver only see this trait; the
//! MediaWiki HTTP adapter lives in `infrastructure::mediawiki` and tests use
//! an in-memory implementation.
//!
//! # Operations
//!
//! - **Category members**: one page of file and subcategory members
//! - **Category existence**: whether a category page exists at all
//! - **Image info**: file URL, thumbnail URL, description page, MIME, size
//! - **Statements**: structured statements of a MediaInfo entity
//! - **Entity label**: human-readable label of an entity in a language
//! - **Site info**: cheap connectivity check

use crate::domain::commons::{
    CategoryName, Continuation, FileTitle, ImageInfo, MemberPage, Statements,
};
use crate::error::Result;
use async_trait::async_trait;

/// Read-only access to the Commons content API.
#[async_trait]
pub trait CommonsApi: Send + Sync {
    /// Fetches one page of file and subcategory members.
    ///
    /// Pass the continuation returned by the previous page to get the next one.
    async fn category_members(
        &self,
        category: &CategoryName,
        continuation: Option<&Continuation>,
    ) -> Result<MemberPage>;

    /// Returns `false` when the category page does not exist.
    async fn category_exists(&self, category: &CategoryName) -> Result<bool>;

    /// Looks up basic image information.
    ///
    /// Returns `Ok(None)` when the file page does not exist.
    async fn image_info(&self, title: &FileTitle, width: Option<u32>)
        -> Result<Option<ImageInfo>>;

    /// Fetches the structured statements of a MediaInfo entity (`M{page_id}`).
    async fn statements(&self, media_info_id: &str) -> Result<Statements>;

    /// Fetches an entity label; `Ok(None)` when no label exists in `language`.
    async fn entity_label(&self, entity_id: &str, language: &str) -> Result<Option<String>>;

    /// Returns the site name, proving the backend is reachable.
    async fn site_info(&self) -> Result<String>;
}
