// SPDX-License-Identifier: MPL-2.0
//! In-memory Commons backend for tests and benches.
//!
//! [`FakeCommons`] serves canned category pages (with real continuation
//! tokens), image info, statements and labels, counts every request and can
//! be slowed down or made to fail.

use crate::application::port::CommonsApi;
use crate::domain::commons::{
    CategoryMember, CategoryName, Continuation, FileTitle, ImageInfo, MemberPage, Namespace,
    Statements,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const CONTINUE_KEY: &str = "cmcontinue";

/// Builds a file member.
#[must_use]
pub fn file(title: &str) -> CategoryMember {
    CategoryMember::new(Namespace::File, FileTitle::new(title).as_str())
}

/// Builds a subcategory member.
#[must_use]
pub fn subcat(name: &str) -> CategoryMember {
    let title = CategoryName::parse(name).map_or_else(|_| name.to_string(), |c| c.to_string());
    CategoryMember::new(Namespace::Subcategory, title)
}

/// Builds image info whose URLs derive from the title.
#[must_use]
pub fn image_info(page_id: u64, title: &str) -> ImageInfo {
    let title = FileTitle::new(title);
    ImageInfo {
        page_id,
        url: format!("https://upload.example/{}", title.bare_name()),
        thumb_url: format!("https://upload.example/thumb/{}", title.bare_name()),
        description_url: format!("https://commons.example/wiki/{}", title.url_path()),
        mime: "image/jpeg".to_string(),
        size: 2048,
        ext_license: None,
        ext_artist: None,
    }
}

#[derive(Default)]
pub struct FakeCommons {
    categories: HashMap<String, Vec<Vec<CategoryMember>>>,
    files: HashMap<String, ImageInfo>,
    statements: HashMap<String, Statements>,
    labels: HashMap<(String, String), String>,
    listing_error: Option<Error>,
    statements_error: Option<Error>,
    label_error: Option<Error>,
    delay: Option<Duration>,
    requests: AtomicUsize,
    member_requests: AtomicUsize,
}

impl FakeCommons {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category served as the given pages, in order.
    #[must_use]
    pub fn with_category(mut self, name: &str, pages: Vec<Vec<CategoryMember>>) -> Self {
        let key = category_key(name);
        self.categories.insert(key, pages);
        self
    }

    #[must_use]
    pub fn with_file(mut self, title: &str, info: ImageInfo) -> Self {
        self.files.insert(FileTitle::new(title).as_str().to_string(), info);
        self
    }

    #[must_use]
    pub fn with_statements(mut self, media_info_id: &str, statements: Statements) -> Self {
        self.statements.insert(media_info_id.to_string(), statements);
        self
    }

    #[must_use]
    pub fn with_label(mut self, entity_id: &str, language: &str, label: &str) -> Self {
        self.labels.insert(
            (entity_id.to_string(), language.to_string()),
            label.to_string(),
        );
        self
    }

    /// Makes every listing, probe and image-info request fail.
    #[must_use]
    pub fn failing_with(mut self, error: Error) -> Self {
        self.listing_error = Some(error);
        self
    }

    #[must_use]
    pub fn failing_statements(mut self, error: Error) -> Self {
        self.statements_error = Some(error);
        self
    }

    #[must_use]
    pub fn failing_labels(mut self, error: Error) -> Self {
        self.label_error = Some(error);
        self
    }

    /// Sleeps before answering each request.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of category-member pages served so far.
    pub fn member_request_count(&self) -> usize {
        self.member_requests.load(Ordering::SeqCst)
    }

    async fn begin_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn category_key(name: &str) -> String {
    CategoryName::parse(name).map_or_else(|_| name.to_string(), |c| c.to_string())
}

#[async_trait]
impl CommonsApi for FakeCommons {
    async fn category_members(
        &self,
        category: &CategoryName,
        continuation: Option<&Continuation>,
    ) -> Result<MemberPage> {
        self.begin_request().await;
        self.member_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.listing_error {
            return Err(err.clone());
        }

        let Some(pages) = self.categories.get(category.as_str()) else {
            return Ok(MemberPage::default());
        };

        let index = match continuation {
            None => 0,
            Some(c) => c
                .params()
                .find(|(k, _)| *k == CONTINUE_KEY)
                .and_then(|(_, v)| v.rsplit_once('|'))
                .and_then(|(_, i)| i.parse::<usize>().ok())
                .ok_or_else(|| Error::MalformedResponse("bad continuation".into()))?,
        };

        let members = pages.get(index).cloned().unwrap_or_default();
        let continuation = (index + 1 < pages.len()).then(|| {
            let mut params = BTreeMap::new();
            params.insert(
                CONTINUE_KEY.to_string(),
                format!("{}|{}", category.display_name(), index + 1),
            );
            params.insert("continue".to_string(), "-||".to_string());
            Continuation::new(params)
        });

        Ok(MemberPage {
            members,
            continuation,
        })
    }

    async fn category_exists(&self, category: &CategoryName) -> Result<bool> {
        self.begin_request().await;
        if let Some(err) = &self.listing_error {
            return Err(err.clone());
        }
        Ok(self.categories.contains_key(category.as_str()))
    }

    async fn image_info(
        &self,
        title: &FileTitle,
        width: Option<u32>,
    ) -> Result<Option<ImageInfo>> {
        self.begin_request().await;
        if let Some(err) = &self.listing_error {
            return Err(err.clone());
        }
        Ok(self.files.get(title.as_str()).cloned().map(|mut info| {
            if width.is_none() {
                info.thumb_url = info.url.clone();
            }
            info
        }))
    }

    async fn statements(&self, media_info_id: &str) -> Result<Statements> {
        self.begin_request().await;
        if let Some(err) = &self.statements_error {
            return Err(err.clone());
        }
        Ok(self
            .statements
            .get(media_info_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn entity_label(&self, entity_id: &str, language: &str) -> Result<Option<String>> {
        self.begin_request().await;
        if let Some(err) = &self.label_error {
            return Err(err.clone());
        }
        Ok(self
            .labels
            .get(&(entity_id.to_string(), language.to_string()))
            .cloned())
    }

    async fn site_info(&self) -> Result<String> {
        self.begin_request().await;
        if let Some(err) = &self.listing_error {
            return Err(err.clone());
        }
        Ok("Wikimedia Commons".to_string())
    }
}
