// SPDX-License-Identifier: MPL-2.0
//! MediaWiki Action API adapter.
//!
//! [`MediaWikiClient`] implements [`CommonsApi`] over HTTP with `reqwest`.
//! Every request is a `GET` with `format=json` and the configured
//! User-Agent; statements and image info come from the Commons endpoint,
//! entity labels from the label endpoint (Wikidata by default).

pub mod wire;

use crate::application::port::CommonsApi;
use crate::config::Settings;
use crate::domain::commons::{
    CategoryName, Continuation, FileTitle, ImageInfo, MemberPage, Statements,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use wire::{CategoryMembersQuery, EntitiesResponse, PagesQuery, QueryResponse, SiteInfoQuery};

/// Members requested per page; the API caps it per user class.
const MEMBER_LIMIT: &str = "max";

/// Member types worth listing.
const MEMBER_TYPES: &str = "file|subcat";

/// Image-info properties the viewer reads.
const IMAGE_INFO_PROPS: &str = "url|size|mime|extmetadata";

/// Extended metadata fields used as attribution fallback.
const EXT_METADATA_FILTER: &str = "LicenseShortName|Artist";

/// Query string pairs, in request order.
type Params = Vec<(String, String)>;

/// HTTP client for a MediaWiki installation with Wikibase MediaInfo.
#[derive(Debug, Clone)]
pub struct MediaWikiClient {
    client: Client,
    api_url: String,
    label_api_url: String,
}

impl MediaWikiClient {
    /// Builds a client with the User-Agent and timeout from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the TLS backend cannot be initialized.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self::with_client(client, settings))
    }

    /// Uses an existing `reqwest` client; only the endpoints are read from
    /// `settings`.
    #[must_use]
    pub fn with_client(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            api_url: settings.api_url.clone(),
            label_api_url: settings.label_api_url.clone(),
        }
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &Params) -> Result<T> {
        log::debug!("GET {} {:?}", endpoint, params);
        let response = self
            .client
            .get(endpoint)
            .query(&[("format", "json")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("HTTP {} from {}", status, endpoint)));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn pairs(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn query_params(extra: &[(&str, &str)]) -> Params {
    let mut params = pairs(&[("action", "query")]);
    params.extend(pairs(extra));
    params
}

/// Parameters of one `categorymembers` page. The continuation of the
/// previous page is appended verbatim.
fn member_params(category: &CategoryName, continuation: Option<&Continuation>) -> Params {
    let mut params = query_params(&[
        ("list", "categorymembers"),
        ("cmtitle", category.as_str()),
        ("cmtype", MEMBER_TYPES),
        ("cmlimit", MEMBER_LIMIT),
    ]);
    if let Some(continuation) = continuation {
        params.extend(
            continuation
                .params()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
    }
    params
}

fn image_info_params(title: &FileTitle, width: Option<u32>) -> Params {
    let mut params = query_params(&[
        ("titles", title.as_str()),
        ("prop", "imageinfo"),
        ("iiprop", IMAGE_INFO_PROPS),
        ("iiextmetadatafilter", EXT_METADATA_FILTER),
    ]);
    if let Some(width) = width {
        params.push(("iiurlwidth".to_string(), width.to_string()));
    }
    params
}

fn entity_params(id: &str, props: &str) -> Params {
    pairs(&[("action", "wbgetentities"), ("ids", id), ("props", props)])
}

#[async_trait]
impl CommonsApi for MediaWikiClient {
    async fn category_members(
        &self,
        category: &CategoryName,
        continuation: Option<&Continuation>,
    ) -> Result<MemberPage> {
        let params = member_params(category, continuation);
        let response: QueryResponse<CategoryMembersQuery> =
            self.get(&self.api_url, &params).await?;
        response.into_member_page()
    }

    async fn category_exists(&self, category: &CategoryName) -> Result<bool> {
        let params = query_params(&[("titles", category.as_str())]);
        let response: QueryResponse<PagesQuery> = self.get(&self.api_url, &params).await?;
        response.into_exists()
    }

    async fn image_info(&self, title: &FileTitle, width: Option<u32>) -> Result<Option<ImageInfo>> {
        let params = image_info_params(title, width);
        let response: QueryResponse<PagesQuery> = self.get(&self.api_url, &params).await?;
        response.into_image_info()
    }

    async fn statements(&self, media_info_id: &str) -> Result<Statements> {
        let params = entity_params(media_info_id, "claims");
        let response: EntitiesResponse = self.get(&self.api_url, &params).await?;
        response.into_statements(media_info_id)
    }

    async fn entity_label(&self, entity_id: &str, language: &str) -> Result<Option<String>> {
        let mut params = entity_params(entity_id, "labels");
        params.push(("languages".to_string(), language.to_string()));
        let response: EntitiesResponse = self.get(&self.label_api_url, &params).await?;
        response.into_label(entity_id, language)
    }

    async fn site_info(&self) -> Result<String> {
        let params = query_params(&[("meta", "siteinfo"), ("siprop", "general")]);
        let response: QueryResponse<SiteInfoQuery> = self.get(&self.api_url, &params).await?;
        response.into_site_name()
    }
}
