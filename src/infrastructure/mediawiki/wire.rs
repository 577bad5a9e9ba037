// SPDX-License-Identifier: MPL-2.0
//! JSON shapes returned by the MediaWiki Action API and their conversion to
//! domain types.
//!
//! Only the fields the viewer reads are modelled. Wikibase serializes empty
//! maps as `[]`, so every entity map goes through [`MapOrList`].

use crate::domain::commons::{
    plain_text, CategoryMember, Continuation, ImageInfo, MemberPage, Namespace, Rank, SnakValue,
    Statement, Statements,
};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Page key used by the API for titles that do not exist.
pub const MISSING_PAGE_ID: &str = "-1";

/// Extended metadata field holding the short license name.
pub const EXT_LICENSE_SHORT_NAME: &str = "LicenseShortName";

/// Extended metadata field holding the author HTML.
pub const EXT_ARTIST: &str = "Artist";

/// Error object reported in place of a result.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::MalformedResponse(format!("{}: {}", err.code, err.info))
    }
}

/// Envelope shared by every `action=query` response.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<Q> {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default, rename = "continue")]
    pub continuation: Option<BTreeMap<String, Value>>,
    pub query: Option<Q>,
}

impl<Q> QueryResponse<Q> {
    /// Splits the envelope, turning an API error into [`Error`].
    pub fn into_parts(self) -> Result<(Option<Q>, Option<Continuation>)> {
        if let Some(err) = self.error {
            return Err(err.into());
        }
        let continuation = self
            .continuation
            .map(|params| {
                params
                    .into_iter()
                    .map(|(key, value)| {
                        let value = match value {
                            Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (key, value)
                    })
                    .collect::<BTreeMap<_, _>>()
            })
            .map(Continuation::new)
            .filter(|c| !c.is_empty());
        Ok((self.query, continuation))
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryMembersQuery {
    #[serde(default)]
    pub categorymembers: Vec<WireMember>,
}

#[derive(Debug, Deserialize)]
pub struct WireMember {
    pub ns: i64,
    pub title: String,
}

impl QueryResponse<CategoryMembersQuery> {
    pub fn into_member_page(self) -> Result<MemberPage> {
        let (query, continuation) = self.into_parts()?;
        let members = query
            .map(|q| q.categorymembers)
            .unwrap_or_default()
            .into_iter()
            .map(|m| CategoryMember::new(Namespace::from_id(m.ns), m.title))
            .collect();
        Ok(MemberPage {
            members,
            continuation,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: HashMap<String, WirePage>,
}

#[derive(Debug, Deserialize)]
pub struct WirePage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub missing: Option<Value>,
    #[serde(default)]
    pub invalid: Option<Value>,
    #[serde(default)]
    pub imageinfo: Vec<WireImageInfo>,
}

impl WirePage {
    fn exists(&self) -> bool {
        self.missing.is_none() && self.invalid.is_none() && self.pageid.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct WireImageInfo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumburl: Option<String>,
    #[serde(default)]
    pub descriptionurl: Option<String>,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub extmetadata: Option<MapOrList<ExtMetadataField>>,
}

#[derive(Debug, Deserialize)]
pub struct ExtMetadataField {
    #[serde(default)]
    pub value: Value,
}

impl WireImageInfo {
    fn ext_text(&self, field: &str) -> Option<String> {
        let value = &self.extmetadata.as_ref()?.get(field)?.value;
        let text = match value {
            Value::String(s) => plain_text(s),
            Value::Null => return None,
            other => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

impl QueryResponse<PagesQuery> {
    /// Whether any requested page exists.
    pub fn into_exists(self) -> Result<bool> {
        let (query, _) = self.into_parts()?;
        Ok(query.is_some_and(|q| {
            q.pages
                .iter()
                .any(|(key, page)| key != MISSING_PAGE_ID && page.exists())
        }))
    }

    /// Image info of the single requested page, `None` when it is missing.
    pub fn into_image_info(self) -> Result<Option<ImageInfo>> {
        let (query, _) = self.into_parts()?;
        let Some(query) = query else {
            return Ok(None);
        };
        let Some(page) = query
            .pages
            .into_iter()
            .find_map(|(key, page)| (key != MISSING_PAGE_ID).then_some(page))
        else {
            return Ok(None);
        };
        let Some(page_id) = page.pageid else {
            return Ok(None);
        };
        let Some(info) = page.imageinfo.first() else {
            return Ok(None);
        };
        let url = info
            .url
            .clone()
            .ok_or_else(|| Error::MalformedResponse(format!("no url for page {page_id}")))?;
        let thumb_url = info.thumburl.clone().unwrap_or_else(|| url.clone());

        Ok(Some(ImageInfo {
            page_id,
            thumb_url,
            description_url: info.descriptionurl.clone().unwrap_or_default(),
            mime: info.mime.clone().unwrap_or_default(),
            size: info.size.unwrap_or_default(),
            ext_license: info.ext_text(EXT_LICENSE_SHORT_NAME),
            ext_artist: info.ext_text(EXT_ARTIST),
            url,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct SiteInfoQuery {
    pub general: SiteGeneral,
}

#[derive(Debug, Deserialize)]
pub struct SiteGeneral {
    pub sitename: String,
}

impl QueryResponse<SiteInfoQuery> {
    pub fn into_site_name(self) -> Result<String> {
        let (query, _) = self.into_parts()?;
        query
            .map(|q| q.general.sitename)
            .ok_or_else(|| Error::MalformedResponse("siteinfo without general section".into()))
    }
}

/// A JSON object, or the empty array Wikibase emits in its place.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MapOrList<T> {
    Map(HashMap<String, T>),
    List(Vec<Value>),
}

impl<T> MapOrList<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        match self {
            Self::Map(map) => map.get(key),
            Self::List(_) => None,
        }
    }

    pub fn into_map(self) -> HashMap<String, T> {
        match self {
            Self::Map(map) => map,
            Self::List(_) => HashMap::new(),
        }
    }
}

/// `action=wbgetentities` response.
#[derive(Debug, Deserialize)]
pub struct EntitiesResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub entities: HashMap<String, WireEntity>,
}

#[derive(Debug, Deserialize)]
pub struct WireEntity {
    #[serde(default)]
    pub missing: Option<Value>,
    /// MediaInfo entities call it `statements`, items `claims`.
    #[serde(default, alias = "claims")]
    pub statements: Option<MapOrList<Vec<WireStatement>>>,
    #[serde(default)]
    pub labels: Option<MapOrList<WireLabel>>,
}

#[derive(Debug, Deserialize)]
pub struct WireLabel {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct WireStatement {
    pub mainsnak: WireSnak,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub qualifiers: Option<MapOrList<Vec<WireSnak>>>,
}

#[derive(Debug, Deserialize)]
pub struct WireSnak {
    pub snaktype: String,
    #[serde(default)]
    pub datavalue: Option<WireDataValue>,
}

#[derive(Debug, Deserialize)]
pub struct WireDataValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

impl WireSnak {
    fn into_value(self) -> SnakValue {
        if self.snaktype != "value" {
            return SnakValue::Other;
        }
        let Some(data) = self.datavalue else {
            return SnakValue::Other;
        };
        match (data.kind.as_str(), data.value) {
            ("string", Value::String(text)) => SnakValue::Text(text),
            ("monolingualtext", Value::Object(obj)) => match obj.get("text") {
                Some(Value::String(text)) => SnakValue::Text(text.clone()),
                _ => SnakValue::Other,
            },
            ("wikibase-entityid", Value::Object(obj)) => {
                if let Some(Value::String(id)) = obj.get("id") {
                    SnakValue::Entity(id.clone())
                } else if let Some(numeric) = obj.get("numeric-id").and_then(Value::as_u64) {
                    SnakValue::Entity(format!("Q{numeric}"))
                } else {
                    SnakValue::Other
                }
            }
            _ => SnakValue::Other,
        }
    }
}

fn parse_rank(rank: Option<&str>) -> Rank {
    match rank {
        Some("preferred") => Rank::Preferred,
        Some("deprecated") => Rank::Deprecated,
        _ => Rank::Normal,
    }
}

impl From<WireStatement> for Statement {
    fn from(wire: WireStatement) -> Self {
        let qualifiers = wire
            .qualifiers
            .map(MapOrList::into_map)
            .unwrap_or_default()
            .into_iter()
            .map(|(property, snaks)| {
                (
                    property,
                    snaks.into_iter().map(WireSnak::into_value).collect(),
                )
            })
            .collect();
        Statement {
            rank: parse_rank(wire.rank.as_deref()),
            value: Some(wire.mainsnak.into_value()),
            qualifiers,
        }
    }
}

impl EntitiesResponse {
    fn into_entity(self, id: &str) -> Result<Option<WireEntity>> {
        if let Some(err) = self.error {
            // Unknown M-ids are reported as an error rather than a missing entity.
            if err.code == "no-such-entity" {
                return Ok(None);
            }
            return Err(err.into());
        }
        Ok(self
            .entities
            .into_iter()
            .find(|(key, _)| key == id)
            .map(|(_, entity)| entity)
            .filter(|entity| entity.missing.is_none()))
    }

    /// Statements of `id`; empty when the entity does not exist.
    pub fn into_statements(self, id: &str) -> Result<Statements> {
        let Some(entity) = self.into_entity(id)? else {
            return Ok(Statements::default());
        };
        let map = entity
            .statements
            .map(MapOrList::into_map)
            .unwrap_or_default()
            .into_iter()
            .map(|(property, statements)| {
                (
                    property,
                    statements.into_iter().map(Statement::from).collect(),
                )
            })
            .collect();
        Ok(Statements::new(map))
    }

    /// Label of `id` in `language`.
    pub fn into_label(self, id: &str, language: &str) -> Result<Option<String>> {
        let Some(entity) = self.into_entity(id)? else {
            return Ok(None);
        };
        Ok(entity
            .labels
            .map(MapOrList::into_map)
            .and_then(|mut labels| labels.remove(language))
            .map(|label| label.value))
    }
}
