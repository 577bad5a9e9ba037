// SPDX-License-Identifier: MPL-2.0
//! Metadata resolution for a single displayed file.
//!
//! Requests run one after the other: image info, then the MediaInfo
//! statements, then one label lookup per referenced entity. Only the image
//! info is mandatory; every later step degrades to empty values.

use crate::application::port::CommonsApi;
use crate::domain::commons::statement::{
    Statement, PROP_COPYRIGHT_LICENSE, PROP_CREATOR, QUALIFIER_AUTHOR_NAME,
};
use crate::domain::commons::{FileInfo, FileTitle, Statements};
use crate::error::{Error, Result};

/// Resolves display data, license and author of `title`.
///
/// `width` is passed through to the backend untouched; when it is `None`, or
/// the backend does not honour it, the thumbnail URL equals the file URL.
/// Labels are requested in `label_language`.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] when the file page does not exist, or the
/// transport/format error of the image-info request.
pub async fn resolve<A>(
    api: &A,
    title: &FileTitle,
    width: Option<u32>,
    label_language: &str,
) -> Result<FileInfo>
where
    A: CommonsApi + ?Sized,
{
    let info = api
        .image_info(title, width)
        .await?
        .ok_or_else(|| Error::FileNotFound(title.bare_name().to_string()))?;

    let media_info_id = info.media_info_id();
    let ext_license = info.ext_license.clone();
    let ext_artist = info.ext_artist.clone();
    let mut file = FileInfo::from_image_info(title, info);

    let statements = match api.statements(&media_info_id).await {
        Ok(statements) => statements,
        Err(err) => {
            log::warn!("No structured data for {}: {}", title, err);
            Statements::default()
        }
    };

    file.license = resolve_license(api, &statements, label_language)
        .await
        .or(ext_license)
        .unwrap_or_default();
    file.author = resolve_author(api, &statements, label_language)
        .await
        .or(ext_artist)
        .unwrap_or_default();

    Ok(file)
}

async fn resolve_license<A>(api: &A, statements: &Statements, language: &str) -> Option<String>
where
    A: CommonsApi + ?Sized,
{
    let id = statements.best(PROP_COPYRIGHT_LICENSE)?.entity_id()?;
    Some(label_or_id(api, id, language).await)
}

async fn resolve_author<A>(api: &A, statements: &Statements, language: &str) -> Option<String>
where
    A: CommonsApi + ?Sized,
{
    let creator: &Statement = statements.best(PROP_CREATOR)?;
    if let Some(name) = creator.qualifier_text(QUALIFIER_AUTHOR_NAME) {
        return Some(name.trim().to_string());
    }
    let id = creator.entity_id()?;
    Some(label_or_id(api, id, language).await)
}

/// Label of `id` in `language`, or the raw id when there is none.
async fn label_or_id<A>(api: &A, id: &str, language: &str) -> String
where
    A: CommonsApi + ?Sized,
{
    match api.entity_label(id, language).await {
        Ok(Some(label)) if !label.trim().is_empty() => label,
        Ok(_) => id.to_string(),
        Err(err) => {
            log::warn!("Label lookup for {} failed: {}", id, err);
            id.to_string()
        }
    }
}
