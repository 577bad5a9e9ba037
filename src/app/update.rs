// SPDX-License-Identifier: MPL-2.0
//! Message handlers for `App::update`.
//!
//! Every handler takes an [`UpdateContext`] borrowing the parts of the state
//! it may touch and returns the outputs to render. Metadata resolution runs
//! inline; only the category listing is delegated to a background loader.

use super::message::Output;
use crate::application::port::CommonsApi;
use crate::application::query::{self, Gallery, ListProgress};
use crate::category_loader::{CategoryLoader, LoadEvent};
use crate::config::Settings;
use crate::domain::commons::{CategoryName, FileTitle};
use crate::domain::ui::JumpTarget;
use crate::error::Error;
use std::sync::Arc;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub api: &'a Arc<dyn CommonsApi>,
    pub settings: &'a Settings,
    pub gallery: &'a mut Gallery,
    pub loader: &'a mut Option<CategoryLoader>,
    pub category: &'a mut Option<CategoryName>,
}

/// Starts a new load, replacing any load in progress.
pub fn handle_load_category(ctx: &mut UpdateContext<'_>, raw: &str) -> Vec<Output> {
    let category = match CategoryName::parse(raw) {
        Ok(category) => category,
        Err(err) => return vec![Output::Error(err)],
    };

    if let Some(mut previous) = ctx.loader.take() {
        log::debug!("Replacing load of {}", previous.category());
        previous.cancel();
    }
    ctx.gallery.clear();

    log::info!(
        "Loading {} (depth {})",
        category,
        ctx.settings.recursion_depth
    );
    *ctx.loader = Some(CategoryLoader::spawn(
        Arc::clone(ctx.api),
        category.clone(),
        ctx.settings.recursion_depth,
    ));
    let output = Output::Loading {
        category: category.display_name().to_string(),
    };
    *ctx.category = Some(category);
    vec![output]
}

/// Applies an event of the running loader.
pub async fn handle_loader_event(ctx: &mut UpdateContext<'_>, event: LoadEvent) -> Vec<Output> {
    if ctx.loader.is_none() {
        // Left over from a cancelled or replaced load.
        return Vec::new();
    }
    let category = ctx
        .category
        .as_ref()
        .map(|c| c.display_name().to_string())
        .unwrap_or_default();

    match event {
        LoadEvent::Progress(progress) if is_reportable(&progress) => {
            vec![Output::Progress(progress)]
        }
        LoadEvent::Progress(_) => Vec::new(),
        LoadEvent::Loaded(files) if files.is_empty() => {
            *ctx.loader = None;
            vec![Output::Error(Error::NoImages(category))]
        }
        LoadEvent::Loaded(files) => {
            *ctx.loader = None;
            let count = files.len();
            ctx.gallery.replace(files);
            let mut outputs = vec![Output::Loaded { category, count }];
            outputs.extend(display_current(ctx).await);
            outputs
        }
        LoadEvent::Failed(err) => {
            *ctx.loader = None;
            vec![Output::Error(err)]
        }
    }
}

/// Moves to the next file. Ignored with fewer than two files.
pub async fn handle_navigate_next(ctx: &mut UpdateContext<'_>) -> Vec<Output> {
    if ctx.gallery.len() < 2 {
        return Vec::new();
    }
    ctx.gallery.next();
    display_current(ctx).await
}

/// Moves to the previous file. Ignored with fewer than two files.
pub async fn handle_navigate_previous(ctx: &mut UpdateContext<'_>) -> Vec<Output> {
    if ctx.gallery.len() < 2 {
        return Vec::new();
    }
    ctx.gallery.previous();
    display_current(ctx).await
}

/// Jumps to a position typed by the user; the cursor stays put on error.
pub async fn handle_jump_to(ctx: &mut UpdateContext<'_>, raw: &str) -> Vec<Output> {
    let moved = raw
        .parse::<JumpTarget>()
        .and_then(|target| ctx.gallery.jump_to(target).map(|_| ()));
    match moved {
        Ok(()) => display_current(ctx).await,
        Err(err) => vec![Output::Error(err)],
    }
}

/// Resolves the current file again. Does nothing on an empty gallery.
pub async fn handle_refresh(ctx: &mut UpdateContext<'_>) -> Vec<Output> {
    display_current(ctx).await
}

/// Cancels the running load, if any. Repeated calls only report again.
pub fn handle_cancel(ctx: &mut UpdateContext<'_>) -> Vec<Output> {
    if let Some(mut loader) = ctx.loader.take() {
        log::info!("Cancelling load of {}", loader.category());
        loader.cancel();
    }
    vec![Output::Cancelled]
}

/// Resolves and renders the current file.
///
/// Failures become [`Output::DisplayFailed`] carrying a link to the
/// description page; the gallery is left as it is.
pub async fn display_current(ctx: &mut UpdateContext<'_>) -> Vec<Output> {
    let Some(title) = ctx.gallery.current().cloned() else {
        return Vec::new();
    };
    let navigation = ctx.gallery.navigation_info();

    match query::resolve(
        ctx.api.as_ref(),
        &title,
        Some(ctx.settings.thumbnail_width),
        &ctx.settings.label_language,
    )
    .await
    {
        Ok(info) => vec![Output::Display {
            info: Box::new(info),
            navigation,
        }],
        Err(error) => {
            log::error!("Could not display {}: {}", title, error);
            vec![Output::DisplayFailed {
                fallback_url: fallback_url(ctx.settings, &title),
                title: title.bare_name().to_string(),
                error,
                navigation,
            }]
        }
    }
}

/// Canonical description page of `title` on the wiki.
#[must_use]
pub fn fallback_url(settings: &Settings, title: &FileTitle) -> String {
    format!("{}{}", settings.wiki_url, title.url_path())
}

/// Whether `progress` is worth a line of its own.
#[must_use]
pub fn is_reportable(progress: &ListProgress) -> bool {
    !matches!(progress, ListProgress::FilesFound(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_url_points_to_description_page() {
        let settings = Settings::default();
        let title = FileTitle::new("Kamakurakōkōmae Crossing 1.jpg");
        assert_eq!(
            fallback_url(&settings, &title),
            "https://commons.wikimedia.org/wiki/File:Kamakurak%C5%8Dk%C5%8Dmae_Crossing_1.jpg"
        );
    }

    #[test]
    fn zero_files_found_is_not_reported() {
        assert!(!is_reportable(&ListProgress::FilesFound(0)));
        assert!(is_reportable(&ListProgress::FilesFound(3)));
        assert!(is_reportable(&ListProgress::LoadingCategory("X".into())));
    }
}
