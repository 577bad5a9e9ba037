// SPDX-License-Identifier: MPL-2.0
//! Text rendering for the application.
//!
//! Turns each [`Output`] into localized lines for the terminal. Nothing here
//! touches state; the same output always renders the same way for a locale.

use super::message::Output;
use crate::application::query::{ListProgress, NavigationInfo};
use crate::domain::commons::FileInfo;
use crate::error::{Error, InputError};
use crate::i18n::fluent::I18n;
use crate::i18n::FluentValue;

/// Categories suggested on the welcome screen.
pub const SAMPLE_CATEGORIES: &[&str] = &[
    "Kamakurakōkōmae Crossing No.1",
    "Photographs by Artem Svetlov/2022-08 Silberra50",
    "Stations of Kominato Railway",
];

/// Renders one output as zero or more lines.
pub fn render(i18n: &I18n, output: &Output) -> Vec<String> {
    match output {
        Output::Loading { category } => vec![i18n.tr_with_args(
            "status-loading",
            &[("category", FluentValue::from(category.as_str()))],
        )],
        Output::Progress(progress) => vec![render_progress(i18n, progress)],
        Output::Loaded { category, count } => vec![i18n.tr_with_args(
            "status-loaded",
            &[
                ("count", FluentValue::from(*count)),
                ("category", FluentValue::from(category.as_str())),
            ],
        )],
        Output::Display { info, navigation } => render_file(i18n, info, *navigation),
        Output::DisplayFailed {
            title,
            error,
            fallback_url,
            navigation,
        } => {
            let mut lines = vec![format!(
                "{} {}",
                counter(i18n, *navigation),
                i18n.tr_with_args(
                    "display-failed",
                    &[
                        ("title", FluentValue::from(title.as_str())),
                        ("error", FluentValue::from(error_text(i18n, error))),
                    ],
                )
            )];
            lines.push(i18n.tr_with_args(
                "display-fallback",
                &[("url", FluentValue::from(fallback_url.as_str()))],
            ));
            lines
        }
        Output::Error(error) => vec![i18n.tr_with_args(
            "status-error",
            &[("error", FluentValue::from(error_text(i18n, error)))],
        )],
        Output::Cancelled => vec![i18n.tr("status-cancelled")],
        Output::Help => help_lines(i18n),
        Output::Quit => vec![i18n.tr("status-goodbye")],
    }
}

fn render_progress(i18n: &I18n, progress: &ListProgress) -> String {
    match progress {
        ListProgress::LoadingCategory(name) => i18n.tr_with_args(
            "status-loading-category",
            &[("category", FluentValue::from(name.as_str()))],
        ),
        ListProgress::FilesFound(count) => i18n.tr_with_args(
            "status-files-found",
            &[("count", FluentValue::from(*count))],
        ),
    }
}

/// The "i / N" counter, or an empty string without a current file.
pub fn counter(i18n: &I18n, navigation: NavigationInfo) -> String {
    let Some(position) = navigation.position else {
        return String::new();
    };
    format!(
        "[{}]",
        i18n.tr_with_args(
            "caption-position",
            &[
                ("position", FluentValue::from(position)),
                ("total", FluentValue::from(navigation.total_count)),
            ],
        )
    )
}

fn render_file(i18n: &I18n, info: &FileInfo, navigation: NavigationInfo) -> Vec<String> {
    let title = info.title.strip_prefix("File:").unwrap_or(&info.title);
    let license = if info.license.is_empty() {
        i18n.tr("caption-license-unknown")
    } else {
        info.license.clone()
    };

    let mut lines = vec![format!("{} {}", counter(i18n, navigation), title)];
    lines.push(format!(
        "  {}",
        i18n.tr_with_args(
            "caption-license",
            &[("license", FluentValue::from(license.as_str()))]
        )
    ));
    if !info.author.is_empty() {
        lines.push(format!(
            "  {}",
            i18n.tr_with_args(
                "caption-author",
                &[("author", FluentValue::from(info.author.as_str()))]
            )
        ));
        lines.push(format!(
            "  {}",
            i18n.tr_with_args(
                "caption-attribution",
                &[
                    ("author", FluentValue::from(info.author.as_str())),
                    ("license", FluentValue::from(license.as_str())),
                ],
            )
        ));
    }
    lines.push(format!(
        "  {}",
        i18n.tr_with_args(
            "caption-image",
            &[("url", FluentValue::from(info.thumb_url.as_str()))]
        )
    ));
    if !info.description_url.is_empty() {
        lines.push(format!(
            "  {}",
            i18n.tr_with_args(
                "caption-page",
                &[("url", FluentValue::from(info.description_url.as_str()))]
            )
        ));
    }
    if !info.mime.is_empty() {
        lines.push(format!(
            "  {}",
            i18n.tr_with_args(
                "caption-details",
                &[
                    ("mime", FluentValue::from(info.mime.as_str())),
                    ("size", FluentValue::from(info.size)),
                ],
            )
        ));
    }
    lines
}

/// Localized description of `error`.
pub fn error_text(i18n: &I18n, error: &Error) -> String {
    let detail = error.detail();
    let mut args = vec![("detail", FluentValue::from(detail.as_str()))];
    if let Error::InvalidInput(InputError::JumpOutOfRange { requested, len }) = error {
        args.push(("requested", FluentValue::from(*requested)));
        args.push(("len", FluentValue::from(*len)));
    }
    if let Error::InvalidInput(InputError::InvalidJumpTarget(raw)) = error {
        args.push(("input", FluentValue::from(raw.as_str())));
    }
    i18n.tr_with_args(error.i18n_key(), &args)
}

/// Line printed while the connectivity check runs, naming the API host.
pub fn connection_check(i18n: &I18n, api_url: &str) -> String {
    let without_scheme = api_url.split_once("://").map_or(api_url, |(_, rest)| rest);
    let host = without_scheme.split('/').next().unwrap_or(without_scheme);
    i18n.tr_with_args("status-connection-check", &[("site", FluentValue::from(host))])
}

/// Command reference.
pub fn help_lines(i18n: &I18n) -> Vec<String> {
    i18n.tr("help-commands")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Greeting shown once at start-up.
pub fn welcome_lines(i18n: &I18n) -> Vec<String> {
    let mut lines = vec![i18n.tr("app-title"), i18n.tr("welcome-prompt")];
    lines.extend(SAMPLE_CATEGORIES.iter().map(|name| {
        i18n.tr_with_args(
            "welcome-example",
            &[("category", FluentValue::from(*name))],
        )
    }));
    lines.push(i18n.tr("welcome-help"));
    lines
}
