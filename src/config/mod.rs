// SPDX-License-Identifier: MPL-2.0
//! User settings stored in `settings.toml`.
//!
//! The on-disk [`Config`] keeps every field optional so hand-edited files stay
//! valid; [`Config::settings`] turns it into the immutable, clamped [`Settings`]
//! injected into the HTTP client and the category loader.
//!
//! ```no_run
//! use commons_lens::config;
//!
//! let mut config = config::load()?;
//! config.label_language = Some("fr".to_string());
//!
//! assert_eq!(config.settings().label_language, "fr");
//! # Ok::<(), commons_lens::error::Error>(())
//! ```

pub mod defaults;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub use defaults::*;

/// Contents of `settings.toml`. Absent keys take the defaults in [`defaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interface language, e.g. `fr`.
    pub language: Option<String>,
    pub api_url: Option<String>,
    /// Endpoint serving labels of license and creator items.
    pub label_api_url: Option<String>,
    /// Article path prefix for browser links. Derived from `api_url` when unset.
    pub wiki_url: Option<String>,
    pub user_agent: Option<String>,
    /// Language of license and author labels.
    pub label_language: Option<String>,
    /// Subcategory levels listed below the requested category.
    pub recursion_depth: Option<u32>,
    pub thumbnail_width: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

/// Resolved, immutable runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub label_api_url: String,
    pub wiki_url: String,
    pub user_agent: String,
    pub label_language: String,
    pub recursion_depth: u32,
    pub thumbnail_width: u32,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().settings()
    }
}

impl Config {
    /// Resolves every field to a concrete value, clamping numeric ones to their bounds.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let api_url = non_empty_or(&self.api_url, DEFAULT_API_URL);
        let wiki_url = non_empty_or(&self.wiki_url, &wiki_url_for(&api_url));
        Settings {
            api_url,
            label_api_url: non_empty_or(&self.label_api_url, DEFAULT_LABEL_API_URL),
            wiki_url,
            user_agent: non_empty_or(&self.user_agent, DEFAULT_USER_AGENT),
            label_language: non_empty_or(&self.label_language, DEFAULT_LABEL_LANGUAGE),
            recursion_depth: self
                .recursion_depth
                .unwrap_or(DEFAULT_RECURSION_DEPTH)
                .min(MAX_RECURSION_DEPTH),
            thumbnail_width: self
                .thumbnail_width
                .unwrap_or(DEFAULT_THUMBNAIL_WIDTH)
                .clamp(MIN_THUMBNAIL_WIDTH, MAX_THUMBNAIL_WIDTH),
            request_timeout: Duration::from_secs(
                self.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                    .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS),
            ),
        }
    }
}

fn non_empty_or(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// `https://host/w/api.php` serves articles under `https://host/wiki/`.
fn wiki_url_for(api_url: &str) -> String {
    match api_url.strip_suffix(API_PATH) {
        Some(base) if !base.is_empty() => format!("{base}{ARTICLE_PATH}"),
        _ => DEFAULT_WIKI_URL.to_string(),
    }
}

/// Loads `settings.toml` from the config directory; a missing file yields defaults.
pub fn load() -> Result<Config> {
    match paths::settings_file() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Config::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring invalid config {}: {}", path.display(), err);
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
