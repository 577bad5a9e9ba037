// SPDX-License-Identifier: MPL-2.0
//! Fluent catalogs embedded from `assets/i18n/`, one `<locale>.ftl` per
//! language.
//!
//! Lookups try the active locale first and then `en-US`, so a catalog that
//! lags behind still renders English instead of a placeholder.

use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

pub const DEFAULT_LOCALE: &str = "en-US";

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Catalogs;

type Bundle = FluentBundle<FluentResource>;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, Bundle>,
    locale: LanguageIdentifier,
    fallback: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    /// Loads every embedded catalog and picks the locale from, in order, the
    /// `--lang` flag, the config file and the OS. Unknown locales are skipped.
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let bundles = load_bundles();
        let fallback: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap_or_default();

        let os_lang = sys_locale::get_locale();
        let candidates = [cli_lang.as_deref(), config.language.as_deref(), os_lang.as_deref()];
        let locale = pick_locale(candidates, &bundles).unwrap_or_else(|| fallback.clone());
        log::debug!("Interface language: {}", locale);

        Self {
            bundles,
            locale,
            fallback,
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Locales with a loaded catalog, sorted by tag.
    pub fn available_locales(&self) -> Vec<&LanguageIdentifier> {
        let mut locales: Vec<_> = self.bundles.keys().collect();
        locales.sort_by_key(|l| l.to_string());
        locales
    }

    pub fn tr(&self, key: &str) -> String {
        self.lookup(key, None)
    }

    /// Translates `key`, substituting the given Fluent variables.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let fluent_args: FluentArgs<'_> = args
            .iter()
            .map(|(name, value)| (*name, value.clone()))
            .collect();
        self.lookup(key, Some(&fluent_args))
    }

    fn lookup(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        [&self.locale, &self.fallback]
            .into_iter()
            .filter_map(|locale| self.bundles.get(locale))
            .find_map(|bundle| format_message(bundle, key, args))
            .unwrap_or_else(|| format!("MISSING: {key}"))
    }
}

fn format_message(bundle: &Bundle, key: &str, args: Option<&FluentArgs<'_>>) -> Option<String> {
    let pattern = bundle.get_message(key)?.value()?;
    let mut errors = Vec::new();
    let text = bundle.format_pattern(pattern, args, &mut errors);
    if !errors.is_empty() {
        log::warn!("Formatting {} failed: {:?}", key, errors);
        return None;
    }
    Some(text.into_owned())
}

fn load_bundles() -> HashMap<LanguageIdentifier, Bundle> {
    let mut bundles = HashMap::new();
    for name in Catalogs::iter() {
        let Some(tag) = name.strip_suffix(".ftl") else {
            continue;
        };
        let Ok(locale) = tag.parse::<LanguageIdentifier>() else {
            log::warn!("Skipping catalog with invalid locale: {}", name);
            continue;
        };
        let Some(file) = Catalogs::get(&name) else {
            continue;
        };
        if let Some(bundle) = build_bundle(&locale, &file.data) {
            bundles.insert(locale, bundle);
        }
    }
    bundles
}

fn build_bundle(locale: &LanguageIdentifier, data: &[u8]) -> Option<Bundle> {
    let source = String::from_utf8_lossy(data).into_owned();
    let resource = match FluentResource::try_new(source) {
        Ok(resource) => resource,
        Err((_, errors)) => {
            log::error!("Failed to parse {}.ftl: {:?}", locale, errors);
            return None;
        }
    };
    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    // Terminal output: no Unicode isolation marks around placeables.
    bundle.set_use_isolating(false);
    if let Err(errors) = bundle.add_resource(resource) {
        log::error!("Failed to add {}.ftl: {:?}", locale, errors);
        return None;
    }
    Some(bundle)
}

/// First candidate that parses and has a catalog.
fn pick_locale<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
    bundles: &HashMap<LanguageIdentifier, Bundle>,
) -> Option<LanguageIdentifier> {
    candidates
        .into_iter()
        .flatten()
        .filter_map(|raw| raw.parse::<LanguageIdentifier>().ok())
        .find(|lang| bundles.contains_key(lang))
}
