// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Backend**: API endpoints and client identification
//! - **Listing**: Category recursion depth bounds
//! - **Display**: Thumbnail width bounds and label language
//! - **Network**: Request timeout bounds

// ==========================================================================
// Backend Defaults
// ==========================================================================

/// MediaWiki Action API of Wikimedia Commons.
pub const DEFAULT_API_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// API used to resolve entity labels (licenses and creators are Wikidata items).
pub const DEFAULT_LABEL_API_URL: &str = "https://www.wikidata.org/w/api.php";

/// Base URL of file description pages, used for fallback links.
pub const DEFAULT_WIKI_URL: &str = "https://commons.wikimedia.org/wiki/";

/// Script path of the Action API on Wikimedia-style hosts.
pub const API_PATH: &str = "/w/api.php";

/// Article path matching [`API_PATH`].
pub const ARTICLE_PATH: &str = "/wiki/";

/// Identifying client-agent string sent with every request. Wikimedia asks
/// clients to add contact details, which `user_agent` in the config allows.
pub const DEFAULT_USER_AGENT: &str = concat!("CommonsLens/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Listing Defaults
// ==========================================================================

/// Default subcategory recursion depth (0 = direct members only).
pub const DEFAULT_RECURSION_DEPTH: u32 = 1;

/// Maximum recursion depth accepted from configuration or the command line.
pub const MAX_RECURSION_DEPTH: u32 = 5;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Default width requested for thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 1280;

/// Minimum thumbnail width.
pub const MIN_THUMBNAIL_WIDTH: u32 = 64;

/// Maximum thumbnail width.
pub const MAX_THUMBNAIL_WIDTH: u32 = 8192;

/// Language in which entity labels are requested.
pub const DEFAULT_LABEL_LANGUAGE: &str = "en";

// ==========================================================================
// Network Defaults
// ==========================================================================

/// Default per-request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_RECURSION_DEPTH <= MAX_RECURSION_DEPTH);

    assert!(MIN_THUMBNAIL_WIDTH > 0);
    assert!(MAX_THUMBNAIL_WIDTH >= MIN_THUMBNAIL_WIDTH);
    assert!(DEFAULT_THUMBNAIL_WIDTH >= MIN_THUMBNAIL_WIDTH);
    assert!(DEFAULT_THUMBNAIL_WIDTH <= MAX_THUMBNAIL_WIDTH);

    assert!(MIN_REQUEST_TIMEOUT_SECS > 0);
    assert!(MAX_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursion_defaults_are_valid() {
        assert_eq!(DEFAULT_RECURSION_DEPTH, 1);
        assert!(DEFAULT_RECURSION_DEPTH <= MAX_RECURSION_DEPTH);
    }

    #[test]
    fn thumbnail_defaults_are_valid() {
        assert!(DEFAULT_THUMBNAIL_WIDTH >= MIN_THUMBNAIL_WIDTH);
        assert!(DEFAULT_THUMBNAIL_WIDTH <= MAX_THUMBNAIL_WIDTH);
    }

    #[test]
    fn endpoints_use_https() {
        assert!(DEFAULT_API_URL.starts_with("https://"));
        assert!(DEFAULT_LABEL_API_URL.starts_with("https://"));
        assert!(DEFAULT_WIKI_URL.ends_with('/'));
    }

    #[test]
    fn user_agent_identifies_client() {
        assert!(DEFAULT_USER_AGENT.starts_with("CommonsLens/"));
    }
}
