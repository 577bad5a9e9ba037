// SPDX-License-Identifier: MPL-2.0
//! Top-level messages, rendered outputs and runtime flags for the application.

use crate::application::query::{ListProgress, NavigationInfo};
use crate::category_loader::LoadEvent;
use crate::domain::commons::FileInfo;
use crate::error::Error;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Start listing the named category (raw user text).
    LoadCategory(String),
    /// An event from the running category loader.
    Loader(LoadEvent),
    Next,
    Previous,
    /// Jump to a 1-based position (raw user text).
    JumpTo(String),
    /// Resolve and display the current file again.
    Refresh,
    /// Abort the running category load.
    Cancel,
    Help,
    Quit,
}

impl Message {
    /// Parses one line of terminal input.
    ///
    /// Returns `None` for blank lines. Anything that is not a known command is
    /// taken as a category name.
    #[must_use]
    pub fn parse_command(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let message = match (command, rest.is_empty()) {
            ("n" | "next", true) => Message::Next,
            ("p" | "prev" | "previous", true) => Message::Previous,
            ("r" | "refresh", true) => Message::Refresh,
            ("c" | "cancel", true) => Message::Cancel,
            ("h" | "help" | "?", true) => Message::Help,
            ("q" | "quit" | "exit", true) => Message::Quit,
            ("g" | "goto", _) => Message::JumpTo(rest.to_string()),
            ("l" | "load", _) => Message::LoadCategory(rest.to_string()),
            _ => Message::LoadCategory(line.to_string()),
        };
        Some(message)
    }
}

/// Something the front-end has to show, produced by `App::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A category load started.
    Loading { category: String },
    /// Advisory progress of the running load.
    Progress(ListProgress),
    /// The load finished with `count` files.
    Loaded { category: String, count: usize },
    /// The current file, resolved.
    Display {
        info: Box<FileInfo>,
        navigation: NavigationInfo,
    },
    /// The current file could not be resolved; the list is unaffected.
    DisplayFailed {
        title: String,
        error: Error,
        fallback_url: String,
        navigation: NavigationInfo,
    },
    /// A load failed or an input was rejected.
    Error(Error),
    Cancelled,
    Help,
    Quit,
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flags {
    /// Optional locale override from CLI (e.g., "en-US", "fr").
    pub lang: Option<String>,
    /// Category to load right after start-up.
    pub category: Option<String>,
    /// Optional config directory override (for testing or portable installs).
    pub config_dir: Option<String>,
    /// Subcategory depth override.
    pub depth: Option<u32>,
    /// Thumbnail width override in pixels.
    pub width: Option<u32>,
    /// Skip the start-up connectivity check.
    pub no_probe: bool,
}
