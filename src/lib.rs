// SPDX-License-Identifier: MPL-2.0
//! `commons_lens` browses the images of a Wikimedia Commons category from the
//! terminal.
//!
//! It lists a category (optionally descending into subcategories) in the
//! background, then shows one file at a time with its license and author,
//! resolved from the file's structured data.

#![doc(html_root_url = "https://docs.rs/commons_lens/0.1.0")]

pub mod app;
pub mod application;
pub mod category_loader;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;

#[cfg(any(test, feature = "mock"))]
pub mod test_utils;
