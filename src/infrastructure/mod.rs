// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`mediawiki`]: Wikimedia Commons over the MediaWiki Action API
//!   (implements [`CommonsApi`])
//!
//! [`CommonsApi`]: crate::application::port::CommonsApi

pub mod mediawiki;

pub use mediawiki::MediaWikiClient;
