// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded at build time from `assets/i18n/`
//! - Variable substitution through [`fluent::I18n::tr_with_args`]
//! - Fallback to `en-US` when no requested locale is available

pub mod fluent;

pub use fluent::I18n;
pub use fluent_bundle::FluentValue;
