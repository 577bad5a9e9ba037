// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`commons`]: Commons content API (category listing, image info, statements)
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `reqwest` or `serde_json` types)
//! - Traits are `Send + Sync` so adapters can be shared with background tasks
//! - Methods return `Result` with the crate error type
//!
//! # Example
//!
//! ```ignore
//! use commons_lens::application::port::CommonsApi;
//! use commons_lens::domain::commons::FileTitle;
//!
//! async fn exists(api: &impl CommonsApi, title: &FileTitle) -> bool {
//!     matches!(api.image_info(title, None).await, Ok(Some(_)))
//! }
//! ```

pub mod commons;

pub use commons::CommonsApi;
