// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`cancellation`]: Shared cancellation flag for background work
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`query`]: Query services (category listing, file resolution, navigation)
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use commons_lens::application::port::CommonsApi;
//! use commons_lens::application::query::{list_files, Gallery};
//!
//! let files = list_files(&api, &category, 1, &token, |_| {}).await?;
//! let gallery = Gallery::new(files);
//! ```

pub mod cancellation;
pub mod port;
pub mod query;

pub use cancellation::CancellationToken;
