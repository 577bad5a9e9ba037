// SPDX-License-Identifier: MPL-2.0
//! Query services (read-side).
//!
//! This module contains the services that read the Commons backend and the
//! navigation state built from what they return.
//!
//! # Available Services
//!
//! - [`category`]: Category listing (`list_files`)
//! - [`file_info`]: Metadata resolution for one file (`resolve`)
//! - [`navigation`]: Loaded file list and cursor (`Gallery`)
//!
//! # Design Notes
//!
//! The listing and resolution services are generic over
//! [`CommonsApi`](crate::application::port::CommonsApi), so they run
//! unchanged against the HTTP adapter and the in-memory test backend.

pub mod category;
pub mod file_info;
pub mod navigation;

pub use category::{list_files, ListProgress};
pub use file_info::resolve;
pub use navigation::{Gallery, NavigationInfo};
