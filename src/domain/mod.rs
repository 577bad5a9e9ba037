// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core types with no I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It does not talk to the network, which keeps it trivially testable.
//!
//! # Modules
//!
//! - [`commons`]: Commons content types ([`CategoryName`](commons::CategoryName),
//!   [`FileTitle`](commons::FileTitle), [`Statements`](commons::Statements),
//!   [`FileInfo`](commons::FileInfo))
//! - [`ui`]: UI value objects ([`JumpTarget`](ui::JumpTarget))

pub mod commons;
pub mod ui;
