// SPDX-License-Identifier: MPL-2.0
//! Commons content types: titles, membership pages, statements and file data.

pub mod file_info;
pub mod member;
pub mod statement;
pub mod title;

pub use file_info::{plain_text, FileInfo, ImageInfo};
pub use member::{CategoryMember, Continuation, MemberPage};
pub use statement::{Rank, SnakValue, Statement, Statements};
pub use title::{CategoryName, FileTitle, Namespace};
