// SPDX-License-Identifier: MPL-2.0
//! Gallery navigation: the loaded file list and the cursor into it.
//!
//! The gallery is the only state that outlives a single request. It changes
//! only when a listing replaces it (cursor back to the first file) or when the
//! user navigates.

use crate::domain::commons::FileTitle;
use crate::domain::ui::JumpTarget;
use crate::error::{InputError, Result};

/// Navigation state information for rendering.
///
/// A snapshot of the gallery that the view can render without access to the
/// list itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInfo {
    /// Whether the current file is the first in the list.
    pub at_first: bool,
    /// Whether the current file is the last in the list.
    pub at_last: bool,
    /// 1-based position of the current file, if any.
    pub position: Option<usize>,
    /// Total number of files in the list.
    pub total_count: usize,
}

/// The loaded file list plus the current position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    files: Vec<FileTitle>,
    current_index: Option<usize>,
}

impl Gallery {
    /// Creates a gallery positioned on the first file (if any).
    #[must_use]
    pub fn new(files: Vec<FileTitle>) -> Self {
        let current_index = if files.is_empty() { None } else { Some(0) };
        Self {
            files,
            current_index,
        }
    }

    /// Replaces the list and resets the cursor to the first file.
    pub fn replace(&mut self, files: Vec<FileTitle>) {
        *self = Self::new(files);
    }

    /// Empties the gallery.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn current(&self) -> Option<&FileTitle> {
        self.current_index.and_then(|idx| self.files.get(idx))
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FileTitle> {
        self.files.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Moves to the next file, wrapping around to the first.
    ///
    /// Returns `None` (and does nothing) on an empty gallery.
    pub fn next(&mut self) -> Option<&FileTitle> {
        let len = self.files.len();
        if len == 0 {
            return None;
        }
        let next = self.current_index.map_or(0, |idx| (idx + 1) % len);
        self.current_index = Some(next);
        self.files.get(next)
    }

    /// Moves to the previous file, wrapping around to the last.
    ///
    /// Returns `None` (and does nothing) on an empty gallery.
    pub fn previous(&mut self) -> Option<&FileTitle> {
        let len = self.files.len();
        if len == 0 {
            return None;
        }
        let prev = self.current_index.map_or(len - 1, |idx| (idx + len - 1) % len);
        self.current_index = Some(prev);
        self.files.get(prev)
    }

    /// Moves to a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyGallery`] or [`InputError::JumpOutOfRange`];
    /// the cursor is left unchanged in both cases.
    pub fn jump_to(&mut self, target: JumpTarget) -> Result<&FileTitle> {
        if self.files.is_empty() {
            return Err(InputError::EmptyGallery.into());
        }
        let index = target.index();
        if index >= self.files.len() {
            return Err(InputError::JumpOutOfRange {
                requested: target.position(),
                len: self.files.len(),
            }
            .into());
        }
        self.current_index = Some(index);
        Ok(&self.files[index])
    }

    #[must_use]
    pub fn is_at_first(&self) -> bool {
        matches!(self.current_index, Some(0))
    }

    #[must_use]
    pub fn is_at_last(&self) -> bool {
        if self.files.is_empty() {
            return false;
        }
        matches!(self.current_index, Some(idx) if idx == self.files.len() - 1)
    }

    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        NavigationInfo {
            at_first: self.is_at_first(),
            at_last: self.is_at_last(),
            position: self.current_index.map(|idx| idx + 1),
            total_count: self.len(),
        }
    }
}
