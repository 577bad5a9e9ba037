// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for values typed by the user,
//! ensuring they are validated once at the boundary.

use crate::error::{InputError, Result};
use std::str::FromStr;

// =============================================================================
// JumpTarget
// =============================================================================

/// A 1-based image number, as shown by the "i / N" counter.
///
/// Only positive integers are representable; whether the number fits the
/// loaded list is checked by the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JumpTarget(usize);

impl JumpTarget {
    /// Creates a jump target from a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidJumpTarget`] for zero.
    pub fn new(position: usize) -> Result<Self> {
        if position == 0 {
            return Err(InputError::InvalidJumpTarget(position.to_string()).into());
        }
        Ok(Self(position))
    }

    /// Returns the 1-based position.
    #[must_use]
    pub fn position(self) -> usize {
        self.0
    }

    /// Returns the 0-based list index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl FromStr for JumpTarget {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let position = trimmed
            .parse::<usize>()
            .map_err(|_| InputError::InvalidJumpTarget(trimmed.to_string()))?;
        Self::new(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn parses_positive_integers() {
        let target: JumpTarget = " 42 ".parse().unwrap();
        assert_eq!(target.position(), 42);
        assert_eq!(target.index(), 41);
    }

    #[test]
    fn rejects_zero_negative_and_text() {
        for raw in ["0", "-3", "abc", "", "4.5"] {
            let err = raw.parse::<JumpTarget>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidInput(InputError::InvalidJumpTarget(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn new_rejects_zero() {
        assert!(JumpTarget::new(0).is_err());
        assert_eq!(JumpTarget::new(1).unwrap().index(), 0);
    }
}
