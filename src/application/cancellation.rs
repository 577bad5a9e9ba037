// SPDX-License-Identifier: MPL-2.0
//! Cooperative cancellation shared between the interactive context and a
//! background task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token type for background tasks.
pub type CancellationToken = Arc<AtomicBool>;

/// Creates a fresh, untriggered token.
#[must_use]
pub fn new_token() -> CancellationToken {
    Arc::new(AtomicBool::new(false))
}

/// Checks if the cancellation token has been triggered.
#[inline]
pub fn is_cancelled(token: &CancellationToken) -> bool {
    token.load(Ordering::SeqCst)
}

/// Triggers the token. Calling it again has no further effect.
#[inline]
pub fn cancel(token: &CancellationToken) {
    token.store(true, Ordering::SeqCst);
}
