//! Cooperative cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Flag checked by sample generators between sequence indices.
///
/// Shared by reference across worker threads; raising it stops every
/// generator at its next check.
#[derive(Debug, Default)]
pub struct AbortSwitch {
    aborted: AtomicBool,
}

impl AbortSwitch {
    /// Creates a lowered switch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the switch.
    #[inline]
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    /// Lowers the switch.
    #[inline]
    pub fn clear(&self) {
        self.aborted.store(false, Ordering::Relaxed);
    }

    /// Returns `true` if the switch is raised.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}
