//! Cooperative cancellation for long-running passes.

use std::cell::Cell;
use std::rc::Rc;

/// A clone-shared cancellation flag.
///
/// The engine checks the token once per loop iteration; cancelling from a
/// step callback (or anything else holding a clone) stops the search at
/// the next iteration. Single-threaded by design, like the rest of the
/// engine.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Rc<Cell<bool>>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.set(true);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }

    /// Reset the token for reuse.
    pub fn reset(&self) {
        self.flag.set(false);
    }
}
