//! Detent Aggregation
//!
//! Lock-free counter between the edge interrupt (single producer) and
//! the control loop (single consumer). Uses `fetch_add`/`swap`, which
//! Cortex-M4 implements natively with exclusive load/store.

use core::sync::atomic::{AtomicI32, Ordering};

use crate::types::Direction;

/// Signed detent accumulator
#[derive(Debug, Default)]
pub struct DetentCounter {
    count: AtomicI32,
}

impl DetentCounter {
    /// Create an empty counter, usable in a `static`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: AtomicI32::new(0),
        }
    }

    /// Record one decoded detent
    pub fn record(&self, direction: Direction) {
        self.count.fetch_add(direction.sign(), Ordering::AcqRel);
    }

    /// Take everything accumulated so far and zero the counter
    ///
    /// The read and the reset are a single atomic swap, so a detent that
    /// lands concurrently is either in this result or in the next one.
    pub fn take(&self) -> i32 {
        self.count.swap(0, Ordering::AcqRel)
    }

    /// Peek without draining
    #[must_use]
    pub fn pending(&self) -> i32 {
        self.count.load(Ordering::Acquire)
    }
}
