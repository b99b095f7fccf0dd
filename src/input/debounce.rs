//! Push-Button Debouncing
//!
//! Edges on the button line only arm a settle timer; the line is judged
//! once, when the timer expires. Further edges inside the window push the
//! deadline out instead of queueing more checks, so a bouncing contact
//! produces exactly one decision based on where the line came to rest.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::types::Millis;

/// Debounced button transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEdge {
    /// Latched as pressed
    Pressed,
    /// Latched as released
    Released,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonEdge {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Pressed => defmt::write!(f, "Pressed"),
            Self::Released => defmt::write!(f, "Released"),
        }
    }
}

/// Debounced button state shared with the control loop
///
/// `held` mirrors the settled line; `press` is a one-shot notification
/// set on each new press and cleared by [`take_press`](Self::take_press).
#[derive(Debug, Default)]
pub struct ButtonLatch {
    held: AtomicBool,
    press: AtomicBool,
}

impl ButtonLatch {
    /// Create a released latch, usable in a `static`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
            press: AtomicBool::new(false),
        }
    }

    /// Record the settled line level
    pub fn settle(&self, asserted: bool) -> Option<ButtonEdge> {
        let was_held = self.held.swap(asserted, Ordering::AcqRel);
        match (was_held, asserted) {
            (false, true) => {
                self.press.store(true, Ordering::Release);
                Some(ButtonEdge::Pressed)
            }
            (true, false) => Some(ButtonEdge::Released),
            _ => None,
        }
    }

    /// Debounced level
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    /// Consume the press notification
    pub fn take_press(&self) -> bool {
        self.press.swap(false, Ordering::AcqRel)
    }
}

/// One-shot settle timer for the button line
#[derive(Clone, Copy, Debug)]
pub struct SwitchDebouncer {
    delay_ms: Millis,
    deadline: Option<Millis>,
}

impl SwitchDebouncer {
    /// Create an idle debouncer
    #[must_use]
    pub const fn new(delay_ms: Millis) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Raw edge seen at `now`: (re)arm the timer
    pub fn on_edge(&mut self, now: Millis) {
        self.deadline = Some(now.saturating_add(self.delay_ms));
    }

    /// When the pending check is due
    #[must_use]
    pub const fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Whether a check is pending
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolve the pending check if it is due
    ///
    /// `asserted` is the line level read now, not at arm time.
    pub fn poll(&mut self, now: Millis, asserted: bool, latch: &ButtonLatch) -> Option<ButtonEdge> {
        match self.deadline {
            Some(due) if now >= due => {
                self.deadline = None;
                latch.settle(asserted)
            }
            _ => None,
        }
    }
}
