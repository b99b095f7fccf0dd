//! Frequency State
//!
//! The authoritative tuned frequency. Every write is clamped into the
//! band, and a dirty flag tells the synthesizer driver when the hardware
//! needs reprogramming.

/// Clamped frequency with change tracking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyState {
    hz: u32,
    min_hz: u32,
    max_hz: u32,
    dirty: bool,
}

impl FrequencyState {
    /// Create a frequency state; the initial value is clamped into the band
    /// and marked dirty so the first poll programs the synthesizer.
    ///
    /// If `min_hz > max_hz` the bounds are swapped.
    #[must_use]
    pub fn new(initial_hz: u32, min_hz: u32, max_hz: u32) -> Self {
        let (min_hz, max_hz) = if min_hz <= max_hz {
            (min_hz, max_hz)
        } else {
            (max_hz, min_hz)
        };
        Self {
            hz: initial_hz.clamp(min_hz, max_hz),
            min_hz,
            max_hz,
            dirty: true,
        }
    }

    /// Current frequency in Hz
    #[must_use]
    pub const fn hz(&self) -> u32 {
        self.hz
    }

    /// Lower band edge
    #[must_use]
    pub const fn min_hz(&self) -> u32 {
        self.min_hz
    }

    /// Upper band edge
    #[must_use]
    pub const fn max_hz(&self) -> u32 {
        self.max_hz
    }

    /// Add a signed offset, saturating at the band edges
    ///
    /// Returns `true` if the frequency changed.
    pub fn apply(&mut self, delta_hz: i64) -> bool {
        let target = i64::from(self.hz).saturating_add(delta_hz);
        let clamped = target.clamp(i64::from(self.min_hz), i64::from(self.max_hz));
        self.store(u32::try_from(clamped).unwrap_or(self.max_hz))
    }

    /// Set an absolute frequency (clamped)
    ///
    /// Returns `true` if the frequency changed.
    pub fn set(&mut self, hz: u32) -> bool {
        self.store(hz.clamp(self.min_hz, self.max_hz))
    }

    fn store(&mut self, hz: u32) -> bool {
        if hz == self.hz {
            return false;
        }
        self.hz = hz;
        self.dirty = true;
        true
    }

    /// Force the next [`take_dirty`](Self::take_dirty) to report the value
    pub fn request_apply(&mut self) {
        self.dirty = true;
    }

    /// Whether the hardware is behind the current value
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag, returning the value to program
    pub fn take_dirty(&mut self) -> Option<u32> {
        if self.dirty {
            self.dirty = false;
            Some(self.hz)
        } else {
            None
        }
    }

    /// Whether the frequency sits on a band edge
    #[must_use]
    pub const fn at_edge(&self) -> bool {
        self.hz == self.min_hz || self.hz == self.max_hz
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrequencyState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.hz);
        if self.dirty {
            defmt::write!(f, " (dirty)");
        }
    }
}
