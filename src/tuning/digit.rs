//! Digit-Cursor Tuning
//!
//! Alternative to ballistic tuning: each press of the encoder button
//! moves a cursor along the seven-digit Hz readout and every detent
//! changes the frequency by the place value under the cursor.

/// Cursor over the Hz readout (`7074000`), position 0 being the MHz digit
///
/// Only positions 1 (100 kHz) to 6 (1 Hz) are selectable; the MHz digit
/// never changes inside a single band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitCursor(u8);

impl DigitCursor {
    /// Coarsest selectable position (100 kHz)
    pub const FIRST: Self = Self(1);

    /// Finest position (1 Hz)
    pub const LAST: Self = Self(6);

    /// Cursor at `position`, if selectable
    #[must_use]
    pub const fn new(position: u8) -> Option<Self> {
        if position >= Self::FIRST.0 && position <= Self::LAST.0 {
            Some(Self(position))
        } else {
            None
        }
    }

    /// Character index in the readout
    #[must_use]
    pub const fn position(self) -> u8 {
        self.0
    }

    /// Place value under the cursor
    #[must_use]
    pub const fn step_hz(self) -> u32 {
        10u32.pow((Self::LAST.0 - self.0) as u32)
    }

    /// Next finer position, `None` past the 1 Hz digit
    #[must_use]
    pub const fn finer(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DigitCursor {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "digit {}", self.0);
    }
}

/// How detents are converted into frequency changes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TuningMode {
    /// Speed-adaptive step size
    #[default]
    Ballistic,
    /// Fixed place-value step chosen by the cursor
    Digit(DigitCursor),
}

impl TuningMode {
    /// Mode selected by the next button press
    ///
    /// Cycles ballistic, then each digit from 100 kHz down to 1 Hz, then
    /// back to ballistic.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Ballistic => Self::Digit(DigitCursor::FIRST),
            Self::Digit(cursor) => match cursor.finer() {
                Some(finer) => Self::Digit(finer),
                None => Self::Ballistic,
            },
        }
    }

    /// Cursor position, if in digit mode
    #[must_use]
    pub const fn cursor(self) -> Option<DigitCursor> {
        match self {
            Self::Ballistic => None,
            Self::Digit(cursor) => Some(cursor),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TuningMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ballistic => defmt::write!(f, "ballistic"),
            Self::Digit(cursor) => defmt::write!(f, "{}", cursor),
        }
    }
}
