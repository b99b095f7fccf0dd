//! Shared types used across the VFO firmware
//!
//! Small value types that carry invariants between the input layer,
//! the tuning core and the drivers.

/// Monotonic timestamp or duration in milliseconds.
pub type Millis = u64;

/// Encoder rotation direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise rotation (frequency up)
    Clockwise,
    /// Counter-clockwise rotation (frequency down)
    CounterClockwise,
}

impl Direction {
    /// Signed unit step for this direction
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }

    /// Direction of a signed count, `None` for zero
    #[must_use]
    pub const fn from_count(count: i32) -> Option<Self> {
        if count > 0 {
            Some(Self::Clockwise)
        } else if count < 0 {
            Some(Self::CounterClockwise)
        } else {
            None
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Clockwise => defmt::write!(f, "CW"),
            Self::CounterClockwise => defmt::write!(f, "CCW"),
        }
    }
}

/// Two-bit sample of the encoder lines
///
/// Bit 1 holds the CLK (A) line, bit 0 the DT (B) line, so a sample is
/// always one of `0..=3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct EncoderSample(u8);

impl EncoderSample {
    /// Build a sample from the raw line levels
    #[must_use]
    pub const fn from_lines(clk: bool, dt: bool) -> Self {
        Self(((clk as u8) << 1) | dt as u8)
    }

    /// Build a sample from packed bits (upper bits are ignored)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Packed two-bit value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// CLK (A) line level
    #[must_use]
    pub const fn clk(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// DT (B) line level
    #[must_use]
    pub const fn dt(self) -> bool {
        self.0 & 0b01 != 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EncoderSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8:02b}", self.0);
    }
}

/// Amateur radio band, used for the display label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// 80 meters (3.5 - 4.0 MHz)
    M80,
    /// 40 meters (7.0 - 7.3 MHz)
    M40,
    /// 30 meters (10.1 - 10.15 MHz)
    M30,
    /// 20 meters (14.0 - 14.35 MHz)
    M20,
}

impl Band {
    /// Get the band containing a frequency in Hz
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            3_500_000..=4_000_000 => Some(Self::M80),
            7_000_000..=7_300_000 => Some(Self::M40),
            10_100_000..=10_150_000 => Some(Self::M30),
            14_000_000..=14_350_000 => Some(Self::M20),
            _ => None,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::M80 => "80 Meter",
            Self::M40 => "40 Meter",
            Self::M30 => "30 Meter",
            Self::M20 => "20 Meter",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.label());
    }
}
