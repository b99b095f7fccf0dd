//! Status Line Formatting
//!
//! Text handed to the display collaborator. Everything is formatted into
//! fixed-capacity strings so the control loop never allocates.

use core::fmt::Write;

use heapless::String;

use crate::types::Band;

use super::digit::TuningMode;

/// Frequency as `MHz.kHz.Hz`, e.g. `7.074.000`
#[must_use]
pub fn frequency_text(hz: u32) -> String<16> {
    let mhz = hz / 1_000_000;
    let khz = (hz % 1_000_000) / 1000;
    let rest = hz % 1000;

    let mut s = String::new();
    // 4294.967.295 is the widest u32 and still fits
    let _ = write!(s, "{mhz}.{khz:03}.{rest:03}");
    s
}

/// Compact step size, e.g. `1Hz`, `20kHz`, `1MHz`
#[must_use]
pub fn step_text(step_hz: u32) -> String<8> {
    let mut s = String::new();
    let _ = if step_hz >= 1_000_000 && step_hz % 1_000_000 == 0 {
        write!(s, "{}MHz", step_hz / 1_000_000)
    } else if step_hz >= 1000 && step_hz % 1000 == 0 {
        write!(s, "{}kHz", step_hz / 1000)
    } else {
        write!(s, "{step_hz}Hz")
    };
    s
}

/// Character index of a readout digit inside [`frequency_text`]
///
/// `position` counts Hz-readout digits from the 1 MHz digit (0) down to
/// the 1 Hz digit (6).
#[must_use]
pub fn cursor_column(text: &str, position: u8) -> Option<usize> {
    let from_right = usize::from(6u8.checked_sub(position)?);
    let chars_from_right = from_right + from_right / 3;
    text.len().checked_sub(chars_from_right + 1)
}

/// Everything the display shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    /// Band label, e.g. `40 Meter`
    pub band: &'static str,
    /// Frequency readout
    pub frequency: String<16>,
    /// Step or cursor description
    pub detail: String<16>,
    /// Column of the readout character to underline (digit mode only)
    pub cursor: Option<usize>,
}

impl StatusLine {
    /// Format the status for the current tuning state
    #[must_use]
    pub fn new(hz: u32, mode: TuningMode, step_hz: u32, turbo: bool) -> Self {
        let frequency = frequency_text(hz);
        let step = step_text(step_hz);

        let mut detail: String<16> = String::new();
        let cursor = match mode {
            TuningMode::Ballistic => {
                let _ = write!(detail, "Step {step}");
                if turbo {
                    let _ = detail.push_str(" >>");
                }
                None
            }
            TuningMode::Digit(digit) => {
                let _ = write!(detail, "Digit {step}");
                cursor_column(&frequency, digit.position())
            }
        };

        Self {
            band: Band::from_hz(hz).map_or("---", Band::label),
            frequency,
            detail,
            cursor,
        }
    }
}
