//! Quadrature Decoding
//!
//! The encoder lines walk a Gray-code cycle, one line changing per
//! transition. Comparing each new sample with the last decoded one gives
//! the direction; anything that is not a single-step move around the
//! cycle is ignored.
//!
//! ```text
//! forward:   0 → 2 → 3 → 1 → 0
//! backward:  0 → 1 → 3 → 2 → 0      (sample = CLK << 1 | DT)
//! ```

use crate::types::{Direction, EncoderSample};

/// Decode one transition into +1, -1 or 0
#[must_use]
pub const fn decode(prev: EncoderSample, next: EncoderSample) -> i8 {
    match (prev.bits(), next.bits()) {
        (2, 3) | (3, 1) | (1, 0) | (0, 2) => 1,
        (3, 2) | (2, 0) | (0, 1) | (1, 3) => -1,
        _ => 0,
    }
}

/// Transition decoder holding only the last decoded sample
///
/// Both line interrupts may call [`update`](Self::update) with the same
/// sample; the repeat is recognized as a self-transition and dropped, so
/// redundant callbacks never double-count.
#[derive(Clone, Copy, Debug)]
pub struct QuadratureDecoder {
    last: EncoderSample,
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the current line state
    #[must_use]
    pub const fn new(initial: EncoderSample) -> Self {
        Self { last: initial }
    }

    /// Feed a new sample, returning the detent it completes (if any)
    pub fn update(&mut self, sample: EncoderSample) -> Option<Direction> {
        if sample == self.last {
            return None;
        }

        let prev = core::mem::replace(&mut self.last, sample);
        match decode(prev, sample) {
            1 => Some(Direction::Clockwise),
            -1 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }

    /// Last decoded sample
    #[must_use]
    pub const fn last(&self) -> EncoderSample {
        self.last
    }

    /// Re-seed after the lines were not observed for a while
    pub fn reset(&mut self, sample: EncoderSample) {
        self.last = sample;
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new(EncoderSample::default())
    }
}
