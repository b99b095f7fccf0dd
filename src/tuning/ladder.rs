//! Step Ladder
//!
//! Ordered table of tuning step sizes with per-rung hysteresis
//! thresholds. A [`Rung`] can only be obtained from a ladder, so every
//! rung in circulation is a valid index into it.

use crate::config::ConfigError;
use crate::types::Millis;

/// One rung of the ladder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RungSpec {
    /// Frequency step in Hz
    pub step_hz: u32,
    /// Enter this rung when the inter-detent interval is at or below this
    pub promote_ms: Millis,
    /// Leave this rung when the inter-detent interval is at or above this
    pub demote_ms: Millis,
}

impl RungSpec {
    /// Rung with hysteresis thresholds
    #[must_use]
    pub const fn new(step_hz: u32, promote_ms: Millis, demote_ms: Millis) -> Self {
        Self {
            step_hz,
            promote_ms,
            demote_ms,
        }
    }

    /// Bottom rung, which is never promoted into or demoted out of
    #[must_use]
    pub const fn base(step_hz: u32) -> Self {
        Self {
            step_hz,
            promote_ms: Millis::MAX,
            demote_ms: Millis::MAX,
        }
    }
}

/// Index into a [`StepLadder`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Rung(usize);

impl Rung {
    /// Finest rung, present in every ladder
    pub const BASE: Self = Self(0);

    /// Position in the ladder
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Rung {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "R{}", self.0);
    }
}

/// Step sizes from fine to coarse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepLadder<const N: usize> {
    rungs: [RungSpec; N],
}

impl<const N: usize> StepLadder<N> {
    /// Build a ladder, checking its ordering and hysteresis invariants
    ///
    /// # Errors
    ///
    /// Returns the first rung that violates an invariant.
    pub const fn new(rungs: [RungSpec; N]) -> Result<Self, ConfigError> {
        if N == 0 {
            return Err(ConfigError::EmptyLadder);
        }

        let mut r = 1;
        while r < N {
            let below = rungs[r - 1];
            let rung = rungs[r];

            if rung.step_hz <= below.step_hz {
                return Err(ConfigError::StepsNotIncreasing { rung: r });
            }
            if rung.promote_ms >= rung.demote_ms {
                return Err(ConfigError::HysteresisInverted { rung: r });
            }
            if r >= 2 && (rung.promote_ms >= below.promote_ms || rung.demote_ms >= below.demote_ms) {
                return Err(ConfigError::ThresholdsNotDecreasing { rung: r });
            }
            r += 1;
        }

        Ok(Self { rungs })
    }

    /// Build a ladder at compile time (panics if invalid)
    #[must_use]
    pub const fn new_const(rungs: [RungSpec; N]) -> Self {
        match Self::new(rungs) {
            Ok(ladder) => ladder,
            Err(_) => panic!("invalid step ladder"),
        }
    }

    /// Number of rungs
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false: construction rejects empty ladders
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Coarsest rung
    #[must_use]
    pub const fn top(&self) -> Rung {
        Rung(N - 1)
    }

    /// Rung above `rung`, if any
    #[must_use]
    pub const fn above(&self, rung: Rung) -> Option<Rung> {
        if rung.0 + 1 < N {
            Some(Rung(rung.0 + 1))
        } else {
            None
        }
    }

    /// Rung below `rung`, if any
    #[must_use]
    pub const fn below(&self, rung: Rung) -> Option<Rung> {
        if rung.0 > 0 {
            Some(Rung(rung.0 - 1))
        } else {
            None
        }
    }

    /// Rung at `index`, if it exists
    #[must_use]
    pub const fn rung(&self, index: usize) -> Option<Rung> {
        if index < N {
            Some(Rung(index))
        } else {
            None
        }
    }

    /// Specification of a rung
    #[must_use]
    pub const fn spec(&self, rung: Rung) -> &RungSpec {
        &self.rungs[rung.0]
    }

    /// Step size of a rung in Hz
    #[must_use]
    pub const fn step_hz(&self, rung: Rung) -> u32 {
        self.rungs[rung.0].step_hz
    }

    /// All step sizes, fine to coarse
    pub fn steps(&self) -> impl Iterator<Item = u32> + '_ {
        self.rungs.iter().map(|r| r.step_hz)
    }
}
