//! Ballistic Step Controller
//!
//! Turns rotation speed into tuning step size. Slow turns stay on the
//! finest rung of the [`StepLadder`]; quick turns climb to coarser rungs
//! so a spin sweeps the band in a few revolutions.
//!
//! # Algorithm
//!
//! Each control-loop tick hands the controller the net detents drained
//! since the previous tick and the current monotonic time:
//!
//! 1. No detents: after `idle_reset_ms` of quiet the rung drops to 0.
//! 2. Otherwise the inter-detent interval (IDI) is measured against the
//!    previous detent.
//! 3. The rung climbs while the IDI is at or below the promote threshold
//!    of the next rung, then descends while the IDI is at or above the
//!    demote threshold of the current rung. Promote is always strictly
//!    faster than demote, so an IDI hovering near one threshold cannot
//!    make the rung chatter.
//! 4. `fast_streak_len` fast detents in a row arm a turbo window during
//!    which the step of the next rung up is used without promoting.
//! 5. A multiplier in `1..=max_multiplier` grows as the IDI shrinks.
//! 6. `step * multiplier * sign(detents)` is applied to the frequency,
//!    which clamps at the band edges.
//!
//! The magnitude of the detent count beyond its sign is not used: a tick
//! that drained three detents moves exactly as far as one that drained a
//! single detent at the same speed.

use crate::config::{TuningConfig, LADDER_RUNGS};
use crate::types::{Direction, Millis};

use super::frequency::FrequencyState;
use super::ladder::{Rung, StepLadder};

/// What one tick did to the frequency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Signed offset handed to the frequency state
    pub delta_hz: i64,
    /// Effective step size (turbo included)
    pub step_hz: u32,
    /// Speed multiplier
    pub multiplier: u32,
    /// Rung after the tick
    pub rung: Rung,
    /// Whether the turbo window boosted the step
    pub turbo: bool,
    /// Measured inter-detent interval (`Millis::MAX` for the first detent)
    pub interval_ms: Millis,
    /// Whether the frequency actually moved (false when pinned at an edge)
    pub changed: bool,
}

#[cfg(feature = "embedded")]
impl defmt::Format for StepOutcome {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Step({} Hz x{}, {}, turbo={}, delta={})",
            self.step_hz,
            self.multiplier,
            self.rung,
            self.turbo,
            self.delta_hz
        );
    }
}

/// Speed-adaptive step controller
#[derive(Clone, Copy, Debug)]
pub struct BallisticStepController<const N: usize = LADDER_RUNGS> {
    ladder: StepLadder<N>,
    idle_reset_ms: Millis,
    fast_detent_ms: Millis,
    fast_streak_len: u8,
    turbo_window_ms: Millis,
    multiplier_reference_ms: Millis,
    max_multiplier: u32,
    rung: Rung,
    last_detent: Option<Millis>,
    turbo_until: Option<Millis>,
    fast_streak: u8,
}

impl<const N: usize> BallisticStepController<N> {
    /// Create a controller resting on the finest rung
    #[must_use]
    pub const fn new(config: &TuningConfig<N>) -> Self {
        Self {
            ladder: config.ladder,
            idle_reset_ms: config.idle_reset_ms,
            fast_detent_ms: config.fast_detent_ms,
            fast_streak_len: config.fast_streak_len,
            turbo_window_ms: config.turbo_window_ms,
            multiplier_reference_ms: config.multiplier_reference_ms,
            max_multiplier: config.max_multiplier,
            rung: Rung::BASE,
            last_detent: None,
            turbo_until: None,
            fast_streak: 0,
        }
    }

    /// Current rung
    #[must_use]
    pub const fn rung(&self) -> Rung {
        self.rung
    }

    /// The ladder this controller walks
    #[must_use]
    pub const fn ladder(&self) -> &StepLadder<N> {
        &self.ladder
    }

    /// Expiry of the most recently armed turbo window
    #[must_use]
    pub const fn turbo_until(&self) -> Option<Millis> {
        self.turbo_until
    }

    /// Fast detents counted towards the next turbo window
    #[must_use]
    pub const fn fast_streak(&self) -> u8 {
        self.fast_streak
    }

    /// Time of the last detent seen
    #[must_use]
    pub const fn last_detent(&self) -> Option<Millis> {
        self.last_detent
    }

    /// Whether the turbo window is open at `now`
    #[must_use]
    pub fn turbo_active(&self, now: Millis) -> bool {
        self.turbo_until.is_some_and(|until| now < until)
    }

    /// Step size a detent at `now` would use, before the multiplier
    #[must_use]
    pub fn effective_step_hz(&self, now: Millis) -> u32 {
        let boosted = if self.turbo_active(now) {
            self.ladder.above(self.rung)
        } else {
            None
        };
        self.ladder.step_hz(boosted.unwrap_or(self.rung))
    }

    /// Speed multiplier for an inter-detent interval
    #[must_use]
    pub fn multiplier(&self, interval_ms: Millis) -> u32 {
        let ratio = self.multiplier_reference_ms / interval_ms.max(1);
        u32::try_from(ratio)
            .unwrap_or(u32::MAX)
            .clamp(1, self.max_multiplier.max(1))
    }

    /// Forget all motion history
    pub fn reset(&mut self) {
        self.rung = Rung::BASE;
        self.last_detent = None;
        self.turbo_until = None;
        self.fast_streak = 0;
    }

    /// Run one control-loop iteration
    ///
    /// Returns `None` when no detents were drained.
    pub fn tick(
        &mut self,
        net_detents: i32,
        now: Millis,
        frequency: &mut FrequencyState,
    ) -> Option<StepOutcome> {
        let Some(direction) = Direction::from_count(net_detents) else {
            self.settle(now);
            return None;
        };

        let interval_ms = self
            .last_detent
            .map_or(Millis::MAX, |last| now.saturating_sub(last));
        self.last_detent = Some(now);

        self.climb(interval_ms);
        self.track_momentum(interval_ms, now);

        let turbo = self.turbo_active(now) && self.ladder.above(self.rung).is_some();
        let step_hz = self.effective_step_hz(now);
        let multiplier = self.multiplier(interval_ms);
        let delta_hz =
            i64::from(step_hz) * i64::from(multiplier) * i64::from(direction.sign());
        let changed = frequency.apply(delta_hz);

        Some(StepOutcome {
            delta_hz,
            step_hz,
            multiplier,
            rung: self.rung,
            turbo,
            interval_ms,
            changed,
        })
    }

    /// Idle tick: drop to the finest rung once the knob has rested
    fn settle(&mut self, now: Millis) {
        if let Some(last) = self.last_detent {
            if now.saturating_sub(last) >= self.idle_reset_ms {
                self.rung = Rung::BASE;
            }
        }
    }

    /// Two-sided hysteretic scan; converges within one tick
    fn climb(&mut self, interval_ms: Millis) {
        while let Some(next) = self.ladder.above(self.rung) {
            if interval_ms > self.ladder.spec(next).promote_ms {
                break;
            }
            self.rung = next;
        }

        while let Some(prev) = self.ladder.below(self.rung) {
            if interval_ms < self.ladder.spec(self.rung).demote_ms {
                break;
            }
            self.rung = prev;
        }
    }

    fn track_momentum(&mut self, interval_ms: Millis, now: Millis) {
        if interval_ms >= self.fast_detent_ms {
            self.fast_streak = 0;
            return;
        }

        self.fast_streak = self.fast_streak.saturating_add(1);
        if self.fast_streak >= self.fast_streak_len {
            let expiry = now.saturating_add(self.turbo_window_ms);
            // Re-arming only ever pushes the expiry forward
            self.turbo_until = Some(self.turbo_until.map_or(expiry, |t| t.max(expiry)));
            self.fast_streak = 0;
        }
    }
}

impl Default for BallisticStepController<LADDER_RUNGS> {
    fn default() -> Self {
        Self::new(&TuningConfig::default())
    }
}
