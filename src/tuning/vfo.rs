//! VFO
//!
//! Ties the tuning pieces together for the control loop: one call per
//! iteration with the drained detents and the press flag, one place to
//! read the frequency, step and status text back out.

use crate::config::{TuningConfig, LADDER_RUNGS, TRANSITIONS_PER_CLICK};
use crate::types::Millis;

use super::ballistic::{BallisticStepController, StepOutcome};
use super::digit::TuningMode;
use super::frequency::FrequencyState;
use super::ladder::Rung;
use super::status::StatusLine;
use super::velocity::{IntervalEma, VelocitySmoother};

/// What changed during one [`Vfo::poll`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VfoUpdate {
    /// Ballistic controller result, when it ran with detents
    pub step: Option<StepOutcome>,
    /// The frequency value moved
    pub moved: bool,
    /// A press switched the tuning mode
    pub mode_changed: bool,
    /// The ladder rung changed (including idle resets)
    pub rung_changed: bool,
    /// The turbo window opened or closed
    pub turbo_changed: bool,
}

impl VfoUpdate {
    /// Whether the status line is out of date
    #[must_use]
    pub const fn needs_redraw(&self) -> bool {
        self.moved || self.mode_changed || self.rung_changed || self.turbo_changed
    }
}

/// Encoder-driven variable frequency oscillator state
#[derive(Clone, Copy, Debug)]
pub struct Vfo<const N: usize = LADDER_RUNGS> {
    frequency: FrequencyState,
    controller: BallisticStepController<N>,
    mode: TuningMode,
    velocity: VelocitySmoother,
    intervals: IntervalEma,
    /// Decoded transitions short of a full click in digit mode
    digit_carry: i32,
    /// Turbo marker as of the previous poll
    last_turbo: bool,
}

impl<const N: usize> Vfo<N> {
    /// Create a VFO at the configured start frequency
    #[must_use]
    pub fn new(config: &TuningConfig<N>) -> Self {
        Self {
            frequency: FrequencyState::new(
                config.initial_hz,
                config.band_min_hz,
                config.band_max_hz,
            ),
            controller: BallisticStepController::new(config),
            mode: TuningMode::Ballistic,
            velocity: VelocitySmoother::new(config.velocity_rate),
            intervals: IntervalEma::new(config.interval_alpha),
            digit_carry: 0,
            last_turbo: false,
        }
    }

    /// Process one control-loop iteration
    pub fn poll(&mut self, net_detents: i32, pressed: bool, now: Millis) -> VfoUpdate {
        let mut update = VfoUpdate::default();
        let rung_before = self.controller.rung();

        if pressed {
            self.cycle_mode();
            update.mode_changed = true;
        }

        match self.mode {
            TuningMode::Ballistic => {
                update.step = self.controller.tick(net_detents, now, &mut self.frequency);
                update.moved = update.step.is_some_and(|s| s.changed);
            }
            TuningMode::Digit(cursor) => {
                let pending = self.digit_carry.saturating_add(net_detents);
                let clicks = pending / TRANSITIONS_PER_CLICK;
                self.digit_carry = pending % TRANSITIONS_PER_CLICK;
                if clicks != 0 {
                    let delta = i64::from(clicks) * i64::from(cursor.step_hz());
                    update.moved = self.frequency.apply(delta);
                }
            }
        }

        if net_detents != 0 {
            self.velocity.update(net_detents, now);
            self.intervals.tick(now);
        }

        update.rung_changed = self.controller.rung() != rung_before;
        let turbo = self.turbo_shown(now);
        update.turbo_changed = turbo != self.last_turbo;
        self.last_turbo = turbo;
        update
    }

    /// Advance to the next tuning mode, discarding motion history
    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        self.controller.reset();
        self.digit_carry = 0;
    }

    /// Current tuning mode
    #[must_use]
    pub const fn mode(&self) -> TuningMode {
        self.mode
    }

    /// Frequency state
    #[must_use]
    pub const fn frequency(&self) -> &FrequencyState {
        &self.frequency
    }

    /// Current frequency in Hz
    #[must_use]
    pub const fn hz(&self) -> u32 {
        self.frequency.hz()
    }

    /// Frequency to program into the synthesizer, if it changed
    pub fn take_pending_hz(&mut self) -> Option<u32> {
        self.frequency.take_dirty()
    }

    /// Mark the frequency for reprogramming (e.g. after a failed write)
    pub fn request_apply(&mut self) {
        self.frequency.request_apply();
    }

    /// Ballistic controller
    #[must_use]
    pub const fn controller(&self) -> &BallisticStepController<N> {
        &self.controller
    }

    /// Current ladder rung
    #[must_use]
    pub const fn rung(&self) -> Rung {
        self.controller.rung()
    }

    /// Step a single detent at `now` would move, before the speed multiplier
    #[must_use]
    pub fn step_hz(&self, now: Millis) -> u32 {
        match self.mode {
            TuningMode::Ballistic => self.controller.effective_step_hz(now),
            TuningMode::Digit(cursor) => cursor.step_hz(),
        }
    }

    /// Smoothed rotation speed in detents per second
    #[must_use]
    pub const fn speed(&self) -> Option<f32> {
        self.velocity.speed()
    }

    /// Averaged inter-detent interval in milliseconds
    #[must_use]
    pub const fn mean_interval_ms(&self) -> Option<f32> {
        self.intervals.value_ms()
    }

    /// Text for the display
    #[must_use]
    pub fn status(&self, now: Millis) -> StatusLine {
        StatusLine::new(self.hz(), self.mode, self.step_hz(now), self.turbo_shown(now))
    }

    /// Whether the turbo marker belongs on the status line at `now`
    fn turbo_shown(&self, now: Millis) -> bool {
        matches!(self.mode, TuningMode::Ballistic)
            && self.controller.turbo_active(now)
            && self.controller.ladder().above(self.controller.rung()).is_some()
    }
}

impl Default for Vfo<LADDER_RUNGS> {
    fn default() -> Self {
        Self::new(&TuningConfig::default())
    }
}
