//! Rotation Speed Estimation
//!
//! Two smoothers for telemetry. [`VelocitySmoother`] tracks detents per
//! second with a time-aware EMA whose weight depends on the gap since
//! the previous sample, so irregular polling does not skew the average.
//! [`IntervalEma`] is the plain fixed-weight average of inter-detent
//! intervals.

#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::types::Millis;

/// Exponential moving average of rotation speed
#[derive(Clone, Copy, Debug)]
pub struct VelocitySmoother {
    /// Rate constant in 1/s
    rate: f32,
    speed: Option<f32>,
    last_ms: Option<Millis>,
}

impl VelocitySmoother {
    /// Create a smoother; larger `rate` forgets faster
    #[must_use]
    pub const fn new(rate: f32) -> Self {
        Self {
            rate,
            speed: None,
            last_ms: None,
        }
    }

    /// Feed the detents observed at `now`
    ///
    /// The first call only records the timestamp. Samples with no time
    /// elapsed are ignored. Returns the smoothed speed in detents/s.
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, detents: i32, now: Millis) -> Option<f32> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now);
            return self.speed;
        };

        let dt_ms = now.saturating_sub(last);
        if dt_ms == 0 {
            return self.speed;
        }
        self.last_ms = Some(now);

        let dt = dt_ms as f32 / 1000.0;
        let instant = detents.unsigned_abs() as f32 / dt;
        let alpha = self.alpha(dt);

        let speed = self
            .speed
            .map_or(instant, |s| s + alpha * (instant - s));
        self.speed = Some(speed);
        self.speed
    }

    /// Smoothing weight for a gap of `dt` seconds
    #[must_use]
    pub fn alpha(&self, dt: f32) -> f32 {
        1.0 - (-self.rate * dt).exp()
    }

    /// Smoothed speed in detents per second
    #[must_use]
    pub const fn speed(&self) -> Option<f32> {
        self.speed
    }

    /// Clear history
    pub fn reset(&mut self) {
        self.speed = None;
        self.last_ms = None;
    }
}

/// Fixed-weight moving average of inter-detent intervals
///
/// The effective window is roughly `2 / alpha - 1` samples.
#[derive(Clone, Copy, Debug)]
pub struct IntervalEma {
    alpha: f32,
    last_ms: Option<Millis>,
    ema_ms: Option<f32>,
}

impl IntervalEma {
    /// Create an average with weight `alpha` in (0, 1]
    #[must_use]
    pub const fn new(alpha: f32) -> Self {
        Self {
            alpha,
            last_ms: None,
            ema_ms: None,
        }
    }

    /// Record a detent at `now`; the first interval seeds the average
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self, now: Millis) {
        if let Some(last) = self.last_ms {
            let interval = now.saturating_sub(last) as f32;
            self.ema_ms = Some(match self.ema_ms {
                None => interval,
                Some(ema) => self.alpha * interval + (1.0 - self.alpha) * ema,
            });
        }
        self.last_ms = Some(now);
    }

    /// Averaged interval in milliseconds
    #[must_use]
    pub const fn value_ms(&self) -> Option<f32> {
        self.ema_ms
    }

    /// Clear history
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.ema_ms = None;
    }
}
