//! System configuration and hardware constants
//!
//! Compile-time constants for the VFO hardware and the runtime
//! [`TuningConfig`] that parameterizes the tuning core. Band limits,
//! the step ladder and all timing thresholds live here so a board
//! variant only has to supply a different configuration.

use core::fmt;

use crate::tuning::ladder::{RungSpec, StepLadder};

/// `Si5351A` I2C address
pub const SI5351_I2C_ADDR: u8 = 0x60;

/// `Si5351A` crystal frequency (25 MHz TCXO)
pub const SI5351_XTAL_FREQ: u32 = 25_000_000;

/// SSD1306 OLED I2C address
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// I2C bus frequency for `Si5351A` and display
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 64;

/// Lower band edge (40 m)
pub const BAND_MIN_HZ: u32 = 7_000_000;

/// Upper band edge
pub const BAND_MAX_HZ: u32 = 7_200_000;

/// Frequency loaded at power-up
pub const DEFAULT_FREQUENCY_HZ: u32 = 7_000_000;

/// Button settle delay before the line is re-sampled
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Button line reads low when pressed (pull-up wiring)
pub const BUTTON_ACTIVE_LOW: bool = true;

/// Decoded transitions per mechanical click; digit mode moves once per click
pub const TRANSITIONS_PER_CLICK: i32 = 2;

/// Time without detents after which the ladder drops to its finest rung
pub const IDLE_RESET_MS: u64 = 150;

/// Inter-detent interval below which a detent counts towards turbo
pub const FAST_DETENT_MS: u64 = 70;

/// Consecutive fast detents that arm the turbo window
pub const FAST_STREAK_LEN: u8 = 3;

/// Length of the turbo window
pub const TURBO_WINDOW_MS: u64 = 250;

/// Interval at which the speed multiplier is exactly 1
pub const MULTIPLIER_REFERENCE_MS: u64 = 150;

/// Multiplier ceiling for very fast spins
pub const MAX_MULTIPLIER: u32 = 8;

/// Velocity smoother rate constant (1/s)
pub const VELOCITY_SMOOTHING_RATE: f32 = 8.0;

/// Interval EMA weight of the newest sample
pub const INTERVAL_EMA_ALPHA: f32 = 0.25;

/// Control loop backoff between polls
pub const CONTROL_LOOP_PERIOD_MS: u64 = 5;

/// Number of rungs in the default step ladder
pub const LADDER_RUNGS: usize = 6;

/// Default step ladder: 1 Hz up to 20 kHz
///
/// Rung `r` is entered when the inter-detent interval is at or below its
/// promote threshold and left when the interval is at or above its demote
/// threshold. Rung 0 has no thresholds.
pub const DEFAULT_LADDER: StepLadder<LADDER_RUNGS> = StepLadder::new_const([
    RungSpec::base(1),
    RungSpec::new(10, 120, 160),
    RungSpec::new(100, 90, 120),
    RungSpec::new(1_000, 60, 90),
    RungSpec::new(5_000, 40, 60),
    RungSpec::new(20_000, 25, 40),
]);

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the board wiring

    /// Status LED
    pub const LED_STATUS: &str = "PA5";

    /// Encoder CLK (A) input, EXTI0
    pub const ENCODER_CLK: &str = "PA0";

    /// Encoder DT (B) input, EXTI1
    pub const ENCODER_DT: &str = "PA1";

    /// Encoder push button, EXTI2
    pub const ENCODER_SW: &str = "PA2";

    /// I2C1 SCL (`Si5351A`)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (`Si5351A`)
    pub const I2C1_SDA: &str = "PB9";

    /// I2C2 SCL (display)
    pub const I2C2_SCL: &str = "PA9";

    /// I2C2 SDA (display)
    pub const I2C2_SDA: &str = "PA8";
}

/// Invariant violated by a tuning configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The ladder has no rungs
    EmptyLadder,
    /// Step sizes must strictly increase with the rung index
    StepsNotIncreasing {
        /// First offending rung
        rung: usize,
    },
    /// Promote threshold is not below the demote threshold of the same rung
    HysteresisInverted {
        /// Offending rung
        rung: usize,
    },
    /// Thresholds must strictly decrease towards the coarser rungs
    ThresholdsNotDecreasing {
        /// First offending rung
        rung: usize,
    },
    /// Lower band edge is above the upper one
    BandInverted,
    /// A timing or scaling parameter is zero
    ZeroParameter(&'static str),
    /// A smoothing weight lies outside (0, 1]
    AlphaOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLadder => write!(f, "step ladder is empty"),
            Self::StepsNotIncreasing { rung } => {
                write!(f, "step at rung {rung} is not larger than the one below")
            }
            Self::HysteresisInverted { rung } => {
                write!(f, "promote threshold of rung {rung} is not below its demote threshold")
            }
            Self::ThresholdsNotDecreasing { rung } => {
                write!(f, "thresholds of rung {rung} are not faster than the rung below")
            }
            Self::BandInverted => write!(f, "band minimum exceeds band maximum"),
            Self::ZeroParameter(name) => write!(f, "{name} must be non-zero"),
            Self::AlphaOutOfRange => write!(f, "smoothing weight must be in (0, 1]"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::EmptyLadder => defmt::write!(f, "EmptyLadder"),
            Self::StepsNotIncreasing { rung } => defmt::write!(f, "StepsNotIncreasing({})", rung),
            Self::HysteresisInverted { rung } => defmt::write!(f, "HysteresisInverted({})", rung),
            Self::ThresholdsNotDecreasing { rung } => {
                defmt::write!(f, "ThresholdsNotDecreasing({})", rung);
            }
            Self::BandInverted => defmt::write!(f, "BandInverted"),
            Self::ZeroParameter(name) => defmt::write!(f, "ZeroParameter({=str})", name),
            Self::AlphaOutOfRange => defmt::write!(f, "AlphaOutOfRange"),
        }
    }
}

/// Runtime parameters of the tuning core
#[derive(Clone, Copy, Debug)]
pub struct TuningConfig<const N: usize = LADDER_RUNGS> {
    /// Lowest tunable frequency in Hz
    pub band_min_hz: u32,
    /// Highest tunable frequency in Hz
    pub band_max_hz: u32,
    /// Frequency at power-up (clamped into the band)
    pub initial_hz: u32,
    /// Step sizes and per-rung hysteresis thresholds
    pub ladder: StepLadder<N>,
    /// Quiet time that resets the ladder to rung 0
    pub idle_reset_ms: u64,
    /// Interval below which a detent is "fast"
    pub fast_detent_ms: u64,
    /// Fast detents in a row needed to arm turbo
    pub fast_streak_len: u8,
    /// Turbo window length
    pub turbo_window_ms: u64,
    /// Interval that maps to a multiplier of 1
    pub multiplier_reference_ms: u64,
    /// Multiplier ceiling
    pub max_multiplier: u32,
    /// Velocity smoother rate constant (1/s)
    pub velocity_rate: f32,
    /// Interval EMA weight
    pub interval_alpha: f32,
}

impl<const N: usize> TuningConfig<N> {
    /// Build a configuration around a custom ladder, other values default
    #[must_use]
    pub const fn with_ladder(ladder: StepLadder<N>) -> Self {
        Self {
            band_min_hz: BAND_MIN_HZ,
            band_max_hz: BAND_MAX_HZ,
            initial_hz: DEFAULT_FREQUENCY_HZ,
            ladder,
            idle_reset_ms: IDLE_RESET_MS,
            fast_detent_ms: FAST_DETENT_MS,
            fast_streak_len: FAST_STREAK_LEN,
            turbo_window_ms: TURBO_WINDOW_MS,
            multiplier_reference_ms: MULTIPLIER_REFERENCE_MS,
            max_multiplier: MAX_MULTIPLIER,
            velocity_rate: VELOCITY_SMOOTHING_RATE,
            interval_alpha: INTERVAL_EMA_ALPHA,
        }
    }

    /// Set the band limits
    #[must_use]
    pub const fn with_band(mut self, min_hz: u32, max_hz: u32) -> Self {
        self.band_min_hz = min_hz;
        self.band_max_hz = max_hz;
        self
    }

    /// Check the invariants the ladder type cannot enforce on its own
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band_min_hz > self.band_max_hz {
            return Err(ConfigError::BandInverted);
        }

        let timings = [
            (self.idle_reset_ms, "idle_reset_ms"),
            (self.fast_detent_ms, "fast_detent_ms"),
            (u64::from(self.fast_streak_len), "fast_streak_len"),
            (self.turbo_window_ms, "turbo_window_ms"),
            (self.multiplier_reference_ms, "multiplier_reference_ms"),
            (u64::from(self.max_multiplier), "max_multiplier"),
        ];
        if let Some((_, name)) = timings.iter().find(|(value, _)| *value == 0) {
            return Err(ConfigError::ZeroParameter(*name));
        }

        if self.velocity_rate.is_nan() || self.velocity_rate <= 0.0 {
            return Err(ConfigError::ZeroParameter("velocity_rate"));
        }
        if self.interval_alpha.is_nan() || self.interval_alpha <= 0.0 || self.interval_alpha > 1.0 {
            return Err(ConfigError::AlphaOutOfRange);
        }

        Ok(())
    }
}

impl Default for TuningConfig<LADDER_RUNGS> {
    fn default() -> Self {
        Self::with_ladder(DEFAULT_LADDER)
    }
}
