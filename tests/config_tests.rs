//! Configuration Tests
//!
//! Tests for tuning configuration defaults and validation
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test config_tests

use vfo_firmware::config::*;
use vfo_firmware::tuning::{RungSpec, StepLadder};

// =============================================================================
// Constant Tests
// =============================================================================

#[test]
fn test_band_constants() {
    assert!(BAND_MIN_HZ < BAND_MAX_HZ);
    assert!((BAND_MIN_HZ..=BAND_MAX_HZ).contains(&DEFAULT_FREQUENCY_HZ));
}

#[test]
fn test_timing_constants() {
    assert_eq!(BUTTON_DEBOUNCE_MS, 50);
    assert_eq!(IDLE_RESET_MS, 150);
    assert_eq!(FAST_DETENT_MS, 70);
    assert_eq!(FAST_STREAK_LEN, 3);
    assert_eq!(TURBO_WINDOW_MS, 250);
    assert!(CONTROL_LOOP_PERIOD_MS < FAST_DETENT_MS);
}

#[test]
fn test_i2c_addresses() {
    assert_eq!(SI5351_I2C_ADDR, 0x60);
    assert_eq!(DISPLAY_I2C_ADDR, 0x3C);
    assert_eq!(SI5351_XTAL_FREQ, 25_000_000);
}

// =============================================================================
// Default Configuration Tests
// =============================================================================

#[test]
fn test_default_config_is_valid() {
    let config = TuningConfig::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.band_min_hz, 7_000_000);
    assert_eq!(config.band_max_hz, 7_200_000);
    assert_eq!(config.ladder, DEFAULT_LADDER);
}

#[test]
fn test_with_band() {
    let config = TuningConfig::default().with_band(14_000_000, 14_350_000);
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.band_min_hz, 14_000_000);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_inverted_band_rejected() {
    let config = TuningConfig::default().with_band(7_200_000, 7_000_000);
    assert_eq!(config.validate(), Err(ConfigError::BandInverted));
}

#[test]
fn test_zero_timings_rejected() {
    let config = TuningConfig {
        idle_reset_ms: 0,
        ..TuningConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroParameter("idle_reset_ms")));

    let config = TuningConfig {
        fast_streak_len: 0,
        ..TuningConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroParameter("fast_streak_len")));

    let config = TuningConfig {
        max_multiplier: 0,
        ..TuningConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroParameter("max_multiplier")));
}

#[test]
fn test_smoothing_parameters_rejected() {
    let config = TuningConfig {
        velocity_rate: f32::NAN,
        ..TuningConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroParameter("velocity_rate")));

    for alpha in [0.0, -0.5, 1.5, f32::NAN] {
        let config = TuningConfig {
            interval_alpha: alpha,
            ..TuningConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::AlphaOutOfRange), "alpha {alpha}");
    }

    let config = TuningConfig {
        interval_alpha: 1.0,
        ..TuningConfig::default()
    };
    assert_eq!(config.validate(), Ok(()));
}

// =============================================================================
// Ladder Validation Tests
// =============================================================================

#[test]
fn test_ladder_steps_must_increase() {
    let result = StepLadder::new([
        RungSpec::base(10),
        RungSpec::new(100, 100, 150),
        RungSpec::new(100, 50, 80),
    ]);
    assert_eq!(result, Err(ConfigError::StepsNotIncreasing { rung: 2 }));
}

#[test]
fn test_ladder_hysteresis_must_be_ordered() {
    let result = StepLadder::new([RungSpec::base(1), RungSpec::new(10, 150, 100)]);
    assert_eq!(result, Err(ConfigError::HysteresisInverted { rung: 1 }));
}

#[test]
fn test_ladder_thresholds_must_decrease() {
    let result = StepLadder::new([
        RungSpec::base(1),
        RungSpec::new(10, 100, 150),
        RungSpec::new(100, 100, 140),
    ]);
    assert_eq!(result, Err(ConfigError::ThresholdsNotDecreasing { rung: 2 }));

    let result = StepLadder::new([
        RungSpec::base(1),
        RungSpec::new(10, 100, 150),
        RungSpec::new(100, 80, 150),
    ]);
    assert_eq!(result, Err(ConfigError::ThresholdsNotDecreasing { rung: 2 }));
}

#[test]
fn test_config_error_messages() {
    assert_eq!(ConfigError::EmptyLadder.to_string(), "step ladder is empty");
    assert_eq!(
        ConfigError::ZeroParameter("turbo_window_ms").to_string(),
        "turbo_window_ms must be non-zero"
    );
    assert_eq!(
        ConfigError::HysteresisInverted { rung: 3 }.to_string(),
        "promote threshold of rung 3 is not below its demote threshold"
    );
}
