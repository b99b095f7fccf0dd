//! Ballistic Step Controller Tests
//!
//! Tests for rung hysteresis, turbo momentum, idle reset and the speed
//! multiplier
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test ballistic_tests

use vfo_firmware::config::{TuningConfig, BAND_MAX_HZ, BAND_MIN_HZ, DEFAULT_LADDER};
use vfo_firmware::tuning::{BallisticStepController, FrequencyState, Rung, RungSpec, StepLadder};
use vfo_firmware::types::Millis;

fn setup() -> (BallisticStepController, FrequencyState) {
    (
        BallisticStepController::default(),
        FrequencyState::new(BAND_MIN_HZ, BAND_MIN_HZ, BAND_MAX_HZ),
    )
}

fn rung(index: usize) -> Rung {
    DEFAULT_LADDER.rung(index).unwrap()
}

/// Feed one detent at each timestamp
fn spin(ctl: &mut BallisticStepController, freq: &mut FrequencyState, times: &[Millis]) {
    for &t in times {
        ctl.tick(1, t, freq).unwrap();
    }
}

// =============================================================================
// Ladder Tests
// =============================================================================

#[test]
fn test_default_ladder_steps() {
    let steps: Vec<u32> = DEFAULT_LADDER.steps().collect();
    assert_eq!(steps, vec![1, 10, 100, 1_000, 5_000, 20_000]);
    assert_eq!(DEFAULT_LADDER.len(), 6);
    assert_eq!(DEFAULT_LADDER.top(), rung(5));
}

#[test]
fn test_ladder_neighbours() {
    assert_eq!(DEFAULT_LADDER.below(Rung::BASE), None);
    assert_eq!(DEFAULT_LADDER.above(Rung::BASE), Some(rung(1)));
    assert_eq!(DEFAULT_LADDER.above(rung(5)), None);
    assert_eq!(DEFAULT_LADDER.rung(6), None);
}

#[test]
fn test_custom_ladder_controller() {
    let ladder = StepLadder::new([
        RungSpec::base(5),
        RungSpec::new(50, 100, 150),
        RungSpec::new(500, 50, 80),
    ])
    .unwrap();
    let mut ctl = BallisticStepController::new(&TuningConfig::with_ladder(ladder));
    let mut freq = FrequencyState::new(7_100_000, BAND_MIN_HZ, BAND_MAX_HZ);

    ctl.tick(1, 0, &mut freq);
    let out = ctl.tick(1, 40, &mut freq).unwrap();
    assert_eq!(out.rung.index(), 2);
    assert_eq!(out.step_hz, 500);
}

// =============================================================================
// Rung Hysteresis Tests
// =============================================================================

#[test]
fn test_first_detent_stays_on_base() {
    let (mut ctl, mut freq) = setup();
    let out = ctl.tick(1, 5_000, &mut freq).unwrap();
    assert_eq!(out.rung, Rung::BASE);
    assert_eq!(out.step_hz, 1);
    assert_eq!(out.multiplier, 1);
    assert_eq!(freq.hz(), BAND_MIN_HZ + 1);
}

#[test]
fn test_one_rung_per_threshold_crossed() {
    let (mut ctl, mut freq) = setup();
    ctl.tick(1, 0, &mut freq);

    // Intervals 130, 120, 90, 60, 40, 25: each lands on the next promote threshold
    let mut t = 0;
    let mut expected = 0;
    for interval in [130, 120, 90, 60, 40, 25] {
        t += interval;
        let out = ctl.tick(1, t, &mut freq).unwrap();
        assert_eq!(out.interval_ms, interval);
        if interval <= 120 {
            expected += 1;
        }
        assert_eq!(out.rung.index(), expected, "interval {interval}");
    }
    assert_eq!(ctl.rung(), DEFAULT_LADDER.top());
}

#[test]
fn test_fast_interval_climbs_several_rungs_at_once() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50]);
    // 50 ms clears the 120, 90 and 60 ms thresholds but not 40 ms
    assert_eq!(ctl.rung(), rung(3));
}

#[test]
fn test_hysteresis_band_holds_rung() {
    // 75 ms sits between promote(3) = 60 and demote(3) = 90
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50]);
    assert_eq!(ctl.rung(), rung(3));
    spin(&mut ctl, &mut freq, &[125, 200, 275, 350]);
    assert_eq!(ctl.rung(), rung(3));

    // Same interval from below does not promote
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 90]);
    assert_eq!(ctl.rung(), rung(2));
    spin(&mut ctl, &mut freq, &[165, 240, 315]);
    assert_eq!(ctl.rung(), rung(2));
}

#[test]
fn test_slow_interval_demotes_in_one_tick() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 25]);
    assert_eq!(ctl.rung(), rung(5));

    // 100 ms is past demote(5..=3) = 40, 60, 90 but below demote(2) = 120
    ctl.tick(1, 125, &mut freq);
    assert_eq!(ctl.rung(), rung(2));

    ctl.tick(1, 325, &mut freq);
    assert_eq!(ctl.rung(), Rung::BASE);
}

#[test]
fn test_rung_stays_in_bounds() {
    let (mut ctl, mut freq) = setup();
    let mut t: Millis = 0;
    let mut seed: u32 = 0x1234_5678;

    for _ in 0..5_000 {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        t += Millis::from(seed >> 24);
        let net = (seed % 5) as i32 - 2;
        ctl.tick(net, t, &mut freq);
        assert!(ctl.rung().index() < DEFAULT_LADDER.len());
        assert!(freq.hz() >= BAND_MIN_HZ && freq.hz() <= BAND_MAX_HZ);
    }
}

// =============================================================================
// Turbo Tests
// =============================================================================

#[test]
fn test_three_fast_detents_arm_turbo() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50, 100]);
    assert_eq!(ctl.turbo_until(), None);
    assert_eq!(ctl.fast_streak(), 2);

    let out = ctl.tick(1, 150, &mut freq).unwrap();
    assert_eq!(ctl.turbo_until(), Some(400));
    assert_eq!(ctl.fast_streak(), 0);

    // Boosted one rung without persisting the promotion
    assert!(out.turbo);
    assert_eq!(out.rung, rung(3));
    assert_eq!(out.step_hz, 5_000);
    assert_eq!(out.multiplier, 3);
    assert_eq!(out.delta_hz, 15_000);
    assert_eq!(freq.hz(), BAND_MIN_HZ + 1 + 3_000 + 3_000 + 15_000);
}

#[test]
fn test_slow_detent_breaks_streak() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50, 100]);
    assert_eq!(ctl.fast_streak(), 2);

    // 70 ms is not fast
    ctl.tick(1, 170, &mut freq);
    assert_eq!(ctl.fast_streak(), 0);

    spin(&mut ctl, &mut freq, &[220]);
    assert_eq!(ctl.turbo_until(), None);
    assert_eq!(ctl.fast_streak(), 1);
}

#[test]
fn test_turbo_expires() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50, 100, 150]);

    assert!(ctl.turbo_active(399));
    assert_eq!(ctl.effective_step_hz(399), 5_000);
    assert!(!ctl.turbo_active(400));
    assert_eq!(ctl.effective_step_hz(400), 1_000);
}

#[test]
fn test_turbo_expiry_only_moves_forward() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50, 100, 150]);
    assert_eq!(ctl.turbo_until(), Some(400));

    spin(&mut ctl, &mut freq, &[200, 250, 300]);
    assert_eq!(ctl.turbo_until(), Some(550));
}

#[test]
fn test_turbo_on_top_rung_keeps_top_step() {
    let (mut ctl, mut freq) = setup();
    freq.set(7_100_000);
    spin(&mut ctl, &mut freq, &[0, 20, 40]);
    let out = ctl.tick(1, 60, &mut freq).unwrap();

    assert!(ctl.turbo_active(60));
    assert_eq!(out.rung, DEFAULT_LADDER.top());
    assert!(!out.turbo);
    assert_eq!(out.step_hz, 20_000);
}

// =============================================================================
// Idle Reset Tests
// =============================================================================

#[test]
fn test_idle_resets_rung() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50]);
    assert_eq!(ctl.rung(), rung(3));

    assert!(ctl.tick(0, 199, &mut freq).is_none());
    assert_eq!(ctl.rung(), rung(3));

    assert!(ctl.tick(0, 200, &mut freq).is_none());
    assert_eq!(ctl.rung(), Rung::BASE);
}

#[test]
fn test_idle_tick_changes_nothing_else() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50, 100]);
    let hz = freq.hz();

    ctl.tick(0, 1_000, &mut freq);
    assert_eq!(freq.hz(), hz);
    assert_eq!(ctl.fast_streak(), 2);
    assert_eq!(ctl.last_detent(), Some(100));
}

#[test]
fn test_idle_before_any_detent_is_noop() {
    let (mut ctl, mut freq) = setup();
    assert!(ctl.tick(0, 10_000, &mut freq).is_none());
    assert_eq!(ctl.rung(), Rung::BASE);
    assert_eq!(ctl.last_detent(), None);
}

#[test]
fn test_reset_forgets_history() {
    let (mut ctl, mut freq) = setup();
    spin(&mut ctl, &mut freq, &[0, 50, 100, 150]);
    ctl.reset();

    assert_eq!(ctl.rung(), Rung::BASE);
    assert_eq!(ctl.turbo_until(), None);
    assert_eq!(ctl.fast_streak(), 0);
    assert_eq!(ctl.last_detent(), None);
}

// =============================================================================
// Multiplier / Apply Tests
// =============================================================================

#[test]
fn test_multiplier_grows_with_speed() {
    let ctl = BallisticStepController::default();
    let mut last = 0;
    for interval in [300, 150, 100, 60, 40, 30, 20, 10] {
        let m = ctl.multiplier(interval);
        assert!((1..=8).contains(&m));
        assert!(m >= last, "multiplier fell at {interval} ms");
        last = m;
    }
    assert_eq!(ctl.multiplier(10), 8);
}

#[test]
fn test_zero_multiplier_ceiling_floors_at_one() {
    let config = TuningConfig {
        max_multiplier: 0,
        ..TuningConfig::default()
    };
    let mut ctl = BallisticStepController::new(&config);
    let mut freq = FrequencyState::new(BAND_MIN_HZ, BAND_MIN_HZ, BAND_MAX_HZ);

    assert_eq!(ctl.multiplier(10), 1);
    ctl.tick(1, 0, &mut freq).unwrap();
    let out = ctl.tick(1, 20, &mut freq).unwrap();
    assert_eq!(out.multiplier, 1);
}

#[test]
fn test_direction_sets_sign() {
    let (mut ctl, mut freq) = setup();
    freq.set(7_100_000);
    ctl.tick(1, 0, &mut freq);
    let out = ctl.tick(-1, 1_000, &mut freq).unwrap();
    assert_eq!(out.delta_hz, -1);
    assert_eq!(freq.hz(), 7_100_000);
}

#[test]
fn test_aggregated_detents_use_sign_only() {
    let (mut a, mut fa) = setup();
    let (mut b, mut fb) = setup();

    let one = a.tick(1, 0, &mut fa).unwrap();
    let many = b.tick(5, 0, &mut fb).unwrap();
    assert_eq!(one.delta_hz, many.delta_hz);
    assert_eq!(fa.hz(), fb.hz());
}

#[test]
fn test_clamp_reports_no_change() {
    let (mut ctl, mut freq) = setup();
    let out = ctl.tick(-1, 0, &mut freq).unwrap();
    assert_eq!(freq.hz(), BAND_MIN_HZ);
    assert!(!out.changed);
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_burst_then_pause() {
    const LOOP_MS: Millis = 5;

    let (mut ctl, mut freq) = setup();
    let mut max_rung = 0;
    let mut last_hz = freq.hz();

    // One detent every 50 ms for one second, polled every 5 ms
    let mut t = 0;
    while t <= 1_000 {
        let net = i32::from(t % 50 == 0);
        ctl.tick(net, t, &mut freq);

        max_rung = max_rung.max(ctl.rung().index());
        assert!(freq.hz() >= last_hz);
        assert!(freq.hz() <= BAND_MAX_HZ);
        last_hz = freq.hz();
        t += LOOP_MS;
    }
    assert!(max_rung >= 3);
    assert!(freq.hz() > BAND_MIN_HZ);
    assert_eq!(freq.hz(), BAND_MAX_HZ);

    // 200 ms pause with the loop still polling
    while t < 1_200 {
        ctl.tick(0, t, &mut freq);
        t += LOOP_MS;
    }
    assert_eq!(ctl.rung(), Rung::BASE);

    // Movement resumes on the base rung
    let out = ctl.tick(-1, 1_200, &mut freq).unwrap();
    assert_eq!(out.interval_ms, 200);
    assert_eq!(out.rung, Rung::BASE);
    assert_eq!(freq.hz(), BAND_MAX_HZ - 1);
}
