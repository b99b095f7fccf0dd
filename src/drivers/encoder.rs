//! Rotary Encoder Driver
//!
//! Edge-driven tasks that feed the shared input state. The encoder task
//! decodes every line edge straight into the [`DetentCounter`]; the button
//! task runs the settle timer and latches presses. Both only touch atomics
//! and wake the control loop, they never call into the tuning core.

use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};

use crate::control::Activity;
use crate::hal::gpio::{EncoderLines, PushButton};
use crate::input::{ButtonEdge, ButtonLatch, DetentCounter, QuadratureDecoder, SwitchDebouncer};
use crate::types::Millis;

/// Decode encoder edges forever
pub async fn run_encoder(
    mut lines: EncoderLines<'_>,
    detents: &DetentCounter,
    activity: &Activity,
) -> ! {
    let mut decoder = QuadratureDecoder::new(lines.sample());
    defmt::debug!("encoder: idle at {}", decoder.last());

    loop {
        lines.wait_for_edge().await;
        if let Some(direction) = decoder.update(lines.sample()) {
            detents.record(direction);
            activity.signal(());
            defmt::trace!("encoder: {}", direction);
        }
    }
}

/// Debounce the push button forever
pub async fn run_button(
    mut button: PushButton<'_>,
    debounce_ms: Millis,
    latch: &ButtonLatch,
    activity: &Activity,
) -> ! {
    let mut debouncer = SwitchDebouncer::new(debounce_ms);

    loop {
        match debouncer.deadline() {
            None => {
                button.wait_for_edge().await;
                debouncer.on_edge(Instant::now().as_millis());
            }
            Some(due) => match select(Timer::at(Instant::from_millis(due)), button.wait_for_edge()).await {
                Either::First(()) => {
                    let edge = debouncer.poll(Instant::now().as_millis(), button.is_asserted(), latch);
                    if edge == Some(ButtonEdge::Pressed) {
                        defmt::info!("button: pressed");
                        activity.signal(());
                    } else if let Some(edge) = edge {
                        defmt::trace!("button: {}", edge);
                    }
                }
                Either::Second(()) => debouncer.on_edge(Instant::now().as_millis()),
            },
        }
    }
}
