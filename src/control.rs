//! Control loop
//!
//! Single consumer of the input state. Each iteration drains the detent
//! counter and press flag exactly once, feeds them to the [`Vfo`], pushes a
//! changed frequency to the synthesizer and redraws the status display.
//! Between iterations it sleeps until an input task signals activity or
//! the loop period elapses, whichever comes first; the timeout is what
//! lets idle resets and turbo expiry show up without any input.

use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};
use embedded_hal::i2c::I2c as BlockingI2c;
use embedded_hal_async::i2c::I2c;

use crate::config::CONTROL_LOOP_PERIOD_MS;
use crate::drivers::{Si5351, StatusDisplay};
use crate::input::{ButtonLatch, DetentCounter};
use crate::tuning::Vfo;

/// Wake-up from the input tasks
pub type Activity = Signal<CriticalSectionRawMutex, ()>;

/// State written by the input tasks and drained by the control loop
pub struct SharedInput {
    /// Net detents since the last drain
    pub detents: DetentCounter,
    /// Debounced push button
    pub button: ButtonLatch,
    /// Signalled on every detent and press
    pub activity: Activity,
}

impl SharedInput {
    /// Create empty shared state, usable in a `static`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            detents: DetentCounter::new(),
            button: ButtonLatch::new(),
            activity: Signal::new(),
        }
    }
}

impl Default for SharedInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the control loop forever
pub async fn run<const N: usize, I, D>(
    vfo: &mut Vfo<N>,
    input: &SharedInput,
    synth: &mut Si5351<I>,
    display: &mut StatusDisplay<D>,
) -> !
where
    I: I2c,
    D: BlockingI2c,
{
    // Startup: program the initial frequency and draw once
    vfo.request_apply();
    let mut redraw = true;

    loop {
        let now = Instant::now().as_millis();
        let net = input.detents.take();
        let pressed = input.button.take_press();

        let update = vfo.poll(net, pressed, now);

        if let Some(step) = update.step {
            defmt::trace!("control: {}", step);
        }
        if update.mode_changed {
            defmt::info!("control: tuning mode {}", vfo.mode());
        }
        if update.rung_changed {
            defmt::debug!("control: rung {} step {} Hz", vfo.rung(), vfo.step_hz(now));
        }

        if let Some(hz) = vfo.take_pending_hz() {
            match synth.set_frequency(hz).await {
                Ok(()) => defmt::info!("control: tuned {} Hz", hz),
                Err(e) => {
                    defmt::warn!("control: synth update failed: {}", e);
                    vfo.request_apply();
                }
            }
        }

        redraw |= update.needs_redraw();
        if redraw {
            match display.render(&vfo.status(now)) {
                Ok(()) => redraw = false,
                Err(e) => defmt::warn!("control: {}", e),
            }
        }

        select(input.activity.wait(), Timer::after_millis(CONTROL_LOOP_PERIOD_MS)).await;
    }
}
