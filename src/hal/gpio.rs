//! GPIO Abstractions
//!
//! EXTI-backed wrappers for the encoder lines and push button. Each wait
//! resolves on a hardware edge interrupt, so the tasks built on these
//! sleep until the knob actually moves.

use embassy_futures::select::select;
use embassy_stm32::exti::ExtiInput;

use crate::types::EncoderSample;

/// The two quadrature lines of the encoder
pub struct EncoderLines<'d> {
    clk: ExtiInput<'d>,
    dt: ExtiInput<'d>,
}

impl<'d> EncoderLines<'d> {
    /// Wrap the CLK (A) and DT (B) inputs
    #[must_use]
    pub fn new(clk: ExtiInput<'d>, dt: ExtiInput<'d>) -> Self {
        Self { clk, dt }
    }

    /// Read both lines
    #[must_use]
    pub fn sample(&self) -> EncoderSample {
        EncoderSample::from_lines(self.clk.is_high(), self.dt.is_high())
    }

    /// Wait for an edge on either line
    pub async fn wait_for_edge(&mut self) {
        select(self.clk.wait_for_any_edge(), self.dt.wait_for_any_edge()).await;
    }
}

/// Encoder push button
pub struct PushButton<'d> {
    pin: ExtiInput<'d>,
    active_low: bool,
}

impl<'d> PushButton<'d> {
    /// Wrap the button input with its active level
    #[must_use]
    pub fn new(pin: ExtiInput<'d>, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Whether the line currently reads pressed
    #[must_use]
    pub fn is_asserted(&self) -> bool {
        self.pin.is_low() == self.active_low
    }

    /// Wait for an edge in either direction
    pub async fn wait_for_edge(&mut self) {
        self.pin.wait_for_any_edge().await;
    }
}
