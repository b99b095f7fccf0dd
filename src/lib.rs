//! VFO Tuning Firmware Library
//!
//! Core of a manually tuned frequency source: a rotary encoder sets the
//! output frequency of an `Si5351A` synthesizer while an OLED shows the
//! tuned frequency and current step.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CONTROL LOOP                             │
//! │      drain detents  │  VFO  │  apply to synth / display      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     TUNING CORE                              │
//! │  Step ladder │ Ballistic controller │ Frequency │ Smoothers  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     INPUT LAYER                              │
//! │  Quadrature decoder  │  Detent counter  │  Switch debouncer  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │       EXTI lines  │  I2C  │  Si5351A  │  SSD1306             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The input and tuning layers are pure and build on the host with the
//! `std` feature; everything touching peripherals sits behind `embedded`.
//!
//! Data flows one way: edge interrupts decode into a lock-free
//! [`input::DetentCounter`], the control loop drains it once per
//! iteration into [`tuning::Vfo`], and the resulting
//! [`tuning::FrequencyState`] is pushed to the synthesizer only when it
//! changed.

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// EXTI-backed encoder lines and a generic I2C register bus.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// Encoder/button event tasks, `Si5351A` output and status display.
#[cfg(feature = "embedded")]
pub mod drivers;

/// Control Loop
///
/// Drains input state and drives the tuning core and drivers.
#[cfg(feature = "embedded")]
pub mod control;

/// Encoder Input
///
/// Quadrature decoding, detent aggregation and push-button debouncing.
pub mod input;

/// Tuning Core
///
/// Ballistic step control, clamped frequency state and speed estimation.
pub mod tuning;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::input::{ButtonLatch, DetentCounter, QuadratureDecoder, SwitchDebouncer};
    pub use crate::tuning::{FrequencyState, Vfo};

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
