//! Hardware Abstraction Layer
//!
//! Thin wrappers over the STM32G474 peripherals the VFO uses. Keeps
//! embassy types out of the tuning core.

pub mod gpio;
pub mod i2c;
