//! Peripheral Drivers
//!
//! Encoder and button tasks, the `Si5351A` synthesizer and the SSD1306
//! status display.

pub mod display;
pub mod encoder;
pub mod si5351;

pub use display::{DisplayFault, StatusDisplay};
pub use si5351::{Si5351, Si5351Error};
