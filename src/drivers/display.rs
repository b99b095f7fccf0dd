//! OLED Status Display
//!
//! Renders a [`StatusLine`] on a 128x64 SSD1306 over its own blocking I2C
//! bus. Layout:
//!
//! ```text
//! 40 Meter                 band label
//!
//! 7.074.000          MHz   large readout, digit cursor underlined
//!
//! Step 1kHz >>             step / cursor detail
//! ```

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::config::DISPLAY_I2C_ADDR;
use crate::tuning::StatusLine;

/// Readout glyph width in pixels
const READOUT_CHAR_WIDTH: i32 = 10;

/// Top of the readout row
const READOUT_Y: i32 = 20;

/// Readout glyph height in pixels
const READOUT_HEIGHT: i32 = 20;

/// Display transfer failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayFault;

impl defmt::Format for DisplayFault {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "display transfer failed");
    }
}

type Panel<I> = Ssd1306<I2CInterface<I>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// SSD1306 status display
pub struct StatusDisplay<I> {
    panel: Panel<I>,
}

impl<I: I2c> StatusDisplay<I> {
    /// Wrap the display bus
    #[must_use]
    pub fn new(i2c: I) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDR);
        let panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self { panel }
    }

    /// Initialize the controller and blank the screen
    pub fn init(&mut self) -> Result<(), DisplayFault> {
        self.panel.init().map_err(|_| DisplayFault)?;
        DrawTarget::clear(&mut self.panel, BinaryColor::Off).map_err(|_| DisplayFault)?;
        self.panel.flush().map_err(|_| DisplayFault)
    }

    /// Draw the status line and push it to the panel
    pub fn render(&mut self, status: &StatusLine) -> Result<(), DisplayFault> {
        self.draw(status).map_err(|_| DisplayFault)?;
        self.panel.flush().map_err(|_| DisplayFault)
    }

    fn draw(&mut self, status: &StatusLine) -> Result<(), <Panel<I> as DrawTarget>::Error> {
        let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

        DrawTarget::clear(&mut self.panel, BinaryColor::Off)?;

        Text::with_baseline(status.band, Point::new(0, 0), small, Baseline::Top)
            .draw(&mut self.panel)?;

        Text::with_baseline(&status.frequency, Point::new(0, READOUT_Y), large, Baseline::Top)
            .draw(&mut self.panel)?;
        Text::with_baseline("MHz", Point::new(108, READOUT_Y + 8), small, Baseline::Top)
            .draw(&mut self.panel)?;

        if let Some(column) = status.cursor.and_then(|c| i32::try_from(c).ok()) {
            Rectangle::new(
                Point::new(column * READOUT_CHAR_WIDTH, READOUT_Y + READOUT_HEIGHT),
                Size::new(READOUT_CHAR_WIDTH.unsigned_abs() - 1, 2),
            )
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.panel)?;
        }

        Text::with_baseline(&status.detail, Point::new(0, 54), small, Baseline::Top)
            .draw(&mut self.panel)?;

        Ok(())
    }
}
