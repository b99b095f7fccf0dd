//! `Si5351A` Clock Synthesizer Driver
//!
//! Drives CLK0 as the VFO output. PLL A runs at a fixed integer multiple
//! of the crystal; tuning only rewrites the fractional multisynth divider
//! of CLK0, so retuning never resets the PLL and the output does not
//! glitch between detents.

use core::fmt::Debug;

use embedded_hal_async::i2c::I2c;

use crate::hal::i2c::{I2cAddress, RegisterBus};

/// `Si5351A` register addresses
mod reg {
    pub const DEVICE_STATUS: u8 = 0;
    pub const OUTPUT_ENABLE: u8 = 3;
    pub const CLK0_CONTROL: u8 = 16;
    pub const CLK1_CONTROL: u8 = 17;
    pub const CLK2_CONTROL: u8 = 18;
    pub const PLLA_PARAMS: u8 = 26;
    pub const MS0_PARAMS: u8 = 42;
    pub const PLL_RESET: u8 = 177;
    pub const CRYSTAL_LOAD: u8 = 183;
}

/// Target VCO frequency for PLL A
const VCO_TARGET_HZ: u64 = 900_000_000;

/// Largest fractional denominator the multisynth accepts
const FRAC_DENOM: u32 = 1_048_575;

/// Multisynth divider range in fractional mode
const MS_DIVIDER_RANGE: core::ops::RangeInclusive<u64> = 8..=2048;

/// CLK control: powered up, PLL A, multisynth source, 8 mA drive
const CLK_CONTROL_ON: u8 = 0x0F;

/// CLK control: powered down
const CLK_CONTROL_OFF: u8 = 0x80;

/// Crystal load 8 pF, reserved bits as documented
const CRYSTAL_LOAD_8PF: u8 = 0x92;

/// Errors reported by the synthesizer driver
#[derive(Debug)]
pub enum Si5351Error<E> {
    /// Bus transaction failed
    Bus(E),
    /// No divider reaches the requested frequency
    OutOfRange(u32),
}

impl<E: Debug> defmt::Format for Si5351Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(e) => defmt::write!(f, "bus error: {}", defmt::Debug2Format(e)),
            Self::OutOfRange(hz) => defmt::write!(f, "{} Hz out of range", hz),
        }
    }
}

/// `a + b/c` divider, shared by PLL and multisynth register layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Divider {
    a: u32,
    b: u32,
    c: u32,
}

impl Divider {
    const fn integer(a: u32) -> Self {
        Self { a, b: 0, c: 1 }
    }

    /// Divider from `vco_hz` down to `out_hz`
    fn for_output(vco_hz: u64, out_hz: u32) -> Option<Self> {
        if out_hz == 0 {
            return None;
        }
        let out = u64::from(out_hz);
        let a = vco_hz / out;
        if !MS_DIVIDER_RANGE.contains(&a) {
            return None;
        }
        let b = (vco_hz % out) * u64::from(FRAC_DENOM) / out;
        Some(Self {
            a: u32::try_from(a).ok()?,
            b: u32::try_from(b).ok()?,
            c: FRAC_DENOM,
        })
    }

    /// P1/P2/P3 packed into the eight parameter registers
    #[allow(clippy::cast_possible_truncation)]
    fn registers(self) -> [u8; 8] {
        let frac = (128 * self.b) / self.c;
        let p1 = 128 * self.a + frac - 512;
        let p2 = 128 * self.b - self.c * frac;
        let p3 = self.c;

        [
            ((p3 >> 8) & 0xFF) as u8,
            (p3 & 0xFF) as u8,
            ((p1 >> 16) & 0x03) as u8,
            ((p1 >> 8) & 0xFF) as u8,
            (p1 & 0xFF) as u8,
            (((p3 >> 12) & 0xF0) | ((p2 >> 16) & 0x0F)) as u8,
            ((p2 >> 8) & 0xFF) as u8,
            (p2 & 0xFF) as u8,
        ]
    }
}

/// `Si5351A` driver
pub struct Si5351<I> {
    bus: RegisterBus<I>,
    xtal_hz: u32,
    vco_hz: u64,
    clk0_enabled: bool,
}

impl<I: I2c> Si5351<I> {
    /// Create a driver for a chip clocked by `xtal_hz`
    #[must_use]
    pub fn new(i2c: I, xtal_hz: u32) -> Self {
        let mult = VCO_TARGET_HZ / u64::from(xtal_hz.max(1));
        Self {
            bus: RegisterBus::new(i2c, I2cAddress::SI5351),
            xtal_hz,
            vco_hz: mult * u64::from(xtal_hz),
            clk0_enabled: false,
        }
    }

    /// VCO frequency PLL A is locked to
    #[must_use]
    pub const fn vco_hz(&self) -> u64 {
        self.vco_hz
    }

    /// Bring the chip up with every output disabled
    ///
    /// CLK0 is powered and sourced from PLL A but stays gated until the
    /// first [`set_frequency`](Self::set_frequency).
    pub async fn init(&mut self) -> Result<(), Si5351Error<I::Error>> {
        self.wait_ready().await?;

        self.write(reg::OUTPUT_ENABLE, 0xFF).await?;
        self.write(reg::CRYSTAL_LOAD, CRYSTAL_LOAD_8PF).await?;
        for control in [reg::CLK0_CONTROL, reg::CLK1_CONTROL, reg::CLK2_CONTROL] {
            self.write(control, CLK_CONTROL_OFF).await?;
        }

        let mult = u32::try_from(self.vco_hz / u64::from(self.xtal_hz.max(1)))
            .map_err(|_| Si5351Error::OutOfRange(self.xtal_hz))?;
        self.bus
            .write_regs(reg::PLLA_PARAMS, &Divider::integer(mult).registers())
            .await
            .map_err(Si5351Error::Bus)?;
        self.write(reg::PLL_RESET, 0x20).await?;
        self.write(reg::CLK0_CONTROL, CLK_CONTROL_ON).await?;

        self.clk0_enabled = false;
        defmt::debug!("si5351 @ {}: PLL A at {} Hz", self.bus.address(), self.vco_hz);
        Ok(())
    }

    /// Program CLK0 to `hz` and make sure it is the only enabled output
    pub async fn set_frequency(&mut self, hz: u32) -> Result<(), Si5351Error<I::Error>> {
        let divider = Divider::for_output(self.vco_hz, hz).ok_or(Si5351Error::OutOfRange(hz))?;
        self.bus
            .write_regs(reg::MS0_PARAMS, &divider.registers())
            .await
            .map_err(Si5351Error::Bus)?;

        if !self.clk0_enabled {
            // CLK0 on, CLK1/CLK2 off (bit set = disabled)
            self.write(reg::OUTPUT_ENABLE, 0xFE).await?;
            self.clk0_enabled = true;
        }
        Ok(())
    }

    async fn write(&mut self, reg: u8, value: u8) -> Result<(), Si5351Error<I::Error>> {
        self.bus.write_reg(reg, value).await.map_err(Si5351Error::Bus)
    }

    /// Wait for `SYS_INIT` to clear
    async fn wait_ready(&mut self) -> Result<(), Si5351Error<I::Error>> {
        for _ in 0..100 {
            let status = self
                .bus
                .read_reg(reg::DEVICE_STATUS)
                .await
                .map_err(Si5351Error::Bus)?;
            if status & 0x80 == 0 {
                return Ok(());
            }
            embassy_time::Timer::after_millis(1).await;
        }
        defmt::warn!("si5351: SYS_INIT still set, continuing");
        Ok(())
    }
}
