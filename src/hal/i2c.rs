//! I2C Register Access
//!
//! Register-oriented wrapper over any `embedded-hal-async` I2C bus,
//! bound to a single device address.

use embedded_hal_async::i2c::I2c;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// `Si5351A` clock synthesizer address
    pub const SI5351: Self = Self(crate::config::SI5351_I2C_ADDR);

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{=u8:02X}", self.0);
    }
}

/// Register bus for one device
pub struct RegisterBus<I> {
    i2c: I,
    addr: I2cAddress,
}

impl<I: I2c> RegisterBus<I> {
    /// Largest block written in one transaction
    const MAX_BLOCK: usize = 16;

    /// Bind a bus to a device address
    #[must_use]
    pub const fn new(i2c: I, addr: I2cAddress) -> Self {
        Self { i2c, addr }
    }

    /// Device address
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.addr
    }

    /// Write a single register
    pub async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), I::Error> {
        self.i2c.write(self.addr.addr(), &[reg, value]).await
    }

    /// Read a single register
    pub async fn read_reg(&mut self, reg: u8) -> Result<u8, I::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(self.addr.addr(), &[reg], &mut buf).await?;
        Ok(buf[0])
    }

    /// Write consecutive registers starting at `base`
    ///
    /// Blocks longer than 16 bytes are split into several transactions.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn write_regs(&mut self, base: u8, values: &[u8]) -> Result<(), I::Error> {
        let mut buf = [0u8; Self::MAX_BLOCK + 1];
        let mut reg = base;
        for chunk in values.chunks(Self::MAX_BLOCK) {
            buf[0] = reg;
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.addr.addr(), &buf[..=chunk.len()]).await?;
            // chunk.len() <= 16
            reg = reg.wrapping_add(chunk.len() as u8);
        }
        Ok(())
    }
}
