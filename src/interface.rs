//! SPI transport for the RA8875.
//!
//! Every access is one SPI transaction opened by a cycle selector byte. The `SpiDevice`
//! asserts chip select for the whole transaction. No interrupt masking happens here, so
//! the bus must not be touched from interrupt context while a driver call is running.
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Operation, SpiDevice};

use crate::cmd::Cmd;

/// Time the controller needs between a read selector and the first data byte.
const READ_SETTLE_NS: u32 = 50_000;

/// Pixels sent per data-write transaction during bulk memory writes.
const PIXEL_CHUNK: usize = 32;

/// Bus clock levels the driver asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusSpeed {
    /// Initialization speed, used until the PLL runs at full rate.
    Slow,
    /// Register and status reads.
    Read,
    /// Register writes and bulk pixel data.
    Write,
}

/// Retunes the SPI clock when the driver switches between [`BusSpeed`] levels.
///
/// `SpiDevice` has no notion of clock rate, so platforms that can change it at run time
/// implement this on a handle to their bus configuration.
pub trait SpeedControl {
    /// Switch the bus clock to `speed`.
    fn set_speed(&mut self, speed: BusSpeed);
}

/// [`SpeedControl`] for buses clocked slowly enough for reads at all times.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSpeed;

impl SpeedControl for FixedSpeed {
    fn set_speed(&mut self, _speed: BusSpeed) {}
}

/// The connection to the controller.
pub(crate) struct SpiInterface<SPI, RST, DELAY, CLK> {
    spi: SPI,
    rst: RST,
    delay: DELAY,
    clock: CLK,
    speed: BusSpeed,
}

impl<SPI, RST, DELAY, CLK> SpiInterface<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    pub(crate) fn new(spi: SPI, rst: RST, delay: DELAY, clock: CLK) -> Self {
        Self {
            spi,
            rst,
            delay,
            clock,
            speed: BusSpeed::Slow,
        }
    }

    pub(crate) fn release(self) -> (SPI, RST, DELAY, CLK) {
        (self.spi, self.rst, self.delay, self.clock)
    }

    pub(crate) fn set_speed(&mut self, speed: BusSpeed) {
        self.speed = speed;
        self.clock.set_speed(speed);
    }

    /// Pulse the reset line with the timing the controller needs to come up cleanly.
    pub(crate) fn hard_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(10);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(220);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(300);
        Ok(())
    }

    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    pub(crate) fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Select the register the next data cycles go to.
    pub(crate) fn cmd(&mut self, reg: u8) -> Result<(), DisplayError> {
        self.write(&[Cmd::CMD_WRITE, reg])
    }

    /// Write one byte to the selected register.
    pub(crate) fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.write(&[Cmd::DATA_WRITE, value])
    }

    /// Write a big-endian word to the selected register (memory writes at 16bpp).
    pub(crate) fn data16(&mut self, value: u16) -> Result<(), DisplayError> {
        let [hi, lo] = value.to_be_bytes();
        self.write(&[Cmd::DATA_WRITE, hi, lo])
    }

    /// Write one data byte at `speed`, then return to the previous bus speed.
    pub(crate) fn data_at(&mut self, speed: BusSpeed, value: u8) -> Result<(), DisplayError> {
        let previous = self.speed;
        self.set_speed(speed);
        let result = self.data(value);
        self.set_speed(previous);
        result
    }

    pub(crate) fn write_register(&mut self, reg: u8, value: u8) -> Result<(), DisplayError> {
        self.cmd(reg)?;
        self.data(value)
    }

    /// Write a 16-bit value to a low/high register pair.
    pub(crate) fn write_register16(&mut self, reg: u8, value: u16) -> Result<(), DisplayError> {
        let [lo, hi] = value.to_le_bytes();
        self.write_register(reg, lo)?;
        self.write_register(reg + 1, hi)
    }

    pub(crate) fn read_register(&mut self, reg: u8) -> Result<u8, DisplayError> {
        self.cmd(reg)?;
        self.read_data()
    }

    pub(crate) fn read_data(&mut self) -> Result<u8, DisplayError> {
        let mut byte = [0u8];
        self.read(Cmd::DATA_READ, &mut byte)?;
        Ok(byte[0])
    }

    pub(crate) fn read_status(&mut self) -> Result<u8, DisplayError> {
        let mut byte = [0u8];
        self.read(Cmd::CMD_READ, &mut byte)?;
        Ok(byte[0])
    }

    /// Read `buf.len()` bytes of display memory. The controller shifts out dummy bytes
    /// first, which the caller discards.
    pub(crate) fn read_memory(&mut self, buf: &mut [u8]) -> Result<(), DisplayError> {
        self.read(Cmd::DATA_READ, buf)
    }

    fn read(&mut self, selector: u8, buf: &mut [u8]) -> Result<(), DisplayError> {
        let previous = self.speed;
        self.set_speed(BusSpeed::Read);
        let result = self.spi.transaction(&mut [
            Operation::Write(&[selector]),
            Operation::DelayNs(READ_SETTLE_NS),
            Operation::Read(buf),
        ]);
        self.set_speed(previous);
        result.map_err(|_| DisplayError::BusWriteError)
    }

    /// Stream pixels into display memory; `MRWC` must already be selected.
    ///
    /// At 16bpp each pixel is a big-endian word, at 8bpp a single byte.
    pub(crate) fn write_pixels<I>(&mut self, pixels: I, wide: bool) -> Result<(), DisplayError>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut buf = [0u8; 1 + PIXEL_CHUNK * 2];
        buf[0] = Cmd::DATA_WRITE;
        let mut len = 1;
        for pixel in pixels {
            if wide {
                let [hi, lo] = pixel.to_be_bytes();
                buf[len] = hi;
                buf[len + 1] = lo;
                len += 2;
            } else {
                buf[len] = pixel as u8;
                len += 1;
            }
            if len + 2 > buf.len() {
                self.write(&buf[..len])?;
                len = 1;
            }
        }
        if len > 1 {
            self.write(&buf[..len])?;
        }
        Ok(())
    }
}
