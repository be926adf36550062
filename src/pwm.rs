//! The two PWM outputs. Channel 1 drives the backlight on the supported modules.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::driver::{DisplayError, Ra8875};
use crate::flag::Flag;
use crate::interface::SpeedControl;

/// System clock divider feeding a PWM channel, `Div1` to `Div32768` in powers of two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PwmClock {
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
    Div512,
    Div1024,
    Div2048,
    Div4096,
    Div8192,
    Div16384,
    Div32768,
}

impl PwmClock {
    const fn bits(self) -> u8 {
        self as u8 & Flag::PWM_CLOCK_MASK
    }
}

/// A PWM output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PwmChannel {
    /// `PWM1`, wired to the backlight.
    One,
    /// `PWM2`.
    Two,
}

impl PwmChannel {
    const fn registers(self) -> (u8, u8) {
        match self {
            PwmChannel::One => (Cmd::P1CR, Cmd::P1DCR),
            PwmChannel::Two => (Cmd::P2CR, Cmd::P2DCR),
        }
    }
}

impl From<u8> for PwmChannel {
    /// `2` and above select channel two, anything lower channel one.
    fn from(value: u8) -> Self {
        if value > 1 {
            PwmChannel::Two
        } else {
            PwmChannel::One
        }
    }
}

impl<SPI, RST, DELAY, CLK> Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    /// Enable or disable a channel and pick its clock.
    pub fn pwm_setup(&mut self, channel: PwmChannel, on: bool, clock: PwmClock) -> Result<(), DisplayError> {
        let (control, _) = channel.registers();
        let enable = if on { Flag::PWM_ENABLE } else { 0 };
        self.interface.write_register(control, enable | clock.bits())
    }

    /// Set the duty cycle of a channel, 0 to 255.
    pub fn pwm_out(&mut self, channel: PwmChannel, duty: u8) -> Result<(), DisplayError> {
        let (_, duty_reg) = channel.registers();
        self.interface.write_register(duty_reg, duty)
    }

    /// Backlight level on channel 1. Kept for the next [`Ra8875::backlight`] call.
    pub fn brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.brightness = level;
        self.pwm_out(PwmChannel::One, level)
    }

    /// Switch the backlight. Turning it on restores the last brightness.
    pub fn backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.pwm_setup(PwmChannel::One, on, PwmClock::Div1024)?;
        if on {
            self.pwm_out(PwmChannel::One, self.brightness)?;
        }
        Ok(())
    }
}
