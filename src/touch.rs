//! Resistive touch through the controller's ADC.
//!
//! Samples are taken in manual mode: latch an axis, let it settle, idle the panel and
//! read the 10-bit result spread over `TPXH`/`TPYH` and `TPXYL`.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::driver::{DisplayError, Ra8875};
use crate::flag::Flag;
use crate::geometry::Rotation;
use crate::interface::SpeedControl;

use log::debug;

/// Samples per axis; only the middle ones are averaged.
const SAMPLES: usize = 13;
/// Samples dropped at each end before averaging.
const TRIM: usize = SAMPLES / 2 - 3;
const DEBOUNCE_MS: u32 = 50;
/// Upper end of [`Ra8875::touch_read_adc`].
pub const ADC_SCALE: u16 = 1024;

/// Raw ADC readings at the panel edges, unrotated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchCalibration {
    /// Reading at the left edge.
    pub x_low: u16,
    /// Reading at the right edge.
    pub x_high: u16,
    /// Reading at the top edge.
    pub y_low: u16,
    /// Reading at the bottom edge.
    pub y_high: u16,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        TouchCalibration {
            x_low: 40,
            x_high: 980,
            y_low: 60,
            y_high: 940,
        }
    }
}

/// Calibration plus how it maps onto the current rotation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TouchState {
    calibration: TouchCalibration,
    flip_x: bool,
    flip_y: bool,
    swap: bool,
    debounce_ms: u32,
    /// Last pressed position in logical pixels.
    pub last: (u16, u16),
}

impl TouchState {
    pub fn new(calibration: TouchCalibration) -> Self {
        let mut state = TouchState {
            calibration,
            flip_x: false,
            flip_y: false,
            swap: false,
            debounce_ms: DEBOUNCE_MS,
            last: (0, 0),
        };
        state.orient(Rotation::Rotate0);
        state
    }

    /// Follow the scan reversal of `rotation`. Portrait also trades the axes.
    pub fn orient(&mut self, rotation: Rotation) {
        (self.flip_x, self.flip_y) = rotation.scan_reversed();
        self.swap = rotation.is_portrait();
    }

    pub fn set_calibration(&mut self, calibration: TouchCalibration) {
        self.calibration = calibration;
    }

    /// Raw bounds per raw axis, low end first.
    fn bounds(&self) -> ((u16, u16), (u16, u16)) {
        let cal = self.calibration;
        let x = if self.flip_x {
            (cal.x_high, cal.x_low)
        } else {
            (cal.x_low, cal.x_high)
        };
        let y = if self.flip_y {
            (cal.y_high, cal.y_low)
        } else {
            (cal.y_low, cal.y_high)
        };
        (x, y)
    }

    /// Scale a raw reading to `0..=x_max` / `0..=y_max` on the logical axes.
    pub fn map(&self, raw: (u16, u16), x_max: u16, y_max: u16) -> (u16, u16) {
        let ((x0, x1), (y0, y1)) = self.bounds();
        let (span_x, span_y) = if self.swap {
            (y_max, x_max)
        } else {
            (x_max, y_max)
        };
        let along_x = map_range(raw.0, x0, x1, 0, i32::from(span_x));
        let along_y = map_range(raw.1, y0, y1, 0, i32::from(span_y));
        let (x, y) = if self.swap {
            (along_y, along_x)
        } else {
            (along_x, along_y)
        };
        (
            x.clamp(0, i32::from(x_max)) as u16,
            y.clamp(0, i32::from(y_max)) as u16,
        )
    }
}

/// Linear rescale of `value` from `in_low..in_high` onto `out_low..out_high`.
/// Either range may run backwards.
pub(crate) fn map_range(value: u16, in_low: u16, in_high: u16, out_low: i32, out_high: i32) -> i32 {
    let span = i32::from(in_high) - i32::from(in_low);
    if span == 0 {
        return out_low;
    }
    (i32::from(value) - i32::from(in_low)) * (out_high - out_low) / span + out_low
}

/// Mean of the middle readings once the extremes are sorted away.
pub(crate) fn trimmed_mean(mut samples: [u16; SAMPLES]) -> u16 {
    samples.sort_unstable();
    let kept = &samples[TRIM..SAMPLES - TRIM];
    (kept.iter().map(|&s| u32::from(s)).sum::<u32>() / kept.len() as u32) as u16
}

impl<SPI, RST, DELAY, CLK> Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    /// Enable the touch ADC and wait for a touch in manual mode.
    pub fn touch_begin(&mut self) -> Result<(), DisplayError> {
        debug!("touch enabled");
        self.interface.write_register(Cmd::TPCR0, Flag::TOUCH_ENABLE)?;
        self.interface.write_register(Cmd::TPCR1, Flag::TOUCH_WAIT)
    }

    /// Replace the calibration. The current rotation still applies.
    pub fn set_touch_calibration(&mut self, calibration: TouchCalibration) {
        self.touch.set_calibration(calibration);
    }

    /// Route touch events to the interrupt line.
    pub fn touch_interrupt(&mut self, on: bool) -> Result<(), DisplayError> {
        if on {
            self.regs.intc1 |= Flag::INT_TOUCH;
        } else {
            self.regs.intc1 &= !Flag::INT_TOUCH;
        }
        self.interface.write_register(Cmd::INTC1, self.regs.intc1)
    }

    /// Whether a touch interrupt is latched. A latched interrupt is cleared.
    pub fn touch_interrupt_pending(&mut self) -> Result<bool, DisplayError> {
        let pending = self.interface.read_register(Cmd::INTC2)? & Flag::INT_TOUCH != 0;
        if pending {
            self.interface.write_register(Cmd::INTC2, Flag::INT_TOUCH)?;
        }
        Ok(pending)
    }

    fn touched(&mut self) -> Result<bool, DisplayError> {
        Ok(self.interface.read_status()? & Flag::STATUS_TOUCH != 0)
    }

    fn latch(&mut self, y_axis: bool) -> Result<(), DisplayError> {
        let latch = if y_axis {
            Flag::TOUCH_LATCH_Y
        } else {
            Flag::TOUCH_LATCH_X
        };
        self.interface.write_register(Cmd::TPCR1, latch)
    }

    fn sample_axis(&mut self, y_axis: bool) -> Result<u16, DisplayError> {
        // the first conversion only lets the panel voltage settle
        self.latch(y_axis)?;
        self.interface.delay_us(10);
        self.interface.write_register(Cmd::TPCR1, Flag::TOUCH_IDLE)?;
        self.interface.read_register(Cmd::TPXH)?;
        self.interface.read_register(Cmd::TPYH)?;
        self.interface.read_register(Cmd::TPXYL)?;

        let mut samples = [0u16; SAMPLES];
        for sample in samples.iter_mut() {
            self.latch(y_axis)?;
            self.interface.delay_us(100);
            self.interface.write_register(Cmd::TPCR1, Flag::TOUCH_IDLE)?;
            let high = self
                .interface
                .read_register(if y_axis { Cmd::TPYH } else { Cmd::TPXH })?;
            let low = self.interface.read_register(Cmd::TPXYL)?;
            let low = if y_axis { (low >> 2) & 0x03 } else { low & 0x03 };
            *sample = (u16::from(high) << 2) | u16::from(low);
        }
        Ok(trimmed_mean(samples))
    }

    /// Raw 10-bit readings of a debounced touch, or `None` when nothing is pressed.
    ///
    /// The first contact waits out the debounce time. While the panel stays pressed
    /// further calls skip it.
    pub fn read_touch_adc(&mut self) -> Result<Option<(u16, u16)>, DisplayError> {
        if !self.touched()? {
            self.interface.write_register(Cmd::TPCR1, Flag::TOUCH_WAIT)?;
            self.touch.debounce_ms = DEBOUNCE_MS;
            return Ok(None);
        }
        self.interface.delay_ms(self.touch.debounce_ms);
        self.touch.debounce_ms = DEBOUNCE_MS;
        if !self.touched()? {
            self.interface.write_register(Cmd::TPCR1, Flag::TOUCH_WAIT)?;
            return Ok(None);
        }
        let x = self.sample_axis(false)?;
        let y = self.sample_axis(true)?;
        self.interface.write_register(Cmd::TPCR1, Flag::TOUCH_WAIT)?;
        self.interface.delay_ms(1);
        // a release during sampling gives garbage
        if self.touched()? {
            self.touch.debounce_ms = 0;
            return Ok(Some((x, y)));
        }
        Ok(None)
    }

    /// Touch position on a `0..=1024` scale along the logical axes.
    pub fn touch_read_adc(&mut self) -> Result<Option<(u16, u16)>, DisplayError> {
        Ok(self
            .read_touch_adc()?
            .map(|raw| self.touch.map(raw, ADC_SCALE, ADC_SCALE)))
    }

    /// Touch position in logical pixels. Touches near the edge land on the edge pixel.
    pub fn touch_read_pixel(&mut self) -> Result<Option<(u16, u16)>, DisplayError> {
        let x_max = self.width(false).saturating_sub(1);
        let y_max = self.height(false).saturating_sub(1);
        Ok(self
            .read_touch_adc()?
            .map(|raw| self.touch.map(raw, x_max, y_max)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn trimmed_mean_ignores_outliers() {
        let samples = [500, 1, 502, 1023, 498, 501, 499, 0, 500, 1000, 503, 500, 2];
        assert_eq!(trimmed_mean(samples), 500);
    }

    #[test]
    fn map_range_handles_reversed_and_empty_ranges() {
        assert_eq!(map_range(40, 40, 980, 0, 1024), 0);
        assert_eq!(map_range(980, 40, 980, 0, 1024), 1024);
        assert_eq!(map_range(980, 980, 40, 0, 799), 0);
        assert_eq!(map_range(7, 5, 5, 3, 9), 3);
    }

    #[test]
    fn orientation_flips_and_swaps() {
        let mut state = TouchState::new(TouchCalibration::default());
        assert_eq!(state.map((40, 60), 799, 479), (0, 0));
        assert_eq!(state.map((980, 940), 799, 479), (799, 479));

        state.orient(Rotation::Rotate180);
        assert_eq!(state.map((40, 60), 799, 479), (799, 479));

        // raw x runs along logical y, reversed
        state.orient(Rotation::Rotate90);
        assert_eq!(state.map((40, 60), 479, 799), (0, 799));
        state.orient(Rotation::Rotate270);
        assert_eq!(state.map((40, 60), 479, 799), (479, 0));
    }

    #[test]
    fn out_of_range_readings_clamp_to_the_edge() {
        let state = TouchState::new(TouchCalibration::default());
        assert_eq!(state.map((0, 1023), 799, 479), (0, 479));
    }

    #[test]
    fn no_touch_rearms_wait_mode() {
        let (mut lcd, bus) = ready();
        assert_eq!(lcd.read_touch_adc(), Ok(None));
        assert_eq!(bus.state().last_write(Cmd::TPCR1), Some(Flag::TOUCH_WAIT));
        assert!(!bus.state().commands.contains(&Cmd::TPXH));
    }

    #[test]
    fn held_touch_is_sampled_and_scaled() {
        let (mut lcd, bus) = ready();
        {
            let mut state = bus.state_mut();
            state.status = Flag::STATUS_TOUCH;
            state.regs[Cmd::TPXH as usize] = 0x80;
            state.regs[Cmd::TPYH as usize] = 0x40;
            state.regs[Cmd::TPXYL as usize] = 0b0000_1001;
        }
        assert_eq!(lcd.read_touch_adc(), Ok(Some((0x201, 0x102))));
        assert_eq!(bus.state().last_write(Cmd::TPCR1), Some(Flag::TOUCH_WAIT));
        assert_eq!(lcd.touch.debounce_ms, 0);

        let (x, y) = lcd.touch_read_pixel().unwrap().unwrap();
        assert_eq!(x, map_range(0x201, 40, 980, 0, 799) as u16);
        assert_eq!(y, map_range(0x102, 60, 940, 0, 479) as u16);
        assert!(lcd.touch_read_adc().unwrap().is_some());
    }

    #[test]
    fn calibration_survives_rotation() {
        let (mut lcd, bus) = ready();
        bus.state_mut().status = Flag::STATUS_TOUCH;
        lcd.set_touch_calibration(TouchCalibration {
            x_low: 0,
            x_high: 1023,
            y_low: 0,
            y_high: 1023,
        });
        lcd.set_rotation(Rotation::Rotate180).unwrap();
        assert_eq!(lcd.touch_read_adc(), Ok(Some((1024, 1024))));
    }

    #[test]
    fn touch_interrupt_enable_and_clear() {
        let (mut lcd, bus) = ready();
        lcd.touch_interrupt(true).unwrap();
        assert_eq!(bus.state().last_write(Cmd::INTC1), Some(Flag::INT_TOUCH));
        assert_eq!(lcd.touch_interrupt_pending(), Ok(false));
        bus.state_mut().regs[Cmd::INTC2 as usize] = Flag::INT_TOUCH;
        assert_eq!(lcd.touch_interrupt_pending(), Ok(true));
        assert_eq!(bus.state().last_write(Cmd::INTC2), Some(Flag::INT_TOUCH));
    }
}
