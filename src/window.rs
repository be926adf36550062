//! Rotation, the active window, the memory-write cursor and hardware scrolling.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::driver::{DisplayError, Ra8875};
use crate::flag::Flag;
use crate::geometry::{check_limits, clamp_window, Rotation, Window};
use crate::interface::SpeedControl;

use log::debug;

/// Which layers the scroll offsets move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMode {
    /// Both layers together.
    Simultaneous,
    /// Only layer 1.
    Layer1Only,
    /// Only layer 2.
    Layer2Only,
    /// Layer 2 acts as the scroll buffer.
    Buffered,
}

impl ScrollMode {
    const fn bits(self) -> u8 {
        match self {
            ScrollMode::Simultaneous => 0x00,
            ScrollMode::Layer1Only => 0x40,
            ScrollMode::Layer2Only => 0x80,
            ScrollMode::Buffered => 0xC0,
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
    /// Width in pixels: the panel's own when `absolute`, otherwise the rotated view.
    pub fn width(&self, absolute: bool) -> u16 {
        if absolute {
            self.geometry.panel_width
        } else {
            self.geometry.width
        }
    }

    /// Height in pixels: the panel's own when `absolute`, otherwise the rotated view.
    pub fn height(&self, absolute: bool) -> u16 {
        if absolute {
            self.geometry.panel_height
        } else {
            self.geometry.height
        }
    }

    /// Current orientation.
    pub fn rotation(&self) -> Rotation {
        self.geometry.rotation
    }

    /// Whether logical axes are swapped against the panel.
    pub fn is_portrait(&self) -> bool {
        self.geometry.portrait()
    }

    /// Rotate the view. Scan direction, logical size, touch mapping, the hardware
    /// font orientation and the active window all follow.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        debug!("rotation: {:?}", rotation);
        let (reverse_h, reverse_v) = rotation.scan_reversed();
        self.scan_direction(reverse_h, reverse_v)?;
        self.geometry.rotate(rotation);
        self.touch.orient(rotation);
        if rotation.is_portrait() {
            self.regs.fncr1 |= Flag::FONT_ROTATE_90;
        } else {
            self.regs.fncr1 &= !Flag::FONT_ROTATE_90;
        }
        self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)?;
        self.set_active_window_full()
    }

    fn scan_direction(&mut self, reverse_h: bool, reverse_v: bool) -> Result<(), DisplayError> {
        if reverse_h {
            self.regs.dpcr |= Flag::HSCAN_REVERSE;
        } else {
            self.regs.dpcr &= !Flag::HSCAN_REVERSE;
        }
        if reverse_v {
            self.regs.dpcr |= Flag::VSCAN_REVERSE;
        } else {
            self.regs.dpcr &= !Flag::VSCAN_REVERSE;
        }
        self.interface.write_register(Cmd::DPCR, self.regs.dpcr)
    }

    /// Let hardware primitives reach the whole panel.
    pub fn set_active_window_full(&mut self) -> Result<(), DisplayError> {
        let full = Window::full(self.geometry.panel_width, self.geometry.panel_height);
        self.write_window(full)
    }

    /// Confine hardware primitives to a rectangle given in logical coordinates.
    ///
    /// Right and bottom are clamped to the panel; left and top are taken as given.
    pub fn set_active_window(
        &mut self,
        left: u16,
        right: u16,
        top: u16,
        bottom: u16,
    ) -> Result<(), DisplayError> {
        let window = if self.geometry.portrait() {
            Window {
                left: top,
                right: bottom,
                top: left,
                bottom: right,
            }
        } else {
            Window {
                left,
                right,
                top,
                bottom,
            }
        };
        let window = clamp_window(window, self.geometry.panel_width, self.geometry.panel_height);
        self.write_window(window)
    }

    /// The active window in physical coordinates, as clamped when it was set.
    pub fn active_window(&self) -> Window {
        self.geometry.window
    }

    pub(crate) fn write_window(&mut self, window: Window) -> Result<(), DisplayError> {
        self.geometry.window = window;
        self.interface.write_register16(Cmd::HSAW0, window.left)?;
        self.interface.write_register16(Cmd::HEAW0, window.right)?;
        self.interface.write_register16(Cmd::VSAW0, window.top)?;
        self.interface.write_register16(Cmd::VEAW0, window.bottom)
    }

    /// Move the memory-write cursor to a logical point.
    pub fn set_xy(&mut self, x: i16, y: i16) -> Result<(), DisplayError> {
        self.set_x(x)?;
        self.set_y(y)
    }

    /// Logical x of the memory-write cursor. Lands on the vertical register in portrait.
    pub fn set_x(&mut self, x: i16) -> Result<(), DisplayError> {
        let (w, h) = (self.geometry.panel_width, self.geometry.panel_height);
        if self.geometry.portrait() {
            let (_, v) = check_limits(0, x, w, h);
            self.interface.write_register16(Cmd::CURV0, v as u16)
        } else {
            let (hx, _) = check_limits(x, 0, w, h);
            self.interface.write_register16(Cmd::CURH0, hx as u16)
        }
    }

    /// Logical y of the memory-write cursor. Lands on the horizontal register in portrait.
    pub fn set_y(&mut self, y: i16) -> Result<(), DisplayError> {
        let (w, h) = (self.geometry.panel_width, self.geometry.panel_height);
        if self.geometry.portrait() {
            let (hx, _) = check_limits(y, 0, w, h);
            self.interface.write_register16(Cmd::CURH0, hx as u16)
        } else {
            let (_, v) = check_limits(0, y, w, h);
            self.interface.write_register16(Cmd::CURV0, v as u16)
        }
    }

    /// Choose which layers the scroll offsets move.
    pub fn set_scroll_mode(&mut self, mode: ScrollMode) -> Result<(), DisplayError> {
        self.regs.ltpr0 = (self.regs.ltpr0 & 0x3F) | mode.bits();
        self.interface.write_register(Cmd::LTPR0, self.regs.ltpr0)
    }

    /// Region that [`Ra8875::scroll`] moves, in logical coordinates clamped to the panel.
    pub fn set_scroll_window(
        &mut self,
        left: i16,
        right: i16,
        top: i16,
        bottom: i16,
    ) -> Result<(), DisplayError> {
        let (w, h) = (self.geometry.panel_width, self.geometry.panel_height);
        let (l, t) = self.geometry.to_physical(left, top);
        let (r, b) = self.geometry.to_physical(right, bottom);
        let (l, t) = check_limits(l, t, w, h);
        let (r, b) = check_limits(r, b, w, h);
        let window = Window {
            left: l as u16,
            right: r as u16,
            top: t as u16,
            bottom: b as u16,
        };
        self.geometry.scroll_window = window;
        self.interface.write_register16(Cmd::HSSW0, window.left)?;
        self.interface.write_register16(Cmd::HESW0, window.right)?;
        self.interface.write_register16(Cmd::VSSW0, window.top)?;
        self.interface.write_register16(Cmd::VESW0, window.bottom)?;
        self.interface.delay_ms(1);
        Ok(())
    }

    /// Offset the scroll window contents. Does nothing until a scroll window is set.
    pub fn scroll(&mut self, x: i16, y: i16) -> Result<(), DisplayError> {
        if self.geometry.scroll_window.is_empty() {
            return Ok(());
        }
        let (x, y) = self.geometry.to_physical(x, y);
        self.interface.write_register16(Cmd::HOFS0, x as u16)?;
        self.interface.write_register16(Cmd::VOFS0, y as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::testing::*;

    #[test]
    fn logical_size_follows_every_rotation() {
        let (mut lcd, _bus) = ready();
        for r in 0..8u8 {
            let rotation = Rotation::from(r);
            lcd.set_rotation(rotation).unwrap();
            let (w, h) = if rotation.is_portrait() { (480, 800) } else { (800, 480) };
            assert_eq!(lcd.width(false), w);
            assert_eq!(lcd.height(false), h);
            assert_eq!(lcd.width(true), 800);
            assert_eq!(lcd.height(true), 480);
        }
    }

    #[test]
    fn rotation_sets_scan_bits_and_font_rotation() {
        let (mut lcd, bus) = ready();
        lcd.set_rotation(Rotation::Rotate90).unwrap();
        assert_eq!(bus.state().last_write(Cmd::DPCR), Some(Flag::HSCAN_REVERSE));
        assert_ne!(bus.state().last_write(Cmd::FNCR1).unwrap_or(0) & Flag::FONT_ROTATE_90, 0);
        lcd.set_rotation(Rotation::Rotate180).unwrap();
        assert_eq!(
            bus.state().last_write(Cmd::DPCR),
            Some(Flag::HSCAN_REVERSE | Flag::VSCAN_REVERSE)
        );
        assert_eq!(bus.state().last_write(Cmd::FNCR1).unwrap_or(0) & Flag::FONT_ROTATE_90, 0);
        lcd.set_rotation(Rotation::Rotate270).unwrap();
        assert_eq!(bus.state().last_write(Cmd::DPCR), Some(Flag::VSCAN_REVERSE));
    }

    #[test]
    fn origin_pixel_lands_on_physical_origin_in_every_rotation() {
        let (mut lcd, bus) = ready();
        for r in 0..4u8 {
            lcd.set_rotation(Rotation::from(r)).unwrap();
            bus.clear_log();
            lcd.draw_pixel(0, 0, Color::RED).unwrap();
            let state = bus.state();
            assert_eq!(state.reg16(Cmd::CURH0), 0);
            assert_eq!(state.reg16(Cmd::CURV0), 0);
        }
    }

    #[test]
    fn portrait_pixel_swaps_axes() {
        let (mut lcd, bus) = ready();
        lcd.set_rotation(Rotation::Rotate90).unwrap();
        lcd.draw_pixel(10, 300, Color::RED).unwrap();
        assert_eq!(bus.state().reg16(Cmd::CURH0), 300);
        assert_eq!(bus.state().reg16(Cmd::CURV0), 10);
    }

    #[test]
    fn active_window_round_trips_clamped_values() {
        let (mut lcd, bus) = ready();
        lcd.set_active_window(10, 900, 20, 700).unwrap();
        let expected = Window {
            left: 10,
            right: 800,
            top: 20,
            bottom: 480,
        };
        assert_eq!(lcd.active_window(), expected);
        let state = bus.state();
        assert_eq!(state.reg16(Cmd::HSAW0), 10);
        assert_eq!(state.reg16(Cmd::HEAW0), 800);
        assert_eq!(state.reg16(Cmd::VSAW0), 20);
        assert_eq!(state.reg16(Cmd::VEAW0), 480);
    }

    #[test]
    fn active_window_in_portrait_is_stored_physically() {
        let (mut lcd, _bus) = ready();
        lcd.set_rotation(Rotation::Rotate90).unwrap();
        lcd.set_active_window(5, 100, 50, 600).unwrap();
        assert_eq!(
            lcd.active_window(),
            Window {
                left: 50,
                right: 600,
                top: 5,
                bottom: 100
            }
        );
    }

    #[test]
    fn rotation_resets_active_window() {
        let (mut lcd, _bus) = ready();
        lcd.set_active_window(1, 2, 3, 4).unwrap();
        lcd.set_rotation(Rotation::Rotate0).unwrap();
        assert_eq!(lcd.active_window(), Window::full(800, 480));
    }

    #[test]
    fn set_xy_clamps_to_panel() {
        let (mut lcd, bus) = ready();
        lcd.set_xy(-4, 1000).unwrap();
        assert_eq!(bus.state().reg16(Cmd::CURH0), 0);
        assert_eq!(bus.state().reg16(Cmd::CURV0), 479);
    }

    #[test]
    fn scroll_needs_a_window() {
        let (mut lcd, bus) = ready();
        lcd.scroll(5, 5).unwrap();
        assert!(bus.state().writes.is_empty());
        lcd.set_scroll_window(0, 799, 100, 200).unwrap();
        lcd.scroll(0, 12).unwrap();
        assert_eq!(bus.state().reg16(Cmd::VOFS0), 12);
        assert_eq!(bus.state().reg16(Cmd::VESW0), 200);
    }

    #[test]
    fn scroll_mode_keeps_layer_effect_bits() {
        let (mut lcd, bus) = ready();
        lcd.layer_effect(crate::layers::LayerEffect::Transparent).unwrap();
        lcd.set_scroll_mode(ScrollMode::Buffered).unwrap();
        assert_eq!(bus.state().last_write(Cmd::LTPR0), Some(0xC3));
    }
}
