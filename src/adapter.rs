//! Entry points for GUI toolkits: area flushes, solid fills and pointer polling.
//!
//! With the `graphics` feature the driver is also an `embedded-graphics` draw target.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::color::Color;
use crate::driver::{DisplayError, Ra8875};
use crate::interface::SpeedControl;

/// One reading of the touch panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    /// Whether the panel is pressed.
    pub pressed: bool,
    /// Logical x; the last pressed position while released.
    pub x: u16,
    /// Logical y; the last pressed position while released.
    pub y: u16,
}

fn ordered(a: i16, b: i16) -> (i16, i16) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl<SPI, RST, DELAY, CLK> Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    /// Copy row-major pixels into the rectangle from (`x1`, `y1`) to (`x2`, `y2`),
    /// both corners included. Missing pixels are left untouched, extra ones ignored.
    pub fn blit(&mut self, x1: i16, y1: i16, x2: i16, y2: i16, pixels: &[Color]) -> Result<(), DisplayError> {
        self.blit_iter(x1, y1, x2, y2, pixels.iter().copied())
    }

    pub(crate) fn blit_iter<I>(&mut self, x1: i16, y1: i16, x2: i16, y2: i16, pixels: I) -> Result<(), DisplayError>
    where
        I: IntoIterator<Item = Color>,
    {
        let (x1, x2) = ordered(x1, x2);
        let (y1, y2) = ordered(y1, y2);
        let width = (i32::from(x2) - i32::from(x1) + 1) as usize;
        let count = width.saturating_mul((i32::from(y2) - i32::from(y1) + 1) as usize);
        self.leave_text_mode()?;

        if self.is_portrait() {
            // memory fills along the panel's rows, which are logical columns here
            for (i, color) in pixels.into_iter().take(count).enumerate() {
                let x = (i32::from(x1) + (i % width) as i32) as i16;
                let y = (i32::from(y1) + (i / width) as i32) as i16;
                self.draw_pixel(x, y, color)?;
            }
            return Ok(());
        }

        let saved = self.geometry.window;
        self.set_active_window(x1.max(0) as u16, x2.max(0) as u16, y1.max(0) as u16, y2.max(0) as u16)?;
        self.set_xy(x1, y1)?;
        self.interface.cmd(Cmd::MRWC)?;
        self.stream_colors(pixels.into_iter().take(count))?;
        self.write_window(saved)
    }

    /// Fill the rectangle from (`x1`, `y1`) to (`x2`, `y2`), both corners included.
    /// Whatever lies above or left of the screen is dropped.
    pub fn fill_region(&mut self, x1: i16, y1: i16, x2: i16, y2: i16, color: Color) -> Result<(), DisplayError> {
        let (x1, x2) = ordered(x1, x2);
        let (y1, y2) = ordered(y1, y2);
        let (x1, y1) = (x1.max(0), y1.max(0));
        if x2 < x1 || y2 < y1 {
            return Ok(());
        }
        self.fill_rect(x1, y1, x2 - x1 + 1, y2 - y1 + 1, color)
    }

    /// Read the touch panel in logical pixels.
    pub fn poll_touch(&mut self) -> Result<TouchSample, DisplayError> {
        match self.touch_read_pixel()? {
            Some((x, y)) => {
                self.touch.last = (x, y);
                Ok(TouchSample { pressed: true, x, y })
            }
            None => {
                let (x, y) = self.touch.last;
                Ok(TouchSample { pressed: false, x, y })
            }
        }
    }
}

#[cfg(feature = "graphics")]
mod graphics {
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;
    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::OutputPin;
    use embedded_hal::spi::SpiDevice;

    use crate::color::Color;
    use crate::driver::{DisplayError, Ra8875};
    use crate::interface::SpeedControl;

    impl<SPI, RST, DELAY, CLK> DrawTarget for Ra8875<SPI, RST, DELAY, CLK>
    where
        SPI: SpiDevice,
        RST: OutputPin,
        DELAY: DelayNs,
        CLK: SpeedControl,
    {
        type Color = Rgb565;
        type Error = DisplayError;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let bounds = self.bounding_box();
            for Pixel(point, color) in pixels {
                if bounds.contains(point) {
                    self.draw_pixel(point.x as i16, point.y as i16, color.into())?;
                }
            }
            Ok(())
        }

        fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            let Some(bottom_right) = area.bottom_right() else {
                return Ok(());
            };
            if area.intersection(&self.bounding_box()) != *area {
                let pixels = area
                    .points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color));
                return self.draw_iter(pixels);
            }
            self.blit_iter(
                area.top_left.x as i16,
                area.top_left.y as i16,
                bottom_right.x as i16,
                bottom_right.y as i16,
                colors.into_iter().map(Color::from),
            )
        }

        fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
            let area = area.intersection(&self.bounding_box());
            let Some(bottom_right) = area.bottom_right() else {
                return Ok(());
            };
            self.fill_region(
                area.top_left.x as i16,
                area.top_left.y as i16,
                bottom_right.x as i16,
                bottom_right.y as i16,
                color.into(),
            )
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.clear_screen(color.into())
        }
    }

    impl<SPI, RST, DELAY, CLK> OriginDimensions for Ra8875<SPI, RST, DELAY, CLK>
    where
        SPI: SpiDevice,
        RST: OutputPin,
        DELAY: DelayNs,
        CLK: SpeedControl,
    {
        fn size(&self) -> Size {
            Size::new(self.width(false).into(), self.height(false).into())
        }
    }
}
