//! RA8875 TFT Controller Driver
//!
//! Drives the RA8875 over SPI on 5" and 9" 800x480 and 5.6" 640x480 modules. The
//! controller does the heavy lifting itself: lines, rectangles, circles, ellipses,
//! curves and triangles are drawn by its shape engine, the block transfer engine copies
//! and fills regions, and the built-in font renders text without a frame buffer on the
//! host. The driver adds rotation, two-layer handling, user fonts, arcs, PWM backlight
//! control and a calibrated resistive touch reader on top.
//!
//! Nothing is buffered locally, so every call goes straight to the bus.
//!
//! ## Architecture
//!
//! - [`Ra8875`](driver::Ra8875) owns the bus, the reset line and a delay source and keeps
//!   shadow copies of the registers it toggles bits in.
//! - Drawing, text, layers, touch and PWM live in their own modules as further `impl`
//!   blocks on the same type.
//! - With the `graphics` feature (on by default) the driver is an `embedded-graphics`
//!   `DrawTarget`, and [`adapter`] has the flush/fill/touch hooks GUI toolkits expect.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use ra8875::prelude::*;
//!
//! let config = Config::new().panel(PanelSelect::Fixed(Panel::Tft50));
//! let mut lcd = Ra8875::new(spi_device, reset_pin, delay, config);
//! lcd.init()?;
//!
//! lcd.fill_circle(Pos::Center, Pos::Center, 100, Color::BLUE)?;
//! lcd.set_text_color(Color::WHITE, Color::BLACK)?;
//! lcd.set_cursor(10i16, 10i16, false)?;
//! write!(lcd, "hello")?;
//!
//! if let Some((x, y)) = lcd.touch_read_pixel()? {
//!     lcd.draw_pixel(x as i16, y as i16, Color::RED)?;
//! }
//! ```
//!
//! Platforms that can retune the SPI clock pass a [`SpeedControl`](interface::SpeedControl)
//! through [`Ra8875::with_speed_control`](driver::Ra8875::with_speed_control) so register
//! reads run slower than pixel writes.
//!
#![no_std]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_arguments)]

#[cfg(test)]
extern crate std;

mod arc;
mod cmd;
mod flag;
mod state;
#[cfg(test)]
mod testing;

pub mod adapter;
pub mod color;
pub mod config;
pub mod driver;
pub mod font;
pub mod geometry;
pub mod interface;
pub mod layers;
pub mod panel;
pub mod pwm;
pub mod shapes;
pub mod text;
pub mod touch;
pub mod window;

pub use driver::{DisplayError, Ra8875};

/// Useful exports
pub mod prelude {
    pub use crate::adapter::TouchSample;
    pub use crate::color::{Color, ColorDepth};
    pub use crate::config::Config;
    pub use crate::driver::{DisplayError, Ra8875};
    pub use crate::font::Font;
    pub use crate::geometry::{Pos, Rotation, Window};
    pub use crate::interface::{BusSpeed, FixedSpeed, SpeedControl};
    pub use crate::layers::{BteMove, Layer, LayerEffect, Rop, WriteTarget};
    pub use crate::panel::{Panel, PanelSelect};
    pub use crate::pwm::{PwmChannel, PwmClock};
    pub use crate::text::{CursorStyle, FontCoding};
    pub use crate::touch::TouchCalibration;
    pub use core::fmt::Write as _;
}
