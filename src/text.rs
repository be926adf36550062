//! Text output.
//!
//! Two engines share one cursor. With the internal font the controller draws glyphs
//! from its ROM while the driver only tracks the cursor. With a [`Font`] the driver
//! renders every glyph as filled runs through the shape engine.
//!
//! The cursor is kept in logical coordinates. Text always runs along the logical x
//! axis, and the controller's font rotation takes care of portrait.
use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::color::Color;
use crate::driver::{DisplayError, Ra8875};
use crate::flag::Flag;
use crate::font::{Font, GlyphRuns, GlyphWidth};
use crate::geometry::Pos;
use crate::interface::SpeedControl;
use crate::layers::WriteTarget;
use crate::state::OneShot;

use log::{debug, warn};

const INTERNAL_WIDTH: u8 = 8;
const INTERNAL_HEIGHT: u8 = 16;
/// Empty rows under and over an internal glyph, unscaled.
const INTERNAL_BASELINE_LOW: u8 = 2;
const INTERNAL_BASELINE_TOP: u8 = 4;
const MAX_SPACING: u8 = 0x3F;

/// Character set of the internal font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontCoding {
    /// Latin-1, western European.
    #[default]
    Iso8859_1,
    /// Latin-2, central European.
    Iso8859_2,
    /// Latin-3, south European.
    Iso8859_3,
    /// Latin-4, north European.
    Iso8859_4,
}

impl FontCoding {
    const fn bits(self) -> u8 {
        match self {
            FontCoding::Iso8859_1 => 0,
            FontCoding::Iso8859_2 => 1,
            FontCoding::Iso8859_3 => 2,
            FontCoding::Iso8859_4 => 3,
        }
    }
}

/// Shape of the hardware text cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    /// No cursor.
    #[default]
    Hidden,
    /// Thin vertical bar.
    IBeam,
    /// Line under the character cell.
    Underline,
    /// The whole character cell.
    Block,
}

impl CursorStyle {
    /// Width and height written to `CURHS`/`CURVS`.
    const fn size(self) -> (u8, u8) {
        match self {
            CursorStyle::Hidden => (0, 0),
            CursorStyle::IBeam => (0x01, 0x1F),
            CursorStyle::Underline => (0x07, 0x01),
            CursorStyle::Block => (0x07, 0x1F),
        }
    }
}

/// How the next string is placed around the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Centering {
    /// The string's middle lands on the cursor.
    Absolute,
    /// The string is centered on the screen along the flagged axes.
    Axes { x: bool, y: bool },
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TextState {
    pub cursor: (i16, i16),
    pub fore_color: Color,
    pub back_color: Color,
    pub transparent: bool,
    /// 1 is unscaled.
    pub scale_x: u8,
    pub scale_y: u8,
    pub spacing: u8,
    pub interline: u8,
    pub centering: OneShot<Centering>,
    pub gradient: OneShot<(Color, Color)>,
    /// `None` while the internal font is active.
    pub font: Option<&'static Font>,
    /// 0 for a variable width font.
    pub font_w: u8,
    pub font_h: u8,
    pub baseline_low: u8,
    pub baseline_top: u8,
    pub space_width: u8,
    /// A shape changed the hardware colors since the last internal-font write.
    pub recover_color: bool,
    pub cursor_style: CursorStyle,
}

impl Default for TextState {
    fn default() -> Self {
        TextState {
            cursor: (0, 0),
            fore_color: Color::WHITE,
            back_color: Color::BLACK,
            transparent: false,
            scale_x: 1,
            scale_y: 1,
            spacing: 0,
            interline: 0,
            centering: OneShot::Idle,
            gradient: OneShot::Idle,
            font: None,
            font_w: INTERNAL_WIDTH,
            font_h: INTERNAL_HEIGHT,
            baseline_low: INTERNAL_BASELINE_LOW,
            baseline_top: INTERNAL_BASELINE_TOP,
            space_width: INTERNAL_WIDTH,
            recover_color: false,
            cursor_style: CursorStyle::Hidden,
        }
    }
}

impl TextState {
    fn line_height(&self) -> i16 {
        i16::from(self.font_h)
            .saturating_mul(i16::from(self.scale_y))
            .saturating_add(i16::from(self.interline))
    }
}

/// Latin-1 code of `c`; anything outside the set becomes `?`.
fn latin1(c: char) -> u8 {
    u8::try_from(u32::from(c)).unwrap_or(b'?')
}

fn is_blank(code: u8) -> bool {
    matches!(code, b'\r' | b'\n' | b' ')
}

impl<SPI, RST, DELAY, CLK> Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    /// Switch to the controller's ROM font, unscaled.
    pub fn set_font_internal(&mut self) -> Result<(), DisplayError> {
        debug!("internal font");
        self.set_text_mode(true)?;
        self.text.font = None;
        self.text.font_w = INTERNAL_WIDTH;
        self.text.font_h = INTERNAL_HEIGHT;
        self.text.baseline_low = INTERNAL_BASELINE_LOW;
        self.text.baseline_top = INTERNAL_BASELINE_TOP;
        self.text.space_width = INTERNAL_WIDTH;
        self.regs.fncr0 &= !Flag::FONT_SOURCE_MASK;
        self.interface.write_register(Cmd::FNCR0, self.regs.fncr0)?;
        self.interface.delay_ms(1);
        self.text.scale_x = 1;
        self.text.scale_y = 1;
        if self.regs.fncr1 & Flag::FONT_SCALE_MASK != 0 {
            self.regs.fncr1 &= !Flag::FONT_SCALE_MASK;
            self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)?;
        }
        Ok(())
    }

    /// Render text with `font` from now on.
    ///
    /// A variable width font needs a space glyph to know how far a space advances.
    /// Without one the internal font is selected instead.
    pub fn set_font(&mut self, font: &'static Font) -> Result<(), DisplayError> {
        let Some(space) = font.space_width() else {
            warn!("font has no space glyph, falling back to the internal font");
            return self.set_font_internal();
        };
        self.text.font = Some(font);
        self.text.font_h = font.height;
        self.text.font_w = match font.width {
            GlyphWidth::Fixed(w) => w,
            GlyphWidth::Variable => 0,
        };
        self.text.baseline_low = 0;
        self.text.baseline_top = 0;
        self.text.space_width = space;
        self.text.scale_x = 1;
        self.text.scale_y = 1;
        Ok(())
    }

    /// Pick the character set of the internal font.
    pub fn set_int_font_coding(&mut self, coding: FontCoding) -> Result<(), DisplayError> {
        self.regs.fncr0 = (self.regs.fncr0 & !Flag::FONT_CODING_MASK) | coding.bits();
        self.interface.write_register(Cmd::FNCR0, self.regs.fncr0)
    }

    /// Full-width alignment of internal glyphs. Ignored for rendered fonts.
    pub fn set_font_full_align(&mut self, on: bool) -> Result<(), DisplayError> {
        if self.text.font.is_some() {
            return Ok(());
        }
        if on {
            self.regs.fncr1 |= Flag::FONT_FULL_ALIGN;
        } else {
            self.regs.fncr1 &= !Flag::FONT_FULL_ALIGN;
        }
        self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)
    }

    /// Extra pixels between text lines. The controller takes at most 63.
    pub fn set_font_interline(&mut self, pixels: u8) -> Result<(), DisplayError> {
        if self.text.font.is_some() {
            self.text.interline = pixels;
            return Ok(());
        }
        self.text.interline = pixels.min(MAX_SPACING);
        self.interface.write_register(Cmd::FLDR, self.text.interline)
    }

    /// Magnify text; 0 is normal size. The internal font stops at 3 (four times) and
    /// larger values wrap.
    pub fn set_font_scale(&mut self, x: u8, y: u8) -> Result<(), DisplayError> {
        let (x, y) = if self.text.font.is_none() {
            let (x, y) = (x % 4, y % 4);
            self.regs.fncr1 = (self.regs.fncr1 & !Flag::FONT_SCALE_MASK) | (x << 2) | y;
            self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)?;
            (x, y)
        } else {
            (x, y)
        };
        self.text.scale_x = x.saturating_add(1);
        self.text.scale_y = y.saturating_add(1);
        Ok(())
    }

    /// Pixels between characters, at most 63.
    pub fn set_font_spacing(&mut self, pixels: u8) -> Result<(), DisplayError> {
        let pixels = pixels.min(MAX_SPACING);
        self.text.spacing = pixels;
        if self.text.font.is_none() {
            self.regs.fwtset = (self.regs.fwtset & !MAX_SPACING) | pixels;
            self.interface.write_register(Cmd::FWTSET, self.regs.fwtset)?;
        }
        Ok(())
    }

    /// Scaled glyph width, or how many glyphs fit in a line. 0 for a variable font.
    pub fn font_width(&self, in_columns: bool) -> u16 {
        let w = u16::from(self.text.font_w) * u16::from(self.text.scale_x);
        match (w, in_columns) {
            (0, _) => 0,
            (w, true) => self.geometry.width / w,
            (w, false) => w,
        }
    }

    /// Scaled glyph height, or how many lines fit on screen.
    pub fn font_height(&self, in_rows: bool) -> u16 {
        let h = u16::from(self.text.font_h) * u16::from(self.text.scale_y);
        match (h, in_rows) {
            (0, _) => 0,
            (h, true) => self.geometry.height / h,
            (h, false) => h,
        }
    }

    fn text_position(&mut self, x: i16, y: i16) -> Result<(), DisplayError> {
        let (px, py) = self.geometry.to_physical(x, y);
        self.interface.write_register16(Cmd::F_CURXL, px as u16)?;
        self.interface.write_register16(Cmd::F_CURYL, py as u16)
    }

    /// Move the text cursor.
    ///
    /// [`Pos::Center`] centers the next string on that axis of the screen. With
    /// `autocenter` the next string is centered on (`x`, `y`) itself. Negative
    /// coordinates clamp to zero.
    pub fn set_cursor(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        autocenter: bool,
    ) -> Result<(), DisplayError> {
        let (x, y) = (x.into(), y.into());
        let center_x = x == Pos::Center;
        let center_y = y == Pos::Center;
        let x = x.resolve(self.geometry.width).max(0);
        let y = y.resolve(self.geometry.height).max(0);

        if autocenter {
            self.text.centering.arm(Centering::Absolute);
        } else if center_x || center_y {
            self.text.centering.arm(Centering::Axes {
                x: center_x,
                y: center_y,
            });
        } else {
            self.text.centering.clear();
        }
        self.text.cursor = (x, y);
        // centered text is positioned once its width is known
        if self.text.centering.is_pending() || self.text.font.is_some() {
            return Ok(());
        }
        self.text_position(x, y)
    }

    /// Text cursor position. Read back from the controller while the internal font
    /// is active.
    pub fn cursor(&mut self) -> Result<(i16, i16), DisplayError> {
        if self.text.font.is_some() {
            return Ok(self.cursor_fast());
        }
        let mut regs = [0u8; 4];
        for (i, byte) in regs.iter_mut().enumerate() {
            *byte = self.interface.read_register(Cmd::F_CURXL + i as u8)?;
        }
        let px = u16::from_le_bytes([regs[0], regs[1]]) as i16;
        let py = u16::from_le_bytes([regs[2], regs[3]]) as i16;
        Ok(self.geometry.to_physical(px, py))
    }

    /// Text cursor position as tracked by the driver.
    pub fn cursor_fast(&self) -> (i16, i16) {
        self.text.cursor
    }

    /// Show the hardware text cursor.
    pub fn show_cursor(&mut self, style: CursorStyle, blink: bool) -> Result<(), DisplayError> {
        self.text.cursor_style = style;
        if style == CursorStyle::Hidden {
            self.regs.mwcr0 &= !Flag::CURSOR_VISIBLE;
        } else {
            self.regs.mwcr0 |= Flag::CURSOR_VISIBLE;
        }
        if blink {
            self.regs.mwcr0 |= Flag::CURSOR_BLINK;
        } else {
            self.regs.mwcr0 &= !Flag::CURSOR_BLINK;
        }
        self.interface.write_register(Cmd::MWCR0, self.regs.mwcr0)?;
        let (w, h) = style.size();
        self.interface.write_register(Cmd::CURHS, w)?;
        self.interface.write_register(Cmd::CURVS, h)
    }

    /// The style last passed to [`Ra8875::show_cursor`].
    pub fn cursor_style(&self) -> CursorStyle {
        self.text.cursor_style
    }

    /// Blink period of the text cursor in frames.
    pub fn set_cursor_blink_rate(&mut self, rate: u8) -> Result<(), DisplayError> {
        self.interface.write_register(Cmd::BTCR, rate)
    }

    /// Whether the internal-font cursor advances after each character.
    pub fn cursor_increment(&mut self, on: bool) -> Result<(), DisplayError> {
        if self.text.font.is_some() {
            return Ok(());
        }
        if on {
            self.regs.mwcr0 &= !Flag::MEMWRITE_NO_INCREMENT;
        } else {
            self.regs.mwcr0 |= Flag::MEMWRITE_NO_INCREMENT;
        }
        self.interface.write_register(Cmd::MWCR0, self.regs.mwcr0)
    }

    fn graphic_cursor_register(&mut self, update: impl FnOnce(u8) -> u8) -> Result<(), DisplayError> {
        let mut mwcr1 = update(self.interface.read_register(Cmd::MWCR1)?);
        if self.layers.multi && self.layers.current == 1 {
            mwcr1 |= Flag::WRITE_LAYER_2;
        } else {
            mwcr1 &= !Flag::WRITE_LAYER_2;
        }
        self.interface.data(mwcr1)
    }

    /// Pick one of the eight graphic cursors, which must have been uploaded first.
    pub fn set_graphic_cursor(&mut self, slot: u8) -> Result<(), DisplayError> {
        let slot = slot.min(7);
        self.graphic_cursor_register(|v| (v & !Flag::GRAPHIC_CURSOR_SELECT) | (slot << 4))
    }

    /// Show or hide the graphic cursor.
    pub fn show_graphic_cursor(&mut self, on: bool) -> Result<(), DisplayError> {
        self.graphic_cursor_register(|v| {
            if on {
                v | Flag::GRAPHIC_CURSOR_ON
            } else {
                v & !Flag::GRAPHIC_CURSOR_ON
            }
        })
    }

    /// Text colors on an opaque background.
    pub fn set_text_color(&mut self, fore: Color, back: Color) -> Result<(), DisplayError> {
        if fore != self.text.fore_color {
            self.text.fore_color = fore;
            self.set_foreground_color(fore)?;
        }
        if back != self.text.back_color {
            self.text.back_color = back;
            self.set_background_color(back)?;
        }
        self.text.transparent = false;
        if self.text.font.is_none() {
            self.regs.fncr1 &= !Flag::FONT_TRANSPARENT;
            self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)?;
        }
        Ok(())
    }

    /// Text color over whatever is already on screen.
    pub fn set_text_color_transparent(&mut self, fore: Color) -> Result<(), DisplayError> {
        if fore != self.text.fore_color {
            self.text.fore_color = fore;
            self.set_foreground_color(fore)?;
        }
        self.text.transparent = true;
        if self.text.font.is_none() {
            self.regs.fncr1 |= Flag::FONT_TRANSPARENT;
            self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)?;
        }
        Ok(())
    }

    /// Shade the next string from `from` to `to` across its visible characters.
    pub fn set_text_gradient(&mut self, from: Color, to: Color) {
        self.text.gradient.arm((from, to));
    }

    /// Store a user glyph of 8x16 pixels, one byte per row, in character RAM `slot`.
    pub fn upload_user_char(&mut self, glyph: &[u8; 16], slot: u8) -> Result<(), DisplayError> {
        let mwcr1 = self.interface.read_register(Cmd::MWCR1)?;
        self.leave_text_mode()?;
        self.interface.write_register(Cmd::CGSR, slot)?;
        self.write_to(WriteTarget::Cgram)?;
        self.interface.cmd(Cmd::MRWC)?;
        for &row in glyph {
            self.interface.data(row)?;
        }
        self.interface.write_register(Cmd::MWCR1, mwcr1)
    }

    /// Print user glyph `slot` at the text cursor, followed by the `extra` glyphs stored
    /// after it. Scaling is suspended meanwhile.
    pub fn show_user_char(&mut self, slot: u8, extra: u8) -> Result<(), DisplayError> {
        self.set_text_mode(true)?;
        self.interface
            .write_register(Cmd::FNCR0, self.regs.fncr0 | Flag::FONT_CGRAM)?;
        let scaled = self.regs.fncr1 & Flag::FONT_SCALE_MASK != 0;
        if scaled {
            self.interface
                .write_register(Cmd::FNCR1, self.regs.fncr1 & !Flag::FONT_SCALE_MASK)?;
        }
        if self.layers.multi {
            let target = if self.layers.current == 1 {
                WriteTarget::Layer2
            } else {
                WriteTarget::Layer1
            };
            self.write_to(target)?;
        }
        self.interface.cmd(Cmd::MRWC)?;
        for i in 0..=extra {
            self.interface.data(slot.wrapping_add(i))?;
            self.wait_busy(Flag::STATUS_MEMORY_BUSY)?;
        }
        if scaled {
            self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)?;
        }
        self.interface.write_register(Cmd::FNCR0, self.regs.fncr0)
    }

    /// Unscaled pixel width of `text` in the active font.
    fn string_width(&self, text: &str) -> u16 {
        let codes = text.chars().map(latin1);
        match self.text.font {
            Some(font) => font.text_width(codes, self.text.space_width),
            None => {
                let count = codes.filter(|c| !matches!(c, b'\r' | b'\n')).count();
                (count as u16).saturating_mul(u16::from(self.text.font_w))
            }
        }
    }

    /// Write `text` at the text cursor and advance it.
    ///
    /// `\n` starts a new line, `\r` is ignored. Rendered fonts wrap at the right edge
    /// and skip characters they have no glyph for. Characters outside Latin-1 print
    /// as `?`.
    pub fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        if text.is_empty() {
            return Ok(());
        }
        let internal = self.text.font.is_none();
        let (scale_x, scale_y) = (i16::from(self.text.scale_x), i16::from(self.text.scale_y));
        let low = i16::from(self.text.baseline_low).saturating_mul(scale_y);
        let top = i16::from(self.text.baseline_top).saturating_mul(scale_y);

        let mut width = 0;
        let mut height = 0;
        if self.text.centering.is_pending() || (!internal && !self.text.transparent) {
            width = i16::try_from(self.string_width(text))
                .unwrap_or(i16::MAX)
                .saturating_mul(scale_x);
            height = i16::from(self.text.font_h)
                .saturating_mul(scale_y)
                .saturating_sub(low.saturating_add(top));
            if width > 0 {
                let (x, y) = &mut self.text.cursor;
                match self.text.centering.take() {
                    Some(Centering::Absolute) => {
                        *x = x.saturating_sub(width / 2);
                        *y = y.saturating_sub(height / 2).saturating_sub(top);
                    }
                    Some(Centering::Axes { x: cx, y: cy }) => {
                        if cx {
                            *x = (self.geometry.width / 2) as i16 - width / 2;
                        }
                        if cy {
                            *y = ((self.geometry.height / 2) as i16 - height / 2).saturating_sub(top);
                        }
                    }
                    None => {}
                }
                if internal {
                    let (x, y) = self.text.cursor;
                    self.text_position(x, y)?;
                }
            }
        }

        if internal {
            self.set_text_mode(true)?;
            if self.text.recover_color {
                self.text.recover_color = false;
                let (fore, back) = (self.text.fore_color, self.text.back_color);
                if self.fore_color != fore {
                    self.set_foreground_color(fore)?;
                }
                if self.back_color != back {
                    self.set_background_color(back)?;
                }
            }
        } else {
            self.leave_text_mode()?;
        }

        let gradient = self.text.gradient.take();
        let steps = text.chars().map(latin1).filter(|&c| !is_blank(c)).count() as u16;
        let mut step = 0;

        if !internal && !self.text.transparent && width > 0 {
            let (x, y) = self.text.cursor;
            let back = self.text.back_color;
            self.fill_rect(x, y, width, height, back)?;
        }

        for code in text.chars().map(latin1) {
            let mut color = self.text.fore_color;
            if let Some((from, to)) = gradient {
                if !is_blank(code) {
                    color = Color::interpolate(from, to, step, steps);
                    step += 1;
                    if internal {
                        self.set_foreground_color(color)?;
                    }
                }
            }
            match self.text.font {
                None => self.put_internal(code)?,
                Some(font) => self.put_rendered(font, code, color)?,
            }
        }

        if gradient.is_some() && internal {
            let fore = self.text.fore_color;
            self.set_foreground_color(fore)?;
        }
        Ok(())
    }

    /// Move the cursor to (`x`, `y`) and write `text` there. With `x` at
    /// [`Pos::Center`] the string is centered on the screen's middle column and on `y`.
    pub fn print_at(&mut self, text: &str, x: impl Into<Pos>, y: impl Into<Pos>) -> Result<(), DisplayError> {
        let x = x.into();
        self.set_cursor(x, y, x == Pos::Center)?;
        self.write_text(text)
    }

    fn new_line(&mut self) {
        let line = self.text.line_height();
        self.text.cursor = (0, self.text.cursor.1.saturating_add(line));
    }

    fn put_internal(&mut self, code: u8) -> Result<(), DisplayError> {
        match code {
            b'\r' => Ok(()),
            b'\n' => {
                self.new_line();
                let (x, y) = self.text.cursor;
                self.text_position(x, y)
            }
            _ => {
                let advance = i16::from(self.text.font_w).saturating_mul(i16::from(self.text.scale_x));
                let glyph_h = i16::from(self.text.font_h).saturating_mul(i16::from(self.text.scale_y));
                let (x, y) = self.text.cursor;
                if x < 0
                    || y < 0
                    || x.saturating_add(advance) > self.geometry.width as i16
                    || y.saturating_add(glyph_h) > self.geometry.height as i16
                {
                    return Ok(());
                }
                self.interface.cmd(Cmd::MRWC)?;
                self.interface.data(code)?;
                self.wait_busy(Flag::STATUS_MEMORY_BUSY)?;
                self.text.cursor.0 = x + advance + i16::from(self.text.spacing);
                Ok(())
            }
        }
    }

    fn put_rendered(&mut self, font: &'static Font, code: u8, color: Color) -> Result<(), DisplayError> {
        let (scale_x, scale_y) = (i16::from(self.text.scale_x), i16::from(self.text.scale_y));
        let glyph_h = i16::from(font.height).saturating_mul(scale_y);
        let spacing = i16::from(self.text.spacing);
        match code {
            b'\r' => Ok(()),
            b'\n' => {
                self.new_line();
                Ok(())
            }
            b' ' => {
                let w = i16::from(self.text.space_width).saturating_mul(scale_x);
                let (x, y) = self.text.cursor;
                if !self.text.transparent {
                    let back = self.text.back_color;
                    self.fill_rect(x, y, w, glyph_h, back)?;
                }
                self.text.cursor.0 = x.saturating_add(w).saturating_add(spacing);
                Ok(())
            }
            _ => {
                let Some(glyph) = font.glyph(code) else {
                    return Ok(());
                };
                let w = i16::from(glyph.width).saturating_mul(scale_x);
                if self.text.cursor.0.saturating_add(w) > self.geometry.width as i16 {
                    self.new_line();
                }
                let (x, y) = self.text.cursor;
                for run in GlyphRuns::new(glyph, font.height) {
                    self.fill_rect(
                        x.saturating_add(i16::from(run.x).saturating_mul(scale_x)),
                        y.saturating_add(i16::from(run.row).saturating_mul(scale_y)),
                        i16::from(run.len).saturating_mul(scale_x),
                        scale_y,
                        color,
                    )?;
                }
                self.text.cursor.0 = x.saturating_add(w).saturating_add(spacing);
                Ok(())
            }
        }
    }
}

impl<SPI, RST, DELAY, CLK> fmt::Write for Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s).map_err(|_| fmt::Error)
    }
}
