//! Pixels and hardware accelerated shapes.
//!
//! Every call takes logical coordinates. Degenerate input collapses to a single pixel
//! or is dropped, and anything the shape engine cannot take is clamped first.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::arc::{split_sweep, ArcSpans};
use crate::cmd::Cmd;
use crate::color::{Color, ColorDepth};
use crate::driver::{DisplayError, Ra8875};
use crate::flag::Flag;
use crate::geometry::{
    check_limits, clamp_circle_radius, clamp_corner_radius, clamp_ellipse_axes, triangle_fillable, Pos,
};
use crate::interface::{BusSpeed, SpeedControl};

/// Which quarter of an ellipse [`Ra8875::draw_curve`] draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurvePart {
    /// Lower left.
    BottomLeft,
    /// Upper left.
    TopLeft,
    /// Upper right.
    TopRight,
    /// Lower right.
    BottomRight,
}

impl CurvePart {
    const fn bits(self) -> u8 {
        match self {
            CurvePart::BottomLeft => 0,
            CurvePart::TopLeft => 1,
            CurvePart::TopRight => 2,
            CurvePart::BottomRight => 3,
        }
    }
}

impl From<u8> for CurvePart {
    fn from(value: u8) -> Self {
        match value % 4 {
            0 => CurvePart::BottomLeft,
            1 => CurvePart::TopLeft,
            2 => CurvePart::TopRight,
            _ => CurvePart::BottomRight,
        }
    }
}

fn deg_cos(degrees: f32) -> f32 {
    libm::cosf(degrees * core::f32::consts::PI / 180.0)
}

fn deg_sin(degrees: f32) -> f32 {
    libm::sinf(degrees * core::f32::consts::PI / 180.0)
}

fn round(v: f32) -> i16 {
    libm::roundf(v) as i16
}

impl<SPI, RST, DELAY, CLK> Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    /// Graphics mode plus `color` in the foreground register. The text engine puts its
    /// own colors back before it draws again.
    fn prepare_shape(&mut self, color: Color) -> Result<(), DisplayError> {
        self.leave_text_mode()?;
        self.text.recover_color = true;
        if color != self.fore_color {
            self.set_foreground_color(color)?;
        }
        Ok(())
    }

    fn write_memory_color(&mut self, color: Color) -> Result<(), DisplayError> {
        match self.layers.depth {
            ColorDepth::Bpp16 => self.interface.data16(color.0),
            ColorDepth::Bpp8 => self.interface.data(color.to_332()),
        }
    }

    fn line_addressing(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) -> Result<(), DisplayError> {
        self.interface.write_register16(Cmd::DLHSR0, x0 as u16)?;
        self.interface.write_register16(Cmd::DLVSR0, y0 as u16)?;
        self.interface.write_register16(Cmd::DLHER0, x1 as u16)?;
        self.interface.write_register16(Cmd::DLVER0, y1 as u16)
    }

    fn curve_addressing(&mut self, x: i16, y: i16, a: i16, b: i16) -> Result<(), DisplayError> {
        self.interface.write_register16(Cmd::DEHR0, x as u16)?;
        self.interface.write_register16(Cmd::DEVR0, y as u16)?;
        self.interface.write_register16(Cmd::ELL_A0, a as u16)?;
        self.interface.write_register16(Cmd::ELL_B0, b as u16)
    }

    /// Write one pixel.
    pub fn draw_pixel(&mut self, x: i16, y: i16, color: Color) -> Result<(), DisplayError> {
        self.leave_text_mode()?;
        self.set_xy(x, y)?;
        self.interface.cmd(Cmd::MRWC)?;
        self.write_memory_color(color)
    }

    /// Write a horizontal run of pixels starting at (`x`, `y`).
    ///
    /// In portrait the memory cursor advances along the wrong axis, so every pixel is
    /// addressed on its own.
    pub fn draw_pixels(&mut self, pixels: &[Color], x: i16, y: i16) -> Result<(), DisplayError> {
        self.leave_text_mode()?;
        if self.is_portrait() {
            for (i, &color) in pixels.iter().enumerate() {
                self.set_xy(x.saturating_add(i as i16), y)?;
                self.interface.cmd(Cmd::MRWC)?;
                self.write_memory_color(color)?;
            }
            return Ok(());
        }
        self.set_xy(x, y)?;
        self.interface.cmd(Cmd::MRWC)?;
        self.stream_colors(pixels.iter().copied())
    }

    pub(crate) fn stream_colors<I>(&mut self, colors: I) -> Result<(), DisplayError>
    where
        I: IntoIterator<Item = Color>,
    {
        match self.layers.depth {
            ColorDepth::Bpp16 => self.interface.write_pixels(colors.into_iter().map(|c| c.0), true),
            ColorDepth::Bpp8 => self
                .interface
                .write_pixels(colors.into_iter().map(|c| u16::from(c.to_332())), false),
        }
    }

    /// Read back one pixel. At 8bpp the RGB332 byte is returned in the low bits.
    pub fn get_pixel(&mut self, x: i16, y: i16) -> Result<Color, DisplayError> {
        self.set_xy(x, y)?;
        self.leave_text_mode()?;
        self.interface.cmd(Cmd::MRWC)?;
        match self.layers.depth {
            ColorDepth::Bpp16 => {
                // one dummy word first
                let mut buf = [0u8; 4];
                self.interface.read_memory(&mut buf)?;
                Ok(Color(u16::from_be_bytes([buf[2], buf[3]])))
            }
            ColorDepth::Bpp8 => {
                let mut buf = [0u8; 2];
                self.interface.read_memory(&mut buf)?;
                Ok(Color(u16::from(buf[1])))
            }
        }
    }

    /// Continue the current memory write with `count` pixels of one color.
    pub fn push_pixels(&mut self, count: u32, color: Color) -> Result<(), DisplayError> {
        self.leave_text_mode()?;
        self.stream_colors(core::iter::repeat(color).take(count as usize))
    }

    /// Fill the active window.
    pub fn fill_window(&mut self, color: Color) -> Result<(), DisplayError> {
        let right = self.geometry.panel_width as i16 - 1;
        let bottom = self.geometry.panel_height as i16 - 1;
        self.line_addressing(0, 0, right, bottom)?;
        self.set_foreground_color(color)?;
        self.interface
            .write_register(Cmd::DCR, Flag::LINE_START | Flag::SHAPE_FILL | Flag::SHAPE_SQUARE)?;
        self.wait_poll(Cmd::DCR, Flag::LINE_STATUS)?;
        self.text.recover_color = true;
        Ok(())
    }

    /// Fill the whole screen, resetting the active window first.
    pub fn clear_screen(&mut self, color: Color) -> Result<(), DisplayError> {
        self.set_active_window_full()?;
        self.fill_window(color)
    }

    /// Dots on a `spacing` grid (at least 2) inside the rectangle.
    pub fn draw_mesh(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        spacing: u8,
        color: Color,
    ) -> Result<(), DisplayError> {
        let spacing = spacing.max(2) as usize;
        let (width, height) = (self.geometry.width as i16, self.geometry.height as i16);
        let right = x.saturating_add(w).min(width).saturating_sub(1);
        let bottom = y.saturating_add(h).min(height).saturating_sub(1);
        for row in (y..=bottom).step_by(spacing) {
            for col in (x..=right).step_by(spacing) {
                self.draw_pixel(col, row, color)?;
            }
        }
        Ok(())
    }

    /// Line between two points, both ends included.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) -> Result<(), DisplayError> {
        if x0 == x1 && y0 == y1 {
            return self.draw_pixel(x0, y0, color);
        }
        self.prepare_shape(color)?;
        let (x0, y0) = self.geometry.to_physical(x0, y0);
        let (x1, y1) = self.geometry.to_physical(x1, y1);
        self.line_addressing(x0, y0, x1, y1)?;
        self.interface.write_register(Cmd::DCR, Flag::LINE_START)?;
        self.wait_poll(Cmd::DCR, Flag::LINE_STATUS)?;
        Ok(())
    }

    /// Line of `length` pixels from (`x`, `y`) at `angle` degrees plus the angle offset.
    pub fn draw_line_angle(
        &mut self,
        x: i16,
        y: i16,
        angle: i16,
        length: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.draw_line_angle_from(x, y, angle, 0, length, color)
    }

    /// Like [`Ra8875::draw_line_angle`] but the line begins `start` pixels out.
    pub fn draw_line_angle_from(
        &mut self,
        x: i16,
        y: i16,
        angle: i16,
        start: u16,
        length: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        if length < 2 {
            return self.draw_pixel(x, y, color);
        }
        let a = f32::from(angle) + f32::from(self.config.angle_offset);
        let (c, s) = (deg_cos(a), deg_sin(a));
        let near = f32::from(start);
        let far = near + f32::from(length - 1);
        self.draw_line(
            x.saturating_add(round(near * c)),
            y.saturating_add(round(near * s)),
            x.saturating_add(round(far * c)),
            y.saturating_add(round(far * s)),
            color,
        )
    }

    /// Vertical line `h` pixels tall.
    pub fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: Color) -> Result<(), DisplayError> {
        if h < 2 {
            self.draw_pixel(x, y, color)
        } else {
            self.draw_line(x, y, x, y.saturating_add(h - 1), color)
        }
    }

    /// Horizontal line `w` pixels wide.
    pub fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: Color) -> Result<(), DisplayError> {
        if w < 2 {
            self.draw_pixel(x, y, color)
        } else {
            self.draw_line(x, y, x.saturating_add(w - 1), y, color)
        }
    }

    /// Rectangle outline.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) -> Result<(), DisplayError> {
        self.rect(x, y, w, h, color, false)
    }

    /// Filled rectangle.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) -> Result<(), DisplayError> {
        self.rect(x, y, w, h, color, true)
    }

    fn rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color, filled: bool) -> Result<(), DisplayError> {
        if w < 2 && h < 2 {
            return self.draw_pixel(x, y, color);
        }
        if w < 1 || h < 1 {
            return Ok(());
        }
        let (pw, ph) = (self.geometry.panel_width as i16, self.geometry.panel_height as i16);
        let (x1, y1) = self.geometry.to_physical(x, y);
        let (x2, y2) = self.geometry.to_physical(x.saturating_add(w - 1), y.saturating_add(h - 1));
        if (x1 < 0 && x2 < 0) || (x1 >= pw && x2 >= pw) || (y1 < 0 && y2 < 0) || (y1 >= ph && y2 >= ph) {
            return Ok(());
        }
        let (x1, y1) = check_limits(x1, y1, pw as u16, ph as u16);
        let (x2, y2) = check_limits(x2, y2, pw as u16, ph as u16);
        self.prepare_shape(color)?;
        self.line_addressing(x1, y1, x2, y2)?;
        let mut dcr = Flag::LINE_START | Flag::SHAPE_SQUARE;
        if filled {
            dcr |= Flag::SHAPE_FILL;
        }
        self.interface.write_register(Cmd::DCR, dcr)?;
        self.wait_poll(Cmd::DCR, Flag::LINE_STATUS)?;
        Ok(())
    }

    /// Rectangle outline with rounded corners.
    pub fn draw_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.round_rect(x, y, w, h, r, color, false)
    }

    /// Filled rectangle with rounded corners.
    pub fn fill_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.round_rect(x, y, w, h, r, color, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: Color,
        filled: bool,
    ) -> Result<(), DisplayError> {
        if w < 2 && h < 2 {
            return self.draw_pixel(x, y, color);
        }
        if w < 1 || h < 1 {
            return Ok(());
        }
        let r = clamp_corner_radius(w, h, r);
        if r < 1 {
            return self.rect(x, y, w, h, color, filled);
        }
        let (pw, ph) = (self.geometry.panel_width as i16, self.geometry.panel_height as i16);
        let (x0, y0) = self.geometry.to_physical(x, y);
        let (x1, y1) = self.geometry.to_physical(x.saturating_add(w - 1), y.saturating_add(h - 1));
        if (x0 < 0 && x1 < 0) || (x0 >= pw && x1 >= pw) || (y0 < 0 && y1 < 0) || (y0 >= ph && y1 >= ph) {
            return Ok(());
        }
        let (x0, y0) = check_limits(x0, y0, pw as u16, ph as u16);
        let (x1, y1) = check_limits(x1, y1, pw as u16, ph as u16);
        self.prepare_shape(color)?;
        self.line_addressing(x0, y0, x1, y1)?;
        self.interface.write_register16(Cmd::ELL_A0, r as u16)?;
        self.interface.write_register16(Cmd::ELL_B0, r as u16)?;
        let mut cmd = Flag::ELLIPSE_START | Flag::ELLIPSE_ROUND_RECT;
        if filled {
            cmd |= Flag::ELLIPSE_FILL;
        }
        self.interface.write_register(Cmd::ELLIPSE, cmd)?;
        self.wait_poll(Cmd::ELLIPSE, Flag::ELLIPSE_STATUS)?;
        Ok(())
    }

    /// Circle outline. Either center coordinate may be [`Pos::Center`].
    pub fn draw_circle(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        r: i16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let x = x.into().resolve(self.geometry.width);
        let y = y.into().resolve(self.geometry.height);
        self.circle(x, y, r, color, false)
    }

    /// Filled circle. Either center coordinate may be [`Pos::Center`].
    pub fn fill_circle(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        r: i16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let x = x.into().resolve(self.geometry.width);
        let y = y.into().resolve(self.geometry.height);
        self.circle(x, y, r, color, true)
    }

    fn circle(&mut self, x: i16, y: i16, r: i16, color: Color, filled: bool) -> Result<(), DisplayError> {
        if r < 2 {
            return self.draw_pixel(x, y, color);
        }
        let (x, y) = self.geometry.to_physical(x, y);
        let r = clamp_circle_radius(r, self.geometry.panel_width, self.geometry.panel_height);
        self.prepare_shape(color)?;
        self.interface.write_register16(Cmd::DCHR0, x as u16)?;
        self.interface.write_register16(Cmd::DCVR0, y as u16)?;
        self.interface.write_register(Cmd::DCRR, r as u8)?;
        self.interface.cmd(Cmd::DCR)?;
        let mut dcr = Flag::CIRCLE_START;
        if filled {
            dcr |= Flag::SHAPE_FILL;
        }
        // the start bit is only latched at a low bus clock
        self.interface.data_at(BusSpeed::Read, dcr)?;
        // a single poll returns before the engine has finished on real panels
        for _ in 0..3 {
            self.wait_poll(Cmd::DCR, Flag::CIRCLE_STATUS)?;
        }
        Ok(())
    }

    /// Ellipse outline around a center; either coordinate may be [`Pos::Center`].
    pub fn draw_ellipse(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        long_axis: i16,
        short_axis: i16,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.ellipse(x.into(), y.into(), long_axis, short_axis, None, color, false)
    }

    /// Filled ellipse.
    pub fn fill_ellipse(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        long_axis: i16,
        short_axis: i16,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.ellipse(x.into(), y.into(), long_axis, short_axis, None, color, true)
    }

    /// One quarter of an ellipse outline.
    pub fn draw_curve(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        long_axis: i16,
        short_axis: i16,
        part: CurvePart,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.ellipse(x.into(), y.into(), long_axis, short_axis, Some(part), color, false)
    }

    /// One filled quarter of an ellipse.
    pub fn fill_curve(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        long_axis: i16,
        short_axis: i16,
        part: CurvePart,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.ellipse(x.into(), y.into(), long_axis, short_axis, Some(part), color, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        x: Pos,
        y: Pos,
        long_axis: i16,
        short_axis: i16,
        part: Option<CurvePart>,
        color: Color,
        filled: bool,
    ) -> Result<(), DisplayError> {
        let x = x.resolve(self.geometry.width);
        let y = y.resolve(self.geometry.height);
        if long_axis <= 1 && short_axis <= 1 {
            return self.draw_pixel(x, y, color);
        }
        let (pw, ph) = (self.geometry.panel_width, self.geometry.panel_height);
        let (x, y) = self.geometry.to_physical(x, y);
        let (horizontal, vertical) = self.geometry.to_physical(long_axis, short_axis);
        let (horizontal, vertical) = clamp_ellipse_axes(horizontal, vertical, pw, ph);
        let (x, y) = check_limits(x, y, pw, ph);
        self.prepare_shape(color)?;
        self.curve_addressing(x, y, horizontal, vertical)?;
        let mut cmd = Flag::ELLIPSE_START;
        if filled {
            cmd |= Flag::ELLIPSE_FILL;
        }
        if let Some(part) = part {
            // quarters are numbered against the scan; portrait mirrors two of them
            let bits = match (self.is_portrait(), part.bits()) {
                (true, 0) => 2,
                (true, 2) => 0,
                (_, bits) => bits,
            };
            cmd |= Flag::ELLIPSE_CURVE | bits;
        }
        self.interface.write_register(Cmd::ELLIPSE, cmd)?;
        self.wait_poll(Cmd::ELLIPSE, Flag::ELLIPSE_STATUS)?;
        Ok(())
    }

    /// Triangle outline.
    pub fn draw_triangle(
        &mut self,
        p0: (i16, i16),
        p1: (i16, i16),
        p2: (i16, i16),
        color: Color,
    ) -> Result<(), DisplayError> {
        self.triangle(p0, p1, p2, color, false)
    }

    /// Filled triangle. Slivers and coincident corners are drawn as outlines, the
    /// fill engine misdraws them.
    pub fn fill_triangle(
        &mut self,
        p0: (i16, i16),
        p1: (i16, i16),
        p2: (i16, i16),
        color: Color,
    ) -> Result<(), DisplayError> {
        self.triangle(p0, p1, p2, color, true)
    }

    fn triangle(
        &mut self,
        p0: (i16, i16),
        p1: (i16, i16),
        p2: (i16, i16),
        color: Color,
        filled: bool,
    ) -> Result<(), DisplayError> {
        let (w, h) = (self.geometry.width as i16, self.geometry.height as i16);
        if p0.0 >= w || p1.0 >= w || p2.0 >= w || p0.1 >= h || p1.1 >= h || p2.1 >= h {
            return Ok(());
        }
        if p0 == p1 && p0 == p2 {
            return self.draw_pixel(p0.0, p0.1, color);
        }
        let p0 = self.geometry.to_physical(p0.0, p0.1);
        let p1 = self.geometry.to_physical(p1.0, p1.1);
        let p2 = self.geometry.to_physical(p2.0, p2.1);
        let filled = filled && triangle_fillable(p0, p1, p2);
        self.prepare_shape(color)?;
        self.line_addressing(p0.0, p0.1, p1.0, p1.1)?;
        self.interface.write_register16(Cmd::DTPH0, p2.0 as u16)?;
        self.interface.write_register16(Cmd::DTPV0, p2.1 as u16)?;
        let mut dcr = Flag::LINE_START | Flag::SHAPE_TRIANGLE;
        if filled {
            dcr |= Flag::SHAPE_FILL;
        }
        self.interface.write_register(Cmd::DCR, dcr)?;
        self.wait_poll(Cmd::DCR, Flag::LINE_STATUS)?;
        Ok(())
    }

    /// Quadrilateral outline through four corners in order.
    pub fn draw_quad(&mut self, corners: [(i16, i16); 4], color: Color) -> Result<(), DisplayError> {
        for i in 0..4 {
            let (a, b) = (corners[i], corners[(i + 1) % 4]);
            self.draw_line(a.0, a.1, b.0, b.1, color)?;
        }
        Ok(())
    }

    /// Filled quadrilateral from triangles. `triangulated` adds a third triangle that
    /// closes gaps the two-triangle version leaves on concave shapes.
    pub fn fill_quad(
        &mut self,
        corners: [(i16, i16); 4],
        color: Color,
        triangulated: bool,
    ) -> Result<(), DisplayError> {
        let [p0, p1, p2, p3] = corners;
        self.triangle(p0, p1, p2, color, true)?;
        if triangulated {
            self.triangle(p2, p3, p0, color, true)?;
        }
        self.triangle(p1, p2, p3, color, true)
    }

    /// Regular polygon with at least three sides, `rotation` in degrees.
    pub fn draw_polygon(
        &mut self,
        x: impl Into<Pos>,
        y: impl Into<Pos>,
        sides: u8,
        diameter: i16,
        rotation: f32,
        color: Color,
    ) -> Result<(), DisplayError> {
        let cx = f32::from(x.into().resolve(self.geometry.width));
        let cy = f32::from(y.into().resolve(self.geometry.height));
        let sides = sides.max(3);
        let step = 360.0 / f32::from(sides);
        let d = f32::from(diameter);
        let vertex = |i: u8| {
            let a = f32::from(i) * step + rotation;
            ((cx + deg_sin(a) * d) as i16, (cy + deg_cos(a) * d) as i16)
        };
        for i in 0..sides {
            let (a, b) = (vertex(i), vertex(i + 1));
            self.draw_line(a.0, a.1, b.0, b.1, color)?;
        }
        Ok(())
    }

    /// Ring segment `thickness` pixels deep from `start` to `end`, in the units set
    /// by [`Ra8875::set_arc_params`].
    ///
    /// A sweep from zero to the full turn draws the whole ring.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        cx: i16,
        cy: i16,
        radius: u16,
        thickness: u16,
        start: f32,
        end: f32,
        color: Color,
    ) -> Result<(), DisplayError> {
        let max = self.config.arc_angle_max;
        if max <= 0.0 {
            return Ok(());
        }
        let (start, end) = if start == 0.0 && end == max {
            (0.0, 360.0)
        } else {
            let offset = self.config.arc_angle_offset;
            (start / max * 360.0 + offset, end / max * 360.0 + offset)
        };
        for (from, to) in split_sweep(start, end).into_iter().flatten() {
            for span in ArcSpans::new(radius, thickness, from, to) {
                self.draw_fast_vline(cx.saturating_add(span.x), cy.saturating_add(span.y), span.len, color)?;
            }
        }
        Ok(())
    }

    /// Units of a full turn for [`Ra8875::draw_arc`], and where zero sits in degrees
    /// from three o'clock.
    pub fn set_arc_params(&mut self, max: f32, offset: f32) {
        self.config.arc_angle_max = max;
        self.config.arc_angle_offset = offset;
    }

    /// Extra degrees for angled lines, on top of the default that puts zero at twelve
    /// o'clock.
    pub fn set_angle_offset(&mut self, offset: i16) {
        self.config.angle_offset = DEFAULT_ANGLE_OFFSET.saturating_add(offset);
    }
}

/// Angle offset that puts zero degrees at twelve o'clock.
pub(crate) const DEFAULT_ANGLE_OFFSET: i16 = -90;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;
    use crate::testing::*;

    #[test]
    fn tiny_rects_become_pixels() {
        let (mut lcd, bus) = ready();
        lcd.fill_rect(5, 6, 1, 1, Color::RED).unwrap();
        lcd.draw_rect(5, 6, 0, 1, Color::RED).unwrap();
        lcd.draw_rect(5, 6, 1, 0, Color::RED).unwrap();
        let state = bus.state();
        assert!(state.writes_to(Cmd::DCR).is_empty());
        assert_eq!(state.memory.len(), 6);
        assert_eq!(state.reg16(Cmd::CURH0), 5);
        assert_eq!(state.reg16(Cmd::CURV0), 6);
    }

    #[test]
    fn rect_with_zero_side_is_dropped() {
        let (mut lcd, bus) = ready();
        lcd.fill_rect(5, 6, 10, 0, Color::RED).unwrap();
        assert!(bus.state().writes.is_empty());
    }

    #[test]
    fn rect_is_clipped_not_rejected() {
        let (mut lcd, bus) = ready();
        lcd.fill_rect(790, 470, 30, 30, Color::RED).unwrap();
        let state = bus.state();
        assert_eq!(state.reg16(Cmd::DLHSR0), 790);
        assert_eq!(state.reg16(Cmd::DLHER0), 799);
        assert_eq!(state.reg16(Cmd::DLVER0), 479);
        assert_eq!(state.last_write(Cmd::DCR), Some(0xB0));
    }

    #[test]
    fn rect_fully_off_panel_is_skipped() {
        let (mut lcd, bus) = ready();
        lcd.draw_rect(900, 10, 20, 20, Color::RED).unwrap();
        assert!(bus.state().writes_to(Cmd::DCR).is_empty());
    }

    #[test]
    fn line_programs_inclusive_endpoints() {
        let (mut lcd, bus) = ready();
        lcd.draw_line(0, 0, 2, 0, Color::RED).unwrap();
        let state = bus.state();
        assert_eq!(state.reg16(Cmd::DLHSR0), 0);
        assert_eq!(state.reg16(Cmd::DLHER0), 2);
        assert_eq!(state.reg16(Cmd::DLVSR0), 0);
        assert_eq!(state.reg16(Cmd::DLVER0), 0);
        assert_eq!(state.last_write(Cmd::DCR), Some(Flag::LINE_START));
        assert_eq!(state.last_write(Cmd::FGCR0), Some(0x1F));
    }

    #[test]
    fn zero_length_line_is_a_pixel() {
        let (mut lcd, bus) = ready();
        lcd.draw_line(3, 3, 3, 3, Color::RED).unwrap();
        assert!(bus.state().writes_to(Cmd::DCR).is_empty());
        assert_eq!(bus.state().memory, [0xF8, 0x00]);
    }

    #[test]
    fn portrait_line_swaps_axes() {
        let (mut lcd, bus) = ready();
        lcd.set_rotation(Rotation::Rotate90).unwrap();
        lcd.draw_line(1, 2, 3, 4, Color::RED).unwrap();
        let state = bus.state();
        assert_eq!(state.reg16(Cmd::DLHSR0), 2);
        assert_eq!(state.reg16(Cmd::DLVSR0), 1);
        assert_eq!(state.reg16(Cmd::DLHER0), 4);
        assert_eq!(state.reg16(Cmd::DLVER0), 3);
    }

    #[test]
    fn coincident_triangle_is_never_filled() {
        let (mut lcd, bus) = ready();
        lcd.fill_triangle((10, 10), (10, 10), (50, 80), Color::GREEN).unwrap();
        assert_eq!(bus.state().last_write(Cmd::DCR), Some(0x81));
        lcd.fill_triangle((10, 10), (100, 10), (50, 80), Color::GREEN).unwrap();
        assert_eq!(bus.state().last_write(Cmd::DCR), Some(0xA1));
    }

    #[test]
    fn triangle_with_one_point_is_a_pixel() {
        let (mut lcd, bus) = ready();
        lcd.fill_triangle((7, 7), (7, 7), (7, 7), Color::GREEN).unwrap();
        assert!(bus.state().writes_to(Cmd::DCR).is_empty());
        assert_eq!(bus.state().memory.len(), 2);
    }

    #[test]
    fn circle_radius_is_clamped_and_polled_three_times() {
        let (mut lcd, bus) = ready();
        bus.clear_log();
        lcd.fill_circle(400, 240, 500, Color::BLUE).unwrap();
        let state = bus.state();
        assert_eq!(state.last_write(Cmd::DCRR), Some(239));
        assert_eq!(state.reg16(Cmd::DCHR0), 400);
        assert_eq!(state.last_write(Cmd::DCR), Some(Flag::CIRCLE_START | Flag::SHAPE_FILL));
        let polls = state.commands.iter().filter(|&&c| c == Cmd::DCR).count();
        assert_eq!(polls, 4);
    }

    #[test]
    fn circle_start_goes_out_at_read_speed() {
        let (mut lcd, bus) = ready_with_speed_log();
        bus.clear_speeds();
        lcd.draw_circle(100, 100, 20, Color::BLUE).unwrap();
        let speeds = bus.speeds();
        assert_eq!(&speeds[..2], &[BusSpeed::Read, BusSpeed::Write]);
    }

    #[test]
    fn centered_circle_uses_logical_middle() {
        let (mut lcd, bus) = ready();
        lcd.set_rotation(Rotation::Rotate90).unwrap();
        lcd.draw_circle(Pos::Center, Pos::Center, 50, Color::BLUE).unwrap();
        assert_eq!(bus.state().reg16(Cmd::DCHR0), 400);
        assert_eq!(bus.state().reg16(Cmd::DCVR0), 240);
    }

    #[test]
    fn small_circle_is_a_pixel() {
        let (mut lcd, bus) = ready();
        lcd.draw_circle(10, 10, 1, Color::BLUE).unwrap();
        lcd.draw_circle(10, 10, -4, Color::BLUE).unwrap();
        assert!(bus.state().writes_to(Cmd::DCR).is_empty());
    }

    #[test]
    fn ellipse_axes_follow_portrait() {
        let (mut lcd, bus) = ready();
        lcd.set_rotation(Rotation::Rotate90).unwrap();
        lcd.fill_ellipse(100, 200, 300, 50, Color::BLUE).unwrap();
        let state = bus.state();
        assert_eq!(state.reg16(Cmd::DEHR0), 200);
        assert_eq!(state.reg16(Cmd::DEVR0), 100);
        assert_eq!(state.reg16(Cmd::ELL_A0), 50);
        assert_eq!(state.reg16(Cmd::ELL_B0), 239);
        assert_eq!(state.last_write(Cmd::ELLIPSE), Some(0xC0));
    }

    #[test]
    fn curve_parts_mirror_in_portrait() {
        let (mut lcd, bus) = ready();
        lcd.draw_curve(100, 100, 40, 20, CurvePart::BottomLeft, Color::BLUE).unwrap();
        assert_eq!(bus.state().last_write(Cmd::ELLIPSE), Some(0x90));
        lcd.set_rotation(Rotation::Rotate270).unwrap();
        lcd.fill_curve(100, 100, 40, 20, CurvePart::BottomLeft, Color::BLUE).unwrap();
        assert_eq!(bus.state().last_write(Cmd::ELLIPSE), Some(0xD2));
    }

    #[test]
    fn round_rect_radius_fits_short_side() {
        let (mut lcd, bus) = ready();
        lcd.fill_round_rect(0, 0, 100, 40, 30, Color::BLUE).unwrap();
        assert_eq!(bus.state().reg16(Cmd::ELL_A0), 19);
        assert_eq!(bus.state().last_write(Cmd::ELLIPSE), Some(0xE0));
        lcd.draw_round_rect(0, 0, 100, 40, 0, Color::BLUE).unwrap();
        assert_eq!(bus.state().last_write(Cmd::DCR), Some(0x90));
    }

    #[test]
    fn one_shot_color_sets_text_recovery() {
        let (mut lcd, _bus) = ready();
        lcd.text.recover_color = false;
        lcd.draw_line(0, 0, 5, 5, Color::RED).unwrap();
        assert!(lcd.text.recover_color);
        assert_eq!(lcd.foreground_color(), Color::RED);
    }

    #[test]
    fn angled_line_with_default_offset_points_up() {
        let (mut lcd, bus) = ready();
        lcd.draw_line_angle(100, 100, 0, 11, Color::RED).unwrap();
        let state = bus.state();
        assert_eq!(state.reg16(Cmd::DLHER0), 100);
        assert_eq!(state.reg16(Cmd::DLVER0), 90);
        drop(state);
        lcd.draw_line_angle(100, 100, 0, 1, Color::RED).unwrap();
        assert_eq!(bus.state().writes_to(Cmd::DCR).len(), 1);
    }

    #[test]
    fn full_arc_draws_vertical_runs() {
        let (mut lcd, bus) = ready();
        lcd.draw_arc(200, 200, 10, 3, 0.0, 360.0, Color::RED).unwrap();
        let state = bus.state();
        // 32 columns, each at least two pixels tall
        assert_eq!(state.writes_to(Cmd::DCR).len(), 32);
        assert_eq!(state.writes_to(Cmd::DLHSR0).first(), Some(&191));
        assert_eq!(state.writes_to(Cmd::DLVSR0).first(), Some(&196));
        drop(state);
        lcd.set_arc_params(0.0, 0.0);
        bus.clear_log();
        lcd.draw_arc(200, 200, 10, 3, 0.0, 360.0, Color::RED).unwrap();
        assert!(bus.state().writes.is_empty());
    }

    #[test]
    fn arc_offset_is_in_degrees_for_any_unit() {
        let (mut lcd, bus) = ready();
        lcd.draw_arc(200, 200, 50, 10, 0.0, 90.0, Color::RED).unwrap();
        let degrees = bus.state().writes.clone();
        assert!(!degrees.is_empty());
        lcd.set_arc_params(100.0, -90.0);
        bus.clear_log();
        lcd.draw_arc(200, 200, 50, 10, 0.0, 25.0, Color::RED).unwrap();
        assert_eq!(bus.state().writes, degrees);
    }

    #[test]
    fn extreme_coordinates_never_overflow() {
        let (mut lcd, bus) = ready();
        let (max, min) = (i16::MAX, i16::MIN);
        lcd.draw_fast_hline(max, 0, 10, Color::RED).unwrap();
        lcd.draw_fast_hline(max, 0, max, Color::RED).unwrap();
        lcd.draw_fast_vline(0, max, 10, Color::RED).unwrap();
        lcd.fill_round_rect(32000, 0, 1000, 40, 5, Color::RED).unwrap();
        lcd.draw_round_rect(max, max, max, max, max, Color::RED).unwrap();
        lcd.fill_round_rect(min, min, max, max, 5, Color::RED).unwrap();
        lcd.draw_line_angle(max, max, 45, 100, Color::RED).unwrap();
        lcd.draw_line_angle(min, min, 225, 100, Color::RED).unwrap();
        lcd.draw_arc(max, max, 50, 10, 0.0, 360.0, Color::RED).unwrap();
        lcd.draw_arc(min, min, 50, 10, 0.0, 360.0, Color::RED).unwrap();
        lcd.draw_mesh(min, min, 10, 10, 2, Color::RED).unwrap();
        lcd.draw_mesh(max, max, max, max, 2, Color::RED).unwrap();
        lcd.set_angle_offset(max);
        lcd.draw_line_angle(10, 10, 0, 5, Color::RED).unwrap();
        // a round rect straddling the right edge is clamped to the panel
        bus.clear_log();
        lcd.fill_round_rect(700, 0, 1000, 40, 5, Color::RED).unwrap();
        assert_eq!(bus.state().reg16(Cmd::DLHER0), 799);
    }

    #[test]
    fn mesh_steps_by_spacing() {
        let (mut lcd, bus) = ready();
        lcd.draw_mesh(0, 0, 5, 5, 1, Color::RED).unwrap();
        // spacing raised to 2: 3 x 3 dots
        assert_eq!(bus.state().memory.len(), 9 * 2);
    }

    #[test]
    fn pixels_stream_in_landscape_and_readdress_in_portrait() {
        let (mut lcd, bus) = ready();
        lcd.draw_pixels(&[Color::RED, Color::GREEN, Color::BLUE], 1, 1).unwrap();
        assert_eq!(bus.state().memory, [0xF8, 0x00, 0x07, 0xE0, 0x00, 0x1F]);
        assert_eq!(bus.state().writes_to(Cmd::CURH0).len(), 1);
        lcd.set_rotation(Rotation::Rotate90).unwrap();
        bus.clear_log();
        lcd.draw_pixels(&[Color::RED, Color::GREEN], 1, 1).unwrap();
        assert_eq!(bus.state().writes_to(Cmd::CURV0).len(), 2);
    }

    #[test]
    fn eight_bit_pixels_are_packed() {
        let (mut lcd, bus) = ready();
        lcd.set_color_bpp(8).unwrap();
        bus.clear_log();
        lcd.draw_pixel(0, 0, Color::WHITE).unwrap();
        assert_eq!(bus.state().memory, [0xFF]);
    }

    #[test]
    fn get_pixel_skips_dummy_word() {
        let (mut lcd, bus) = ready();
        bus.state_mut().read_queue.extend([0x00, 0x00, 0xF8, 0x1F]);
        assert_eq!(lcd.get_pixel(3, 4).unwrap(), Color(0xF81F));
    }
}
