//! RGB565 colors and the conversions the controller needs.

/// A 16-bit RGB565 color as stored in display memory at 16bpp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u16);

#[allow(missing_docs)]
impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const CYAN: Color = Color(0x07FF);
    pub const MAGENTA: Color = Color(0xF81F);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const ORANGE: Color = Color(0xFD20);
    pub const PURPLE: Color = Color(0x780F);
    pub const NAVY: Color = Color(0x000F);
    pub const MAROON: Color = Color(0x7800);
    pub const OLIVE: Color = Color(0x7BE0);
    pub const DARK_GREEN: Color = Color(0x03E0);
    pub const DARK_CYAN: Color = Color(0x03EF);
    pub const LIGHT_GREY: Color = Color(0xC618);
    pub const DARK_GREY: Color = Color(0x7BEF);
    pub const GREEN_YELLOW: Color = Color(0xAFE5);
    pub const PINK: Color = Color(0xF81F);
}

impl Color {
    /// Pack 8-bit channels into RGB565, dropping the low bits.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
    }

    /// Expand to 8-bit channels, scaling so full-scale stays full-scale.
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        let c = self.0 as u32;
        let r = ((((c & 0xF800) >> 11) * 527 + 23) >> 6) as u8;
        let g = ((((c & 0x07E0) >> 5) * 259 + 33) >> 6) as u8;
        let b = (((c & 0x001F) * 527 + 23) >> 6) as u8;
        (r, g, b)
    }

    /// Raw 5/6/5 bit fields.
    pub const fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 & 0xF800) >> 11) as u8,
            ((self.0 & 0x07E0) >> 5) as u8,
            (self.0 & 0x001F) as u8,
        )
    }

    /// Pack into the RGB332 byte used for display memory at 8bpp.
    pub const fn to_332(self) -> u8 {
        let (r, g, b) = self.channels();
        let (r, g, b) = (r as u16, g as u16, b as u16);
        (((r * 7 / 28) << 5) | ((g * 7 / 56) << 2) | (b * 3 / 24)) as u8
    }

    /// Blend from `from` to `to` in `div` steps; `pos` 0 is `from`, `pos >= div` is `to`.
    pub fn interpolate(from: Color, to: Color, pos: u16, div: u16) -> Color {
        if pos == 0 {
            return from;
        }
        if pos >= div {
            return to;
        }
        let (r1, g1, b1) = from.to_rgb();
        let (r2, g2, b2) = to.to_rgb();
        let t = f32::from(pos) / f32::from(div);
        let mix = |a: u8, b: u8| ((1.0 - t) * f32::from(a) + t * f32::from(b)) as u8;
        Color::from_rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
    }

    /// Walk a blue, cyan, green, yellow, red spectrum; `value` saturates at 127.
    pub fn spectrum(value: u8) -> Color {
        let value = value.min(127);
        let step = u16::from(value % 32);
        let (r, g, b) = match value / 32 {
            0 => (0, 2 * step, 31),
            1 => (0, 63, 31 - step),
            2 => (step, 63, 0),
            _ => (31, 63 - 2 * step, 0),
        };
        Color((r << 11) | (g << 5) | b)
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Color(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics::pixelcolor::Rgb565) -> Self {
        use embedded_graphics::prelude::IntoStorage;
        Color(color.into_storage())
    }
}

/// Color bit depth of display memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorDepth {
    /// RGB332, leaves room for two layers.
    Bpp8,
    /// RGB565, one layer.
    Bpp16,
}

impl ColorDepth {
    /// Nearest supported depth for a bit count: anything under 16 is 8.
    pub const fn from_bits(bits: u8) -> Self {
        if bits < 16 {
            ColorDepth::Bpp8
        } else {
            ColorDepth::Bpp16
        }
    }

    /// Number of layers display memory holds at this depth.
    pub const fn max_layers(self) -> u8 {
        match self {
            ColorDepth::Bpp8 => 2,
            ColorDepth::Bpp16 => 1,
        }
    }

    /// Right shifts that bring RGB565 fields into the color registers.
    pub(crate) const fn register_shifts(self) -> [u8; 3] {
        match self {
            ColorDepth::Bpp16 => [11, 5, 0],
            ColorDepth::Bpp8 => [13, 8, 3],
        }
    }
}
