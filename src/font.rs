//! Bitmap fonts rendered by the driver instead of the controller.
//!
//! A glyph bitmap is packed row after row, most significant bit first, with no padding
//! at the end of a row.

/// One character of a [`Font`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// Character code, Latin-1.
    pub code: u8,
    /// Width in pixels.
    pub width: u8,
    /// Packed bitmap.
    pub data: &'static [u8],
}

/// Whether every glyph of a font has the same width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphWidth {
    /// Every glyph is this wide.
    Fixed(u8),
    /// Each glyph carries its own width. Such a font must contain a space.
    Variable,
}

/// A font table owned by the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    /// Glyph height in pixels.
    pub height: u8,
    /// Width rule.
    pub width: GlyphWidth,
    /// Glyphs, searched in order.
    pub glyphs: &'static [Glyph],
}

impl Font {
    /// The glyph for `code`, if the font has one.
    pub fn glyph(&self, code: u8) -> Option<&'static Glyph> {
        self.glyphs.iter().find(|g| g.code == code)
    }

    /// Advance of a space. `None` for a variable font without a space glyph.
    pub(crate) fn space_width(&self) -> Option<u8> {
        match self.width {
            GlyphWidth::Fixed(w) => Some(w),
            GlyphWidth::Variable => self.glyph(b' ').map(|g| g.width),
        }
    }

    /// Unscaled width of a run of character codes. Line breaks and unknown codes add
    /// nothing.
    pub(crate) fn text_width<I: IntoIterator<Item = u8>>(&self, codes: I, space: u8) -> u16 {
        codes
            .into_iter()
            .map(|code| match (code, self.width) {
                (b'\r' | b'\n', _) => 0,
                (b' ', _) => u16::from(space),
                (_, GlyphWidth::Fixed(w)) => u16::from(w),
                (_, GlyphWidth::Variable) => self.glyph(code).map_or(0, |g| u16::from(g.width)),
            })
            .fold(0, u16::saturating_add)
    }
}

/// A horizontal run of set pixels in a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Run {
    pub row: u8,
    pub x: u8,
    pub len: u8,
}

/// Runs of set pixels in `glyph`, row by row, covering at most `height` rows.
///
/// Rendering one rectangle per run instead of one write per pixel is what makes
/// software fonts usable over SPI.
pub(crate) struct GlyphRuns {
    data: &'static [u8],
    width: u8,
    height: u8,
    row: u8,
    col: u8,
}

impl GlyphRuns {
    pub fn new(glyph: &Glyph, height: u8) -> Self {
        let bits = glyph.data.len() * 8;
        let rows = if glyph.width == 0 {
            0
        } else {
            (bits / usize::from(glyph.width)).min(usize::from(height)) as u8
        };
        GlyphRuns {
            data: glyph.data,
            width: glyph.width,
            height: rows,
            row: 0,
            col: 0,
        }
    }

    fn bit(&self, row: u8, col: u8) -> bool {
        let index = usize::from(row) * usize::from(self.width) + usize::from(col);
        self.data[index / 8] & (0x80 >> (index % 8)) != 0
    }
}

impl Iterator for GlyphRuns {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        while self.row < self.height {
            while self.col < self.width {
                if self.bit(self.row, self.col) {
                    let start = self.col;
                    while self.col < self.width && self.bit(self.row, self.col) {
                        self.col += 1;
                    }
                    return Some(Run {
                        row: self.row,
                        x: start,
                        len: self.col - start,
                    });
                }
                self.col += 1;
            }
            self.row += 1;
            self.col = 0;
        }
        None
    }
}
