//! Color depth, the two display layers, patterns and the block transfer engine.
//!
//! Display memory holds one RGB565 layer or two RGB332 layers, so turning layers on
//! drops the depth to 8bpp and turning them off brings back whatever depth was set
//! before.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::color::ColorDepth;
use crate::driver::{DisplayError, Ra8875};
use crate::flag::Flag;
use crate::interface::SpeedControl;

use log::debug;

/// Depth and layer bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LayerState {
    pub depth: ColorDepth,
    pub max_layers: u8,
    /// 0 for layer 1, 1 for layer 2.
    pub current: u8,
    pub multi: bool,
    pub depth_before_layers: ColorDepth,
}

impl Default for LayerState {
    fn default() -> Self {
        LayerState {
            depth: ColorDepth::Bpp16,
            max_layers: 1,
            current: 0,
            multi: false,
            depth_before_layers: ColorDepth::Bpp16,
        }
    }
}

/// Where memory writes land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteTarget {
    /// Display layer 1.
    Layer1,
    /// Display layer 2. Turns two-layer mode on.
    Layer2,
    /// User character RAM.
    Cgram,
    /// Pattern RAM for block transfers.
    Pattern,
    /// Graphic cursor RAM.
    Cursor,
}

/// How the two layers combine on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerEffect {
    /// Only layer 1 is shown.
    Layer1,
    /// Only layer 2 is shown.
    Layer2,
    /// Lighten overlay.
    Lighten,
    /// Blend with the weights from [`Ra8875::layer_transparency`].
    Transparent,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Floating window.
    Floating,
}

impl LayerEffect {
    const fn bits(self) -> u8 {
        match self {
            LayerEffect::Layer1 => 0b000,
            LayerEffect::Layer2 => 0b001,
            LayerEffect::Lighten => 0b010,
            LayerEffect::Transparent => 0b011,
            LayerEffect::Or => 0b100,
            LayerEffect::And => 0b101,
            LayerEffect::Floating => 0b110,
        }
    }
}

/// Size of a pattern slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternSize {
    /// 8x8 pixels, 16 slots.
    P8x8,
    /// 16x16 pixels, 4 slots.
    P16x16,
}

impl PatternSize {
    /// Pixels per side.
    pub const fn side(self) -> u8 {
        match self {
            PatternSize::P8x8 => 8,
            PatternSize::P16x16 => 16,
        }
    }

    const fn slots(self) -> u8 {
        match self {
            PatternSize::P8x8 => 16,
            PatternSize::P16x16 => 4,
        }
    }
}

/// A display layer as seen by the block transfer engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layer {
    /// Whichever layer writes currently go to.
    #[default]
    Current,
    /// Layer 1.
    One,
    /// Layer 2.
    Two,
}

/// Raster operation applied between source and destination during a block transfer.
/// `S` is the source and `D` the destination.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rop {
    Black,
    NotSOrNotD,
    NotSAndD,
    NotS,
    SAndNotD,
    NotD,
    SXorD,
    NotSAndNotD,
    SAndD,
    NotSXorD,
    D,
    NotSOrD,
    #[default]
    S,
    SOrNotD,
    SOrD,
    White,
}

impl Rop {
    /// The operation in the upper nibble of `BECR1`.
    pub const fn code(self) -> u8 {
        let n = match self {
            Rop::Black => 0,
            Rop::NotSOrNotD => 1,
            Rop::NotSAndD => 2,
            Rop::NotS => 3,
            Rop::SAndNotD => 4,
            Rop::NotD => 5,
            Rop::SXorD => 6,
            Rop::NotSAndNotD => 7,
            Rop::SAndD => 8,
            Rop::NotSXorD => 9,
            Rop::D => 10,
            Rop::NotSOrD => 11,
            Rop::S => 12,
            Rop::SOrNotD => 13,
            Rop::SOrD => 14,
            Rop::White => 15,
        };
        n << 4
    }
}

/// One block transfer. Coordinates are logical.
///
/// With `transparent` the key color from [`Ra8875::set_transparent_color`] is skipped.
/// `monochrome` expands a linear bitmap to the foreground and background colors.
/// `reverse` copies from the far corner for overlapping areas and is ignored together
/// with either of the other two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BteMove {
    /// Source corner.
    pub source: (i16, i16),
    /// Destination corner.
    pub dest: (i16, i16),
    /// Block width.
    pub width: i16,
    /// Block height.
    pub height: i16,
    /// Layer read from.
    pub source_layer: Layer,
    /// Layer written to.
    pub dest_layer: Layer,
    /// Skip the key color.
    pub transparent: bool,
    /// Raster operation.
    pub rop: Rop,
    /// Color expansion from a bitmap.
    pub monochrome: bool,
    /// Copy backwards.
    pub reverse: bool,
}

/// The `BECR1` byte: raster operation in the high nibble, engine operation in the low.
pub(crate) fn compose_rop(rop: Rop, transparent: bool, monochrome: bool, reverse: bool) -> u8 {
    let op = match (transparent, monochrome, reverse) {
        (true, true, _) => Flag::BTE_TRANSPARENT_EXPANSION,
        (true, false, _) => Flag::BTE_TRANSPARENT_MOVE,
        (false, true, _) => Flag::BTE_COLOR_EXPANSION,
        (false, false, true) => Flag::BTE_MOVE_NEGATIVE,
        (false, false, false) => Flag::BTE_MOVE_POSITIVE,
    };
    (rop.code() & 0xF0) | op
}

impl<SPI, RST, DELAY, CLK> Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    pub(crate) fn apply_color_depth(&mut self, depth: ColorDepth) -> Result<(), DisplayError> {
        let sysr = match depth {
            ColorDepth::Bpp8 => Flag::COLOR_8BPP,
            ColorDepth::Bpp16 => Flag::COLOR_16BPP,
        };
        self.interface.write_register(Cmd::SYSR, sysr)?;
        self.layers.depth = depth;
        self.layers.max_layers = depth.max_layers();
        if depth == ColorDepth::Bpp16 {
            self.layers.current = 0;
        }
        Ok(())
    }

    /// Switch display memory depth; anything under 16 bits selects 8bpp.
    pub fn set_color_bpp(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.set_color_depth(ColorDepth::from_bits(bits))
    }

    /// Switch display memory depth. Does nothing when it is already set.
    ///
    /// 16bpp only holds one layer, so two-layer mode is left first.
    pub fn set_color_depth(&mut self, depth: ColorDepth) -> Result<(), DisplayError> {
        if depth == self.layers.depth {
            return Ok(());
        }
        debug!("color depth: {:?}", depth);
        if depth == ColorDepth::Bpp16 && self.layers.multi {
            self.layers.depth_before_layers = ColorDepth::Bpp16;
            return self.use_layers(false);
        }
        self.apply_color_depth(depth)
    }

    /// Turn two-layer mode on or off.
    ///
    /// On forces 8bpp. Off restores the depth that was active before layers came on.
    pub fn use_layers(&mut self, on: bool) -> Result<(), DisplayError> {
        if self.layers.multi == on {
            return Ok(());
        }
        debug!("layers: {}", on);
        if on {
            self.layers.depth_before_layers = self.layers.depth;
            if self.layers.depth != ColorDepth::Bpp8 {
                self.apply_color_depth(ColorDepth::Bpp8)?;
                self.wait_busy(Flag::STATUS_MEMORY_BUSY)?;
            }
            self.regs.dpcr |= Flag::TWO_LAYERS;
        } else {
            self.regs.dpcr &= !Flag::TWO_LAYERS;
            self.layers.current = 0;
        }
        self.layers.multi = on;
        self.interface.write_register(Cmd::DPCR, self.regs.dpcr)?;
        if !on && self.layers.depth_before_layers != self.layers.depth {
            self.apply_color_depth(self.layers.depth_before_layers)?;
        }
        Ok(())
    }

    /// Number of layers the current depth allows.
    pub fn max_layers(&self) -> u8 {
        self.layers.max_layers
    }

    /// Whether two-layer mode is on.
    pub fn layers_enabled(&self) -> bool {
        self.layers.multi
    }

    /// Layer writes go to, 0 or 1, or `None` with a single layer.
    pub fn current_layer(&self) -> Option<u8> {
        self.layers.multi.then_some(self.layers.current)
    }

    /// Route following memory writes.
    pub fn write_to(&mut self, target: WriteTarget) -> Result<(), DisplayError> {
        let mut mwcr1 = self.interface.read_register(Cmd::MWCR1)? & !Flag::WRITE_DEST_MASK;
        match target {
            WriteTarget::Layer1 | WriteTarget::Layer2 => {
                let second = target == WriteTarget::Layer2;
                if !self.layers.multi {
                    self.use_layers(true)?;
                }
                self.layers.current = u8::from(second);
                if second {
                    mwcr1 |= Flag::WRITE_LAYER_2;
                } else {
                    mwcr1 &= !Flag::WRITE_LAYER_2;
                }
            }
            WriteTarget::Cgram => {
                // character RAM only takes writes while the font source is CGROM
                if self.regs.fncr0 & Flag::FONT_CGRAM != 0 {
                    self.regs.fncr0 &= !Flag::FONT_CGRAM;
                    self.interface.write_register(Cmd::FNCR0, self.regs.fncr0)?;
                }
                mwcr1 |= Flag::WRITE_DEST_CGRAM;
            }
            WriteTarget::Pattern => mwcr1 |= Flag::WRITE_DEST_PATTERN,
            WriteTarget::Cursor => mwcr1 |= Flag::WRITE_DEST_CURSOR,
        }
        self.interface.write_register(Cmd::MWCR1, mwcr1)
    }

    /// Choose how the layers are combined. Turns two-layer mode on.
    pub fn layer_effect(&mut self, effect: LayerEffect) -> Result<(), DisplayError> {
        if !self.layers.multi {
            self.use_layers(true)?;
        }
        self.regs.ltpr0 = (self.regs.ltpr0 & !0x07) | effect.bits();
        self.interface.write_register(Cmd::LTPR0, self.regs.ltpr0)
    }

    /// Blend weights for [`LayerEffect::Transparent`], 0 (opaque) to 8 (invisible).
    pub fn layer_transparency(&mut self, layer1: u8, layer2: u8) -> Result<(), DisplayError> {
        let (layer1, layer2) = (layer1.min(8), layer2.min(8));
        if !self.layers.multi {
            self.use_layers(true)?;
        }
        self.interface
            .write_register(Cmd::LTPR1, (layer2 << 4) | layer1)
    }

    /// Select a pattern slot and route writes to pattern RAM. The slot is clamped to
    /// what `size` allows.
    pub fn set_pattern(&mut self, slot: u8, size: PatternSize) -> Result<(), DisplayError> {
        let slot = slot.min(size.slots() - 1);
        let mut ptno = slot;
        if size == PatternSize::P16x16 {
            ptno |= Flag::PATTERN_16X16;
        }
        self.write_to(WriteTarget::Pattern)?;
        self.interface.write_register(Cmd::PTNO, ptno)
    }

    /// Write a square pattern of 16-bit pixels, two bytes each, at (`x`, `y`).
    /// `data` shorter than the pattern writes nothing.
    pub fn write_pattern(
        &mut self,
        x: i16,
        y: i16,
        data: &[u8],
        size: PatternSize,
    ) -> Result<(), DisplayError> {
        let side = i16::from(size.side());
        let count = usize::from(size.side()) * usize::from(size.side());
        if data.len() < count * 2 {
            return Ok(());
        }
        let saved = self.geometry.window;
        let span = |start: i16| (start.max(0) as u16, start.saturating_add(side - 1).max(0) as u16);
        let ((left, right), (top, bottom)) = (span(x), span(y));
        self.set_active_window(left, right, top, bottom)?;
        self.set_xy(x, y)?;
        self.leave_text_mode()?;
        self.interface.cmd(Cmd::MRWC)?;
        for pixel in data[..count * 2].chunks_exact(2) {
            self.interface.data(pixel[0])?;
            self.interface.data(pixel[1])?;
            self.wait_busy(Flag::STATUS_MEMORY_BUSY)?;
        }
        self.write_window(saved)
    }

    /// Start a block transfer and return without waiting for it.
    ///
    /// Waits first for a transfer still in flight. Use [`Ra8875::bte_busy`] or
    /// [`Ra8875::bte_wait`] before touching the affected memory.
    pub fn bte_move(&mut self, mv: &BteMove) -> Result<(), DisplayError> {
        let (sx, sy) = self.geometry.to_physical(mv.source.0, mv.source.1);
        let (dx, dy) = self.geometry.to_physical(mv.dest.0, mv.dest.1);
        let (w, h) = self.geometry.to_physical(mv.width, mv.height);
        // bit 15 of a vertical coordinate selects layer 2
        let mut sy = sy as u16;
        let mut dy = dy as u16;
        if self.layer_of(mv.source_layer) == Layer::Two {
            sy |= 0x8000;
        }
        if self.layer_of(mv.dest_layer) == Layer::Two {
            dy |= 0x8000;
        }
        let becr1 = compose_rop(mv.rop, mv.transparent, mv.monochrome, mv.reverse);

        self.wait_busy(Flag::STATUS_BTE_BUSY)?;
        self.leave_text_mode()?;
        self.interface.write_register16(Cmd::HSBE0, sx as u16)?;
        self.interface.write_register16(Cmd::VSBE0, sy)?;
        self.interface.write_register16(Cmd::BEWR0, w as u16)?;
        self.interface.write_register16(Cmd::BEHR0, h as u16)?;
        self.interface.write_register16(Cmd::HDBE0, dx as u16)?;
        self.interface.write_register16(Cmd::VDBE0, dy)?;
        self.interface.write_register(Cmd::BECR1, becr1)?;
        let mut becr0 = Flag::BTE_ENABLE;
        if mv.monochrome {
            becr0 |= Flag::BTE_SOURCE_LINEAR;
        }
        self.interface.write_register(Cmd::BECR0, becr0)
    }

    fn layer_of(&self, layer: Layer) -> Layer {
        match layer {
            Layer::Current if self.layers.multi && self.layers.current == 1 => Layer::Two,
            Layer::Current => Layer::One,
            other => other,
        }
    }

    /// Whether a block transfer is still running.
    pub fn bte_busy(&mut self) -> Result<bool, DisplayError> {
        Ok(self.interface.read_status()? & Flag::STATUS_BTE_BUSY != 0)
    }

    /// Wait for a running block transfer, up to the busy timeout.
    pub fn bte_wait(&mut self) -> Result<(), DisplayError> {
        self.wait_busy(Flag::STATUS_BTE_BUSY)
    }
}
