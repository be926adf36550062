//! Supported TFT panels and their timing tables.
use crate::flag::Flag;

/// A TFT module wired to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    /// 5.0" 800x480
    Tft50,
    /// 5.6" 640x480
    Tft56,
    /// 9.0" 800x480
    Tft90,
}

/// How [`crate::driver::Ra8875::init`] picks the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelSelect {
    /// Read the identification strap on the general purpose input.
    Strapped,
    /// Use this panel regardless of the strap.
    Fixed(Panel),
}

/// Sync and clock settings for one panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Pixel clock polarity and divider (`PCSR`).
    pub pixel_clock: u8,
    /// Horizontal non-display fine tune.
    pub h_fine_tune: u8,
    /// Horizontal non-display period in pixels.
    pub h_non_display: u16,
    /// HSYNC start position in pixels.
    pub h_sync_start: u16,
    /// HSYNC pulse width in pixels.
    pub h_sync_width: u16,
    /// Vertical non-display period in lines.
    pub v_non_display: u16,
    /// VSYNC start position in lines.
    pub v_sync_start: u16,
    /// VSYNC pulse width in lines.
    pub v_sync_width: u16,
    /// Output divider for `PLLC2` once the system clock runs at full rate.
    pub pll_divider: u8,
}

#[rustfmt::skip]
const TIMING_800X480: Timing = Timing {
    pixel_clock: Flag::PCLK_FALLING | Flag::PCLK_SYS_2,
    h_fine_tune: 0,
    h_non_display: 26, h_sync_start: 32, h_sync_width: 96,
    v_non_display: 32, v_sync_start: 23, v_sync_width: 2,
    pll_divider: Flag::PLL_DIV_4,
};

#[rustfmt::skip]
const TIMING_640X480: Timing = Timing {
    pixel_clock: Flag::PCLK_RISING | Flag::PCLK_SYS_2,
    h_fine_tune: 5,
    h_non_display: 127, h_sync_start: 16, h_sync_width: 8,
    v_non_display: 11, v_sync_start: 15, v_sync_width: 2,
    pll_divider: Flag::PLL_DIV_4,
};

impl Panel {
    /// Panel reported by the identification strap value.
    pub const fn from_strap(value: u8) -> Self {
        match value {
            0x01 => Panel::Tft90,
            _ => Panel::Tft50,
        }
    }

    /// Physical width in pixels.
    pub const fn width(self) -> u16 {
        match self {
            Panel::Tft50 | Panel::Tft90 => 800,
            Panel::Tft56 => 640,
        }
    }

    /// Physical height in pixels.
    pub const fn height(self) -> u16 {
        480
    }

    /// Timing table for this panel.
    pub const fn timing(self) -> Timing {
        match self {
            Panel::Tft50 | Panel::Tft90 => TIMING_800X480,
            Panel::Tft56 => TIMING_640X480,
        }
    }
}

/// Register values derived from a [`Timing`] and the panel size.
pub(crate) struct TimingRegisters {
    pub hdwr: u8,
    pub hndftr: u8,
    pub hndr: u8,
    pub hstr: u8,
    pub hpwr: u8,
    pub vdhr: u16,
    pub vndr: u16,
    pub vstr: u16,
    pub vpwr: u8,
}

impl Timing {
    pub(crate) fn registers(&self, width: u16, height: u16) -> TimingRegisters {
        let h_non_display = self
            .h_non_display
            .saturating_sub(u16::from(self.h_fine_tune) + 2);
        TimingRegisters {
            hdwr: (width / 8 - 1) as u8,
            hndftr: Flag::DE_ACTIVE_HIGH + self.h_fine_tune,
            hndr: (h_non_display / 8) as u8,
            hstr: (self.h_sync_start / 8).saturating_sub(1) as u8,
            hpwr: Flag::SYNC_ACTIVE_LOW + (self.h_sync_width / 8).saturating_sub(1) as u8,
            vdhr: height - 1,
            vndr: self.v_non_display.saturating_sub(1),
            vstr: self.v_sync_start.saturating_sub(1),
            vpwr: Flag::SYNC_ACTIVE_LOW + self.v_sync_width.saturating_sub(1) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strap_selects_nine_inch_only_on_one() {
        assert_eq!(Panel::from_strap(0x00), Panel::Tft50);
        assert_eq!(Panel::from_strap(0x01), Panel::Tft90);
        assert_eq!(Panel::from_strap(0x07), Panel::Tft50);
    }

    #[test]
    fn registers_for_800x480() {
        let regs = Panel::Tft50.timing().registers(800, 480);
        assert_eq!(regs.hdwr, 99);
        assert_eq!(regs.hndftr, 0);
        assert_eq!(regs.hndr, 3);
        assert_eq!(regs.hstr, 3);
        assert_eq!(regs.hpwr, 11);
        assert_eq!(regs.vdhr, 479);
        assert_eq!(regs.vndr, 31);
        assert_eq!(regs.vstr, 22);
        assert_eq!(regs.vpwr, 1);
    }

    #[test]
    fn registers_for_640x480() {
        let regs = Panel::Tft56.timing().registers(640, 480);
        assert_eq!(regs.hdwr, 79);
        assert_eq!(regs.hndftr, 5);
        assert_eq!(regs.hndr, 15);
        assert_eq!(regs.hstr, 1);
        assert_eq!(regs.hpwr, 0);
        assert_eq!(regs.vndr, 10);
    }
}
