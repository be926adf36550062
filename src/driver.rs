//! Driver for the RA8875 TFT controller
pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::cmd::Cmd;
use crate::color::{Color, ColorDepth};
use crate::config::Config;
use crate::flag::Flag;
use crate::geometry::{Geometry, Rotation, Window};
use crate::interface::{BusSpeed, FixedSpeed, SpeedControl, SpiInterface};
use crate::layers::LayerState;
use crate::panel::{Panel, PanelSelect};
use crate::state::ShadowRegisters;
use crate::text::TextState;
use crate::touch::TouchState;

use log::{debug, warn};

/// Budget for a shape-engine completion poll.
const POLL_TIMEOUT_US: u32 = 20_000;
/// Budget for a status-register busy wait.
const BUSY_TIMEOUT_US: u32 = 10_000;
/// Pause between two polls; each read adds its own settle time on top.
const POLL_INTERVAL_US: u32 = 10;
const READ_COST_US: u32 = 50;

/// System clock settings used before the panel timing is programmed.
const PLL_SLOW: u8 = 0x07;
/// Multiplier for full-rate operation.
const PLL_FULL: u8 = 0x0B;

/// An RA8875 with a TFT panel, a reset line and a delay source.
///
/// `CLK` lets platforms retune the SPI clock when the driver moves between init, read
/// and write speeds. Most setups can leave it at [`FixedSpeed`].
///
/// The driver owns the bus for the duration of every call. Nothing here masks
/// interrupts, so no interrupt handler may use the same bus.
pub struct Ra8875<SPI, RST, DELAY, CLK = FixedSpeed> {
    pub(crate) interface: SpiInterface<SPI, RST, DELAY, CLK>,
    pub(crate) config: Config,
    pub(crate) panel: Panel,
    pub(crate) regs: ShadowRegisters,
    pub(crate) geometry: Geometry,
    pub(crate) layers: LayerState,
    pub(crate) text: TextState,
    pub(crate) touch: TouchState,
    pub(crate) fore_color: Color,
    pub(crate) back_color: Color,
    pub(crate) text_mode: bool,
    pub(crate) brightness: u8,
    sleeping: bool,
}

impl<SPI, RST, DELAY> Ra8875<SPI, RST, DELAY, FixedSpeed>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create the driver on a bus whose clock never changes.
    pub fn new(spi: SPI, rst: RST, delay: DELAY, config: Config) -> Self {
        Self::with_speed_control(spi, rst, delay, FixedSpeed, config)
    }
}

impl<SPI, RST, DELAY, CLK> Ra8875<SPI, RST, DELAY, CLK>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DELAY: DelayNs,
    CLK: SpeedControl,
{
    /// Create the driver with a hook that retunes the SPI clock.
    ///
    /// Nothing is sent to the controller until [`Ra8875::init`].
    pub fn with_speed_control(spi: SPI, rst: RST, delay: DELAY, clock: CLK, config: Config) -> Self {
        debug!("creating new Ra8875 instance");
        let panel = config.initial_panel();
        Ra8875 {
            interface: SpiInterface::new(spi, rst, delay, clock),
            panel,
            regs: ShadowRegisters::default(),
            geometry: Geometry::new(panel.width(), panel.height()),
            layers: LayerState::default(),
            text: TextState::default(),
            touch: TouchState::new(config.touch),
            fore_color: Color::WHITE,
            back_color: Color::BLACK,
            text_mode: false,
            brightness: 255,
            sleeping: false,
            config,
        }
    }

    /// Give back the bus, reset pin, delay and clock hook.
    pub fn release(self) -> (SPI, RST, DELAY, CLK) {
        self.interface.release()
    }

    /// The panel found (or forced) during init.
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Bring the controller up: reset, clocks, panel timing, clear, display on.
    ///
    /// Every piece of driver state is reset, so calling this again restarts cleanly.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        debug!("initializing ra8875");
        self.regs = ShadowRegisters::default();
        self.layers = LayerState::default();
        self.text = TextState::default();
        self.touch = TouchState::new(self.config.touch);
        self.fore_color = Color::WHITE;
        self.back_color = Color::BLACK;
        self.text_mode = false;
        self.brightness = 255;
        self.sleeping = false;

        self.interface.set_speed(BusSpeed::Slow);
        self.interface.hard_reset()?;

        self.interface.cmd(Cmd::PWRR)?;
        self.interface.data(Flag::SOFT_RESET)?;
        self.interface.delay_ms(20);
        self.interface.data(Flag::NORMAL)?;
        self.interface.delay_ms(200);

        self.set_system_clock(
            PLL_SLOW,
            Flag::PLL_DIV_8,
            Flag::PCLK_FALLING | Flag::PCLK_SYS_2,
        )?;
        self.apply_color_depth(ColorDepth::Bpp16)?;

        self.panel = match self.config.panel {
            PanelSelect::Fixed(panel) => panel,
            PanelSelect::Strapped => self.detect_panel()?,
        };
        debug!("panel: {:?}", self.panel);
        self.geometry = Geometry::new(self.panel.width(), self.panel.height());
        self.program_timing()?;

        self.set_cursor_blink_rate(10)?;
        self.set_int_font_coding(crate::text::FontCoding::Iso8859_1)?;
        self.set_font_internal()?;

        let timing = self.panel.timing();
        self.set_system_clock(PLL_FULL, timing.pll_divider, timing.pixel_clock)?;
        self.write_window(Window::full(self.geometry.panel_width, self.geometry.panel_height))?;
        self.interface.delay_ms(10);
        self.interface.set_speed(BusSpeed::Write);
        self.interface.delay_ms(1);

        self.clear_memory(false)?;
        self.interface.delay_ms(1);
        self.display_on(true)?;
        self.interface.delay_ms(1);
        self.fill_window(Color::BLACK)?;
        self.backlight(true)?;
        self.set_rotation(Rotation::Rotate0)?;

        let (fore, back) = (self.text.fore_color, self.text.back_color);
        self.set_foreground_color(fore)?;
        self.set_background_color(back)?;
        self.set_text_mode(false)?;
        self.set_active_window_full()?;
        self.interface.write_register(Cmd::FNCR1, self.regs.fncr1)?;
        self.set_cursor(0i16, 0i16, false)?;
        self.touch_begin()?;
        debug!("ra8875 ready");
        Ok(())
    }

    fn detect_panel(&mut self) -> Result<Panel, DisplayError> {
        // keypad scanning shares the strap pins
        self.interface.write_register(Cmd::KSCR1, 0x00)?;
        let strap = self.interface.read_register(Cmd::GPI)?;
        Ok(Panel::from_strap(strap))
    }

    fn program_timing(&mut self) -> Result<(), DisplayError> {
        let regs = self
            .panel
            .timing()
            .registers(self.geometry.panel_width, self.geometry.panel_height);
        self.interface.write_register(Cmd::HDWR, regs.hdwr)?;
        self.interface.write_register(Cmd::HNDFTR, regs.hndftr)?;
        self.interface.write_register(Cmd::HNDR, regs.hndr)?;
        self.interface.write_register(Cmd::HSTR, regs.hstr)?;
        self.interface.write_register(Cmd::HPWR, regs.hpwr)?;
        self.interface.write_register16(Cmd::VDHR0, regs.vdhr)?;
        self.interface.write_register16(Cmd::VNDR0, regs.vndr)?;
        self.interface.write_register16(Cmd::VSTR0, regs.vstr)?;
        self.interface.write_register(Cmd::VPWR, regs.vpwr)
    }

    /// Program the PLL and pixel clock. Each write needs a millisecond to settle.
    pub fn set_system_clock(&mut self, pll1: u8, pll2: u8, pixel_clock: u8) -> Result<(), DisplayError> {
        debug!("system clock: pll1={:#04x} pll2={:#04x} pclk={:#04x}", pll1, pll2, pixel_clock);
        self.interface.write_register(Cmd::PLLC1, pll1)?;
        self.interface.delay_ms(1);
        self.interface.write_register(Cmd::PLLC2, pll2)?;
        self.interface.delay_ms(1);
        self.interface.write_register(Cmd::PCSR, pixel_clock)?;
        self.interface.delay_ms(1);
        Ok(())
    }

    /// Pulse the software reset bit.
    pub fn soft_reset(&mut self) -> Result<(), DisplayError> {
        self.interface.cmd(Cmd::PWRR)?;
        self.interface.data(Flag::SOFT_RESET)?;
        self.interface.data(Flag::NORMAL)?;
        self.interface.delay_ms(1);
        Ok(())
    }

    /// Switch the panel output on or off. Display memory is kept.
    pub fn display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let value = if on { Flag::DISPLAY_ON } else { Flag::DISPLAY_OFF };
        self.interface.write_register(Cmd::PWRR, Flag::NORMAL | value)
    }

    /// Enter or leave sleep mode. Asking for the current state does nothing.
    ///
    /// The display stays off while the PLL is unstable on the way out.
    pub fn sleep(&mut self, sleep: bool) -> Result<(), DisplayError> {
        if self.sleeping == sleep {
            return Ok(());
        }
        self.sleeping = sleep;
        let timing = self.panel.timing();
        if sleep {
            debug!("entering sleep");
            self.interface.set_speed(BusSpeed::Slow);
            self.set_system_clock(
                PLL_SLOW,
                Flag::PLL_DIV_8,
                Flag::PCLK_RISING | Flag::PCLK_SYS_4,
            )?;
            self.interface
                .write_register(Cmd::PWRR, Flag::DISPLAY_OFF | Flag::SLEEP)?;
            self.interface.delay_ms(100);
        } else {
            debug!("leaving sleep");
            self.interface.write_register(Cmd::PWRR, Flag::DISPLAY_OFF)?;
            self.interface.delay_ms(100);
            self.set_system_clock(PLL_SLOW, Flag::PLL_DIV_8, timing.pixel_clock)?;
            self.interface.delay_ms(20);
            self.interface
                .write_register(Cmd::PWRR, Flag::NORMAL | Flag::DISPLAY_ON)?;
            self.interface.delay_ms(20);
            self.interface.set_speed(BusSpeed::Write);
            self.set_system_clock(PLL_FULL, timing.pll_divider, timing.pixel_clock)?;
        }
        Ok(())
    }

    /// Whether the controller is in sleep mode.
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Drive the extra GPIO line, which switches panel power on these modules.
    pub fn gpiox(&mut self, on: bool) -> Result<(), DisplayError> {
        self.interface.write_register(Cmd::GPIOX, u8::from(on))
    }

    /// Start clearing display memory to zero, or stop a clear in progress.
    ///
    /// Starting waits for the clear to finish.
    pub fn clear_memory(&mut self, stop: bool) -> Result<(), DisplayError> {
        let mut value = self.interface.read_register(Cmd::MCLR)?;
        if stop {
            value &= !Flag::CLEAR_START;
        } else {
            value |= Flag::CLEAR_START;
        }
        self.interface.data(value)?;
        if !stop {
            self.wait_busy(Flag::STATUS_MEMORY_BUSY)?;
        }
        Ok(())
    }

    /// Make [`Ra8875::clear_memory`] clear all of memory (`true`) or only the active window.
    pub fn clear_active_window(&mut self, full: bool) -> Result<(), DisplayError> {
        let mut value = self.interface.read_register(Cmd::MCLR)?;
        if full {
            value &= !Flag::CLEAR_ACTIVE_WINDOW;
        } else {
            value |= Flag::CLEAR_ACTIVE_WINDOW;
        }
        self.interface.data(value)
    }

    /// Poll `reg` until `flag` clears. Gives up after the poll budget and reports
    /// whether the engine finished.
    pub(crate) fn wait_poll(&mut self, reg: u8, flag: u8) -> Result<bool, DisplayError> {
        let mut waited = 0;
        loop {
            if self.interface.read_register(reg)? & flag == 0 {
                return Ok(true);
            }
            if waited > POLL_TIMEOUT_US {
                warn!("register {:#04x} still busy ({:#04x}) after {}us", reg, flag, waited);
                return Ok(false);
            }
            self.interface.delay_us(POLL_INTERVAL_US);
            waited += POLL_INTERVAL_US + READ_COST_US;
        }
    }

    /// Poll the status register until none of `mask` is set.
    pub(crate) fn wait_busy(&mut self, mask: u8) -> Result<(), DisplayError> {
        let mut waited = 0;
        loop {
            if self.interface.read_status()? & mask != mask {
                return Ok(());
            }
            if waited > BUSY_TIMEOUT_US {
                warn!("status {:#04x} still busy after {}us", mask, waited);
                return Ok(());
            }
            self.interface.delay_us(POLL_INTERVAL_US);
            waited += POLL_INTERVAL_US + READ_COST_US;
        }
    }

    /// Switch between graphics and internal-font text mode, only when it changes.
    pub(crate) fn set_text_mode(&mut self, text: bool) -> Result<(), DisplayError> {
        if text {
            self.regs.mwcr0 |= Flag::TEXT_MODE;
        } else {
            self.regs.mwcr0 &= !Flag::TEXT_MODE;
        }
        if self.text_mode != text {
            self.text_mode = text;
            self.interface.write_register(Cmd::MWCR0, self.regs.mwcr0)?;
        }
        Ok(())
    }

    pub(crate) fn leave_text_mode(&mut self) -> Result<(), DisplayError> {
        if self.text_mode {
            self.set_text_mode(false)?;
        }
        Ok(())
    }

    fn write_color(&mut self, base: u8, color: Color) -> Result<(), DisplayError> {
        let [r, g, b] = self.layers.depth.register_shifts();
        self.interface
            .write_register(base, ((color.0 & 0xF800) >> r) as u8)?;
        self.interface
            .write_register(base + 1, ((color.0 & 0x07E0) >> g) as u8)?;
        self.interface
            .write_register(base + 2, ((color.0 & 0x001F) >> b) as u8)
    }

    /// Color the shape engine and hardware text draw with.
    pub fn set_foreground_color(&mut self, color: Color) -> Result<(), DisplayError> {
        self.fore_color = color;
        self.write_color(Cmd::FGCR0, color)
    }

    /// Background color for hardware text and color expansion.
    pub fn set_background_color(&mut self, color: Color) -> Result<(), DisplayError> {
        self.back_color = color;
        self.write_color(Cmd::BGCR0, color)
    }

    /// Key color a transparent block transfer skips.
    pub fn set_transparent_color(&mut self, color: Color) -> Result<(), DisplayError> {
        self.back_color = color;
        self.write_color(Cmd::BGTR0, color)
    }

    /// Set foreground and background together.
    pub fn set_colors(&mut self, fore: Color, back: Color) -> Result<(), DisplayError> {
        self.set_foreground_color(fore)?;
        self.set_background_color(back)
    }

    /// Current foreground color.
    pub fn foreground_color(&self) -> Color {
        self.fore_color
    }

    /// Current background color.
    pub fn background_color(&self) -> Color {
        self.back_color
    }

    /// Whether memory holds RGB565 or RGB332 pixels.
    pub fn color_depth(&self) -> ColorDepth {
        self.layers.depth
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::Cmd;
    use crate::flag::Flag;
    use crate::geometry::Rotation;
    use crate::interface::BusSpeed;
    use crate::panel::{Panel, PanelSelect};
    use crate::testing::*;

    #[test]
    fn init_on_strap_zero_is_800x480() {
        let (mut lcd, bus) = fresh(PanelSelect::Strapped);
        lcd.init().unwrap();
        assert_eq!(lcd.panel(), Panel::Tft50);
        assert_eq!(lcd.width(true), 800);
        assert_eq!(lcd.height(true), 480);
        let state = bus.state();
        assert_eq!(state.last_write(Cmd::HDWR), Some(99));
        assert_eq!(state.last_write(Cmd::SYSR), Some(Flag::COLOR_16BPP));
        assert_eq!(state.last_write(Cmd::PWRR), Some(Flag::DISPLAY_ON));
        assert_eq!(state.last_write(Cmd::TPCR0), Some(Flag::TOUCH_ENABLE));
    }

    #[test]
    fn init_reads_nine_inch_strap() {
        let (mut lcd, bus) = fresh(PanelSelect::Strapped);
        bus.state_mut().regs[Cmd::GPI as usize] = 0x01;
        lcd.init().unwrap();
        assert_eq!(lcd.panel(), Panel::Tft90);
    }

    #[test]
    fn fixed_panel_skips_strap_read() {
        let (mut lcd, bus) = fresh(PanelSelect::Fixed(Panel::Tft56));
        bus.state_mut().regs[Cmd::GPI as usize] = 0x01;
        lcd.init().unwrap();
        assert_eq!(lcd.panel(), Panel::Tft56);
        assert_eq!(lcd.width(true), 640);
        assert!(!bus.state().commands.contains(&Cmd::GPI));
    }

    #[test]
    fn init_then_rotation_one_swaps_logical_size() {
        let (mut lcd, _bus) = ready();
        lcd.set_rotation(Rotation::from(1u8)).unwrap();
        assert_eq!(lcd.width(false), 480);
        assert_eq!(lcd.height(false), 800);
        assert_eq!(lcd.width(true), 800);
        assert_eq!(lcd.height(true), 480);
    }

    #[test]
    fn system_clock_writes_in_order() {
        let (mut lcd, bus) = ready();
        lcd.set_system_clock(0x0B, 0x02, 0x81).unwrap();
        let writes = bus.state().writes.clone();
        assert_eq!(writes, [(Cmd::PLLC1, 0x0B), (Cmd::PLLC2, 0x02), (Cmd::PCSR, 0x81)]);
    }

    #[test]
    fn sleep_is_idempotent_and_restores_write_speed() {
        let (mut lcd, bus) = ready_with_speed_log();
        lcd.sleep(false).unwrap();
        assert!(bus.state().writes.is_empty());

        lcd.sleep(true).unwrap();
        assert!(lcd.is_sleeping());
        assert_eq!(
            bus.state().last_write(Cmd::PWRR),
            Some(Flag::DISPLAY_OFF | Flag::SLEEP)
        );
        let count = bus.state().writes.len();
        lcd.sleep(true).unwrap();
        assert_eq!(bus.state().writes.len(), count);

        lcd.sleep(false).unwrap();
        let pwrr = bus.state().writes_to(Cmd::PWRR);
        assert_eq!(&pwrr[pwrr.len() - 2..], &[Flag::DISPLAY_OFF, Flag::DISPLAY_ON]);
        assert_eq!(bus.speeds().last(), Some(&BusSpeed::Write));
        assert_eq!(bus.state().last_write(Cmd::PLLC1), Some(0x0B));
    }

    #[test]
    fn reads_return_to_previous_speed() {
        let (mut lcd, bus) = ready_with_speed_log();
        bus.clear_speeds();
        lcd.interface.read_register(Cmd::MCLR).unwrap();
        assert_eq!(bus.speeds(), [BusSpeed::Read, BusSpeed::Write]);
    }

    #[test]
    fn clear_memory_sets_and_clears_start_bit() {
        let (mut lcd, bus) = ready();
        lcd.clear_active_window(false).unwrap();
        lcd.clear_memory(false).unwrap();
        assert_eq!(
            bus.state().last_write(Cmd::MCLR),
            Some(Flag::CLEAR_START | Flag::CLEAR_ACTIVE_WINDOW)
        );
        lcd.clear_memory(true).unwrap();
        assert_eq!(bus.state().last_write(Cmd::MCLR), Some(Flag::CLEAR_ACTIVE_WINDOW));
    }

    #[test]
    fn stuck_engine_times_out_without_error() {
        let (mut lcd, bus) = ready();
        bus.state_mut().stuck = true;
        assert_eq!(lcd.wait_poll(Cmd::DCR, Flag::LINE_STATUS), Ok(false));
        lcd.fill_rect(0, 0, 10, 10, crate::color::Color::RED).unwrap();
    }

    #[test]
    fn foreground_color_shifts_follow_depth() {
        let (mut lcd, bus) = ready();
        lcd.set_foreground_color(crate::color::Color::WHITE).unwrap();
        assert_eq!(bus.state().last_write(Cmd::FGCR0), Some(0x1F));
        assert_eq!(bus.state().last_write(Cmd::FGCR0 + 1), Some(0x3F));
        lcd.set_color_bpp(8).unwrap();
        lcd.set_foreground_color(crate::color::Color::WHITE).unwrap();
        assert_eq!(bus.state().last_write(Cmd::FGCR0), Some(0x07));
        assert_eq!(bus.state().last_write(Cmd::FGCR0 + 1), Some(0x07));
        assert_eq!(bus.state().last_write(Cmd::FGCR0 + 2), Some(0x03));
    }
}
