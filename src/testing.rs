//! A scripted controller on the other end of the SPI bus, for unit tests.
use core::cell::{Ref, RefCell, RefMut};
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

use crate::cmd::Cmd;
use crate::config::Config;
use crate::driver::Ra8875;
use crate::flag::Flag;
use crate::interface::{BusSpeed, SpeedControl};
use crate::panel::{Panel, PanelSelect};

/// Everything the fake controller saw and will answer.
pub struct BusState {
    pub regs: [u8; 256],
    /// Every selected register, in order.
    pub commands: Vec<u8>,
    /// Register writes, memory writes excluded.
    pub writes: Vec<(u8, u8)>,
    /// Bytes written through `MRWC`.
    pub memory: Vec<u8>,
    /// Answers to memory reads; zero once empty.
    pub read_queue: VecDeque<u8>,
    /// Engines never finish: busy bits stay set and every read returns `0xFF`.
    pub stuck: bool,
    pub status: u8,
    pub status_reads: usize,
    pub speeds: Vec<BusSpeed>,
    selected: u8,
}

impl Default for BusState {
    fn default() -> Self {
        BusState {
            regs: [0; 256],
            commands: Vec::new(),
            writes: Vec::new(),
            memory: Vec::new(),
            read_queue: VecDeque::new(),
            stuck: false,
            status: 0,
            status_reads: 0,
            speeds: Vec::new(),
            selected: 0,
        }
    }
}

impl BusState {
    pub fn last_write(&self, reg: u8) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(r, _)| *r == reg)
            .map(|&(_, v)| v)
    }

    pub fn writes_to(&self, reg: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == reg)
            .map(|&(_, v)| v)
            .collect()
    }

    /// Current value of a low/high register pair.
    pub fn reg16(&self, reg: u8) -> u16 {
        u16::from_le_bytes([self.regs[reg as usize], self.regs[reg as usize + 1]])
    }

    fn write_data(&mut self, bytes: &[u8]) {
        let reg = self.selected;
        if reg == Cmd::MRWC {
            self.memory.extend_from_slice(bytes);
            return;
        }
        for &byte in bytes {
            self.writes.push((reg, byte));
            self.regs[reg as usize] = byte;
        }
    }

    fn read_data(&mut self, buf: &mut [u8]) {
        let reg = self.selected;
        for byte in buf.iter_mut() {
            *byte = if self.stuck {
                0xFF
            } else if reg == Cmd::MRWC {
                self.read_queue.pop_front().unwrap_or(0)
            } else {
                // start bits read back clear once the engine is done
                let done = match reg {
                    Cmd::DCR => Flag::LINE_STATUS | Flag::CIRCLE_STATUS,
                    Cmd::ELLIPSE => Flag::ELLIPSE_STATUS,
                    Cmd::MCLR => Flag::CLEAR_START,
                    Cmd::BECR0 => Flag::BTE_ENABLE,
                    _ => 0,
                };
                self.regs[reg as usize] & !done
            };
        }
    }

    fn read_status(&mut self, buf: &mut [u8]) {
        self.status_reads += 1;
        let value = if self.stuck { 0xFF } else { self.status };
        buf.fill(value);
    }
}

/// Shared handle to a [`BusState`]; clones see the same controller.
#[derive(Clone, Default)]
pub struct FakeBus(Rc<RefCell<BusState>>);

impl FakeBus {
    pub fn state(&self) -> Ref<'_, BusState> {
        self.0.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, BusState> {
        self.0.borrow_mut()
    }

    /// Forget traffic so far, keeping register contents.
    pub fn clear_log(&self) {
        let mut state = self.state_mut();
        state.commands.clear();
        state.writes.clear();
        state.memory.clear();
        state.status_reads = 0;
    }

    pub fn speeds(&self) -> Vec<BusSpeed> {
        self.state().speeds.clone()
    }

    pub fn clear_speeds(&self) {
        self.state_mut().speeds.clear();
    }
}

impl ErrorType for FakeBus {
    type Error = Infallible;
}

impl SpiDevice for FakeBus {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut state = self.state_mut();
        let mut selector = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let Some((&first, rest)) = bytes.split_first() else {
                        continue;
                    };
                    match selector {
                        // payload after a selector sent on its own
                        Some(Cmd::DATA_WRITE) => state.write_data(bytes),
                        Some(_) => {}
                        None => {
                            selector = Some(first);
                            match first {
                                Cmd::CMD_WRITE => {
                                    if let Some(&reg) = rest.first() {
                                        state.selected = reg;
                                        state.commands.push(reg);
                                    }
                                }
                                Cmd::DATA_WRITE => state.write_data(rest),
                                _ => {}
                            }
                        }
                    }
                }
                Operation::Read(buf) => match selector {
                    Some(Cmd::CMD_READ) => state.read_status(buf),
                    _ => state.read_data(buf),
                },
                _ => {}
            }
        }
        Ok(())
    }
}

pub struct FakePin;

impl PinErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

pub struct FakeDelay;

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Records every speed change into the bus log.
pub struct RecordingSpeed(FakeBus);

impl SpeedControl for RecordingSpeed {
    fn set_speed(&mut self, speed: BusSpeed) {
        self.0.state_mut().speeds.push(speed);
    }
}

pub type TestDisplay = Ra8875<FakeBus, FakePin, FakeDelay>;

/// An uninitialized driver.
pub fn fresh(panel: PanelSelect) -> (TestDisplay, FakeBus) {
    let bus = FakeBus::default();
    let lcd = Ra8875::new(bus.clone(), FakePin, FakeDelay, Config::new().panel(panel));
    (lcd, bus)
}

/// An initialized 800x480 driver with an empty log.
pub fn ready() -> (TestDisplay, FakeBus) {
    let (mut lcd, bus) = fresh(PanelSelect::Fixed(Panel::Tft50));
    lcd.init().unwrap();
    bus.clear_log();
    (lcd, bus)
}

/// Like [`ready`], with bus speed changes recorded.
pub fn ready_with_speed_log() -> (Ra8875<FakeBus, FakePin, FakeDelay, RecordingSpeed>, FakeBus) {
    let bus = FakeBus::default();
    let config = Config::new().panel(PanelSelect::Fixed(Panel::Tft50));
    let mut lcd = Ra8875::with_speed_control(bus.clone(), FakePin, FakeDelay, RecordingSpeed(bus.clone()), config);
    lcd.init().unwrap();
    bus.clear_log();
    (lcd, bus)
}
