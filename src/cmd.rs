//! RA8875 register addresses.
//!
//! Multi-byte registers list only their low byte; the high byte lives at the next address.
pub struct Cmd;
#[allow(dead_code)]
impl Cmd {
    // SPI cycle selectors
    pub const CMD_WRITE: u8 = 0x80;
    pub const CMD_READ: u8 = 0xC0;
    pub const DATA_WRITE: u8 = 0x00;
    pub const DATA_READ: u8 = 0x40;

    // system and power
    pub const PWRR: u8 = 0x01;
    pub const MRWC: u8 = 0x02;
    pub const PCSR: u8 = 0x04;
    pub const SYSR: u8 = 0x10;
    pub const GPI: u8 = 0x12;
    pub const GPO: u8 = 0x13;

    // panel timing
    pub const HDWR: u8 = 0x14;
    pub const HNDFTR: u8 = 0x15;
    pub const HNDR: u8 = 0x16;
    pub const HSTR: u8 = 0x17;
    pub const HPWR: u8 = 0x18;
    pub const VDHR0: u8 = 0x19;
    pub const VNDR0: u8 = 0x1B;
    pub const VSTR0: u8 = 0x1D;
    pub const VPWR: u8 = 0x1F;

    // display and font control
    pub const DPCR: u8 = 0x20;
    pub const FNCR0: u8 = 0x21;
    pub const FNCR1: u8 = 0x22;
    pub const CGSR: u8 = 0x23;
    pub const HOFS0: u8 = 0x24;
    pub const VOFS0: u8 = 0x26;
    pub const FLDR: u8 = 0x29;
    pub const F_CURXL: u8 = 0x2A;
    pub const F_CURYL: u8 = 0x2C;
    pub const FWTSET: u8 = 0x2E;
    pub const SFRSET: u8 = 0x2F;

    // active and scroll windows
    pub const HSAW0: u8 = 0x30;
    pub const VSAW0: u8 = 0x32;
    pub const HEAW0: u8 = 0x34;
    pub const VEAW0: u8 = 0x36;
    pub const HSSW0: u8 = 0x38;
    pub const VSSW0: u8 = 0x3A;
    pub const HESW0: u8 = 0x3C;
    pub const VESW0: u8 = 0x3E;

    // memory write control and cursors
    pub const MWCR0: u8 = 0x40;
    pub const MWCR1: u8 = 0x41;
    pub const BTCR: u8 = 0x44;
    pub const CURH0: u8 = 0x46;
    pub const CURV0: u8 = 0x48;
    pub const CURHS: u8 = 0x4E;
    pub const CURVS: u8 = 0x4F;

    // block transfer engine and layers
    pub const BECR0: u8 = 0x50;
    pub const BECR1: u8 = 0x51;
    pub const LTPR0: u8 = 0x52;
    pub const LTPR1: u8 = 0x53;
    pub const HSBE0: u8 = 0x54;
    pub const VSBE0: u8 = 0x56;
    pub const HDBE0: u8 = 0x58;
    pub const VDBE0: u8 = 0x5A;
    pub const BEWR0: u8 = 0x5C;
    pub const BEHR0: u8 = 0x5E;

    // colors
    pub const BGCR0: u8 = 0x60;
    pub const FGCR0: u8 = 0x63;
    pub const PTNO: u8 = 0x66;
    pub const BGTR0: u8 = 0x67;

    // touch panel
    pub const TPCR0: u8 = 0x70;
    pub const TPCR1: u8 = 0x71;
    pub const TPXH: u8 = 0x72;
    pub const TPYH: u8 = 0x73;
    pub const TPXYL: u8 = 0x74;

    // graphic cursor position
    pub const GCHP0: u8 = 0x80;
    pub const GCVP0: u8 = 0x82;
    pub const GCC0: u8 = 0x84;
    pub const GCC1: u8 = 0x85;

    // clocks and PWM
    pub const PLLC1: u8 = 0x88;
    pub const PLLC2: u8 = 0x89;
    pub const P1CR: u8 = 0x8A;
    pub const P1DCR: u8 = 0x8B;
    pub const P2CR: u8 = 0x8C;
    pub const P2DCR: u8 = 0x8D;
    pub const MCLR: u8 = 0x8E;

    // shape engine
    pub const DCR: u8 = 0x90;
    pub const DLHSR0: u8 = 0x91;
    pub const DLVSR0: u8 = 0x93;
    pub const DLHER0: u8 = 0x95;
    pub const DLVER0: u8 = 0x97;
    pub const DCHR0: u8 = 0x99;
    pub const DCVR0: u8 = 0x9B;
    pub const DCRR: u8 = 0x9D;
    pub const ELLIPSE: u8 = 0xA0;
    pub const ELL_A0: u8 = 0xA1;
    pub const ELL_B0: u8 = 0xA3;
    pub const DEHR0: u8 = 0xA5;
    pub const DEVR0: u8 = 0xA7;
    pub const DTPH0: u8 = 0xA9;
    pub const DTPV0: u8 = 0xAB;

    // keypad and extra GPIO
    pub const KSCR1: u8 = 0xC0;
    pub const GPIOX: u8 = 0xC7;

    // interrupts
    pub const INTC1: u8 = 0xF0;
    pub const INTC2: u8 = 0xF1;
}
