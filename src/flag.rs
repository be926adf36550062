pub struct Flag;
#[allow(dead_code)]
impl Flag {
    // PWRR
    pub const DISPLAY_ON: u8 = 0x80;
    pub const DISPLAY_OFF: u8 = 0x00;
    pub const SLEEP: u8 = 0x02;
    pub const SOFT_RESET: u8 = 0x01;
    pub const NORMAL: u8 = 0x00;

    // PLLC2
    pub const PLL_DIV_4: u8 = 0x02;
    pub const PLL_DIV_8: u8 = 0x03;

    // PCSR
    pub const PCLK_RISING: u8 = 0x00;
    pub const PCLK_FALLING: u8 = 0x80;
    pub const PCLK_SYS_2: u8 = 0x01;
    pub const PCLK_SYS_4: u8 = 0x02;
    pub const PCLK_SYS_8: u8 = 0x03;

    // SYSR
    pub const COLOR_8BPP: u8 = 0x00;
    pub const COLOR_16BPP: u8 = 0x0C;

    // HNDFTR, HPWR, VPWR
    pub const DE_ACTIVE_HIGH: u8 = 0x00;
    pub const SYNC_ACTIVE_LOW: u8 = 0x00;

    // DPCR
    pub const TWO_LAYERS: u8 = 0x80;
    pub const HSCAN_REVERSE: u8 = 0x08;
    pub const VSCAN_REVERSE: u8 = 0x04;

    // MWCR0
    pub const TEXT_MODE: u8 = 0x80;
    pub const CURSOR_VISIBLE: u8 = 0x40;
    pub const CURSOR_BLINK: u8 = 0x20;
    pub const MEMWRITE_NO_INCREMENT: u8 = 0x02;

    // MWCR1
    pub const GRAPHIC_CURSOR_ON: u8 = 0x80;
    pub const GRAPHIC_CURSOR_SELECT: u8 = 0x70;
    pub const WRITE_DEST_MASK: u8 = 0x0C;
    pub const WRITE_DEST_CGRAM: u8 = 0x04;
    pub const WRITE_DEST_CURSOR: u8 = 0x08;
    pub const WRITE_DEST_PATTERN: u8 = 0x0C;
    pub const WRITE_LAYER_2: u8 = 0x01;

    // FNCR0
    pub const FONT_CGRAM: u8 = 0x80;
    pub const FONT_EXTERNAL: u8 = 0x20;
    pub const FONT_SOURCE_MASK: u8 = 0xA0;
    pub const FONT_CODING_MASK: u8 = 0x03;

    // FNCR1
    pub const FONT_FULL_ALIGN: u8 = 0x80;
    pub const FONT_TRANSPARENT: u8 = 0x40;
    pub const FONT_ROTATE_90: u8 = 0x10;
    pub const FONT_SCALE_MASK: u8 = 0x0F;

    // MCLR
    pub const CLEAR_START: u8 = 0x80;
    pub const CLEAR_ACTIVE_WINDOW: u8 = 0x40;

    // DCR
    pub const LINE_START: u8 = 0x80;
    pub const LINE_STATUS: u8 = 0x80;
    pub const CIRCLE_START: u8 = 0x40;
    pub const CIRCLE_STATUS: u8 = 0x40;
    pub const SHAPE_FILL: u8 = 0x20;
    pub const SHAPE_SQUARE: u8 = 0x10;
    pub const SHAPE_TRIANGLE: u8 = 0x01;

    // ELLIPSE (DECSR)
    pub const ELLIPSE_START: u8 = 0x80;
    pub const ELLIPSE_STATUS: u8 = 0x80;
    pub const ELLIPSE_FILL: u8 = 0x40;
    pub const ELLIPSE_ROUND_RECT: u8 = 0x20;
    pub const ELLIPSE_CURVE: u8 = 0x10;

    // BECR0
    pub const BTE_ENABLE: u8 = 0x80;
    pub const BTE_SOURCE_LINEAR: u8 = 0x40;

    // BECR1 operation codes
    pub const BTE_MOVE_POSITIVE: u8 = 0x02;
    pub const BTE_MOVE_NEGATIVE: u8 = 0x03;
    pub const BTE_TRANSPARENT_MOVE: u8 = 0x05;
    pub const BTE_COLOR_EXPANSION: u8 = 0x0B;
    pub const BTE_TRANSPARENT_EXPANSION: u8 = 0x0A;

    // status register
    pub const STATUS_MEMORY_BUSY: u8 = 0x80;
    pub const STATUS_BTE_BUSY: u8 = 0x40;
    pub const STATUS_TOUCH: u8 = 0x20;

    // PxCR
    pub const PWM_ENABLE: u8 = 0x80;
    pub const PWM_CLOCK_MASK: u8 = 0x0F;

    // TPCR0, TPCR1
    pub const TOUCH_ENABLE: u8 = 0x83;
    pub const TOUCH_IDLE: u8 = 0x40;
    pub const TOUCH_WAIT: u8 = 0x41;
    pub const TOUCH_LATCH_X: u8 = 0x42;
    pub const TOUCH_LATCH_Y: u8 = 0x43;

    // INTC1, INTC2
    pub const INT_TOUCH: u8 = 0x04;

    // PTNO
    pub const PATTERN_16X16: u8 = 0x80;
}
