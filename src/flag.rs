//! Register field masks and parameter values

/// Register field masks and bit positions used by the SSD1315 commands.
///
/// These go together with the opcodes in [`crate::cmd::Cmd`].
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Page addressing mode column start (0x00 / 0x10)
    pub const LOWER_COLUMN_MASK: u8 = 0x0F;
    pub const HIGHER_COLUMN_MASK: u8 = 0x07;

    // Memory Addressing Mode (0x20)
    pub const MEMORY_MODE_MASK: u8 = 0x03;

    // Column Address (0x21) and Page Address (0x22) windows
    pub const COLUMN_MASK: u8 = 0x7F;
    pub const PAGE_MASK: u8 = 0x07;

    // Display Start Line (0x40)
    pub const START_LINE_MASK: u8 = 0x3F;

    // Multiplex Ratio (0xA8), in rows minus one
    pub const MUX_MIN: u8 = 15;
    pub const MUX_MAX: u8 = 63;

    // COM Output Scan Direction (0xC0 / 0xC8)
    pub const COM_SCAN_INVERT_POS: u8 = 3;

    // Display Clock Divide Ratio / Oscillator Frequency (0xD5)
    pub const CLOCK_FREQ_POS: u8 = 4;
    pub const CLOCK_FREQ_MASK: u8 = 0xF0;
    pub const CLOCK_DIVIDER_MASK: u8 = 0x0F;

    // COM Pins Hardware Configuration (0xDA), bit 1 is always set
    pub const COM_PINS_BASE: u8 = 0x02;
    pub const COM_PINS_ALTERNATIVE_POS: u8 = 4;
    pub const COM_PINS_REMAP_POS: u8 = 5;
}

/// Memory addressing mode (0x20)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryMode {
    /// Column pointer wraps into the next page
    Horizontal = 0x00,
    /// Page pointer wraps into the next column
    Vertical = 0x01,
    /// Column pointer stays inside the current page
    Page = 0x02,
}

/// VCOMH deselect level (0xDB), as a fraction of VCC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum VcomLevel {
    Level0_65 = 0x00,
    Level0_71 = 0x10,
    Level0_77 = 0x20,
    Level0_83 = 0x30,
}

/// Charge pump setting (0x8D)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargePumpMode {
    /// Charge pump off, external VCC
    Disable = 0x10,
    /// 7.5V
    Mode7V5 = 0x14,
    /// 8.5V
    Mode8V5 = 0x94,
    /// 9.0V
    Mode9V = 0x95,
}
