//! Command opcodes and their byte encoding
//!
//! Every command goes out as its own I2C write: the command marker
//! [`Cmd::MARKER`] followed by the bytes returned from [`Command::encode`].

use crate::flag::{ChargePumpMode, Flag, MemoryMode, VcomLevel};

/// Opcodes of the SSD1315 command set
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Control bytes
    pub const MARKER: u8 = 0x80;
    pub const DATA: u8 = 0x40;

    // Fundamental
    pub const CONTRAST: u8 = 0x81;
    pub const ENTIRE_DISPLAY_ON: u8 = 0xA4;
    pub const INVERSE_DISPLAY: u8 = 0xA6;
    pub const DISPLAY_ON: u8 = 0xAE;
    pub const NOP: u8 = 0xE3;

    // Scrolling
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const ACTIVATE_SCROLL: u8 = 0x2F;

    // Addressing
    pub const LOWER_COLUMN_START: u8 = 0x00;
    pub const HIGHER_COLUMN_START: u8 = 0x10;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const COLUMN_ADDRESS: u8 = 0x21;
    pub const PAGE_ADDRESS: u8 = 0x22;
    pub const PAGE_START: u8 = 0xB0;

    // Hardware configuration
    pub const DISPLAY_START_LINE: u8 = 0x40;
    pub const SEGMENT_REMAP: u8 = 0xA0;
    pub const MUX_RATIO: u8 = 0xA8;
    pub const COM_SCAN_DIRECTION: u8 = 0xC0;
    pub const DISPLAY_OFFSET: u8 = 0xD3;
    pub const COM_PINS: u8 = 0xDA;

    // Timing and driving
    pub const CLOCK_DIVIDE: u8 = 0xD5;
    pub const PRECHARGE_PERIOD: u8 = 0xD9;
    pub const VCOMH_LEVEL: u8 = 0xDB;
    pub const CHARGE_PUMP: u8 = 0x8D;
}

/// A single controller command together with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Panel on (`true`) or sleep (`false`)
    DisplayOn(bool),
    /// Light every pixel regardless of RAM content
    EntireDisplayOn(bool),
    /// Lower nibble of the page-mode column start
    LowerColumnStart(u8),
    /// Upper three bits of the page-mode column start
    HigherColumnStart(u8),
    /// RAM row shown on the first display line
    DisplayStartLine(u8),
    /// Memory addressing mode
    MemoryMode(MemoryMode),
    /// Page-mode page start
    PageStart(u8),
    /// Contrast, 0..=255
    Contrast(u8),
    /// Mirror columns
    SegmentRemap(bool),
    /// Multiplex ratio, clamped to 15..=63 when encoded
    MuxRatio(u8),
    /// Scan COM outputs from COM[N-1] to COM0
    ComScanInverted(bool),
    /// Vertical shift by COM
    DisplayOffset(u8),
    /// Oscillator frequency and clock divide ratio, 4 bits each
    Clock {
        /// Oscillator frequency setting
        freq: u8,
        /// Divide ratio minus one
        divider: u8,
    },
    /// Pre-charge period, phase 2 in the high nibble and phase 1 in the low nibble
    PrechargePeriod(u8),
    /// COM pins hardware configuration
    ComPins {
        /// Alternative COM pin configuration
        alternative: bool,
        /// Left/right COM remap
        left_right_remap: bool,
    },
    /// VCOMH deselect level
    VcomhLevel(VcomLevel),
    /// Charge pump mode
    ChargePump(ChargePumpMode),
    /// Inverted (`true`) or normal display
    Invert(bool),
    /// Horizontal/vertical mode column window
    ColumnAddress {
        /// First column
        begin: u8,
        /// Last column
        end: u8,
    },
    /// Horizontal/vertical mode page window
    PageAddress {
        /// First page
        begin: u8,
        /// Last page
        end: u8,
    },
    /// Start (`true`) or stop continuous scrolling
    Scroll(bool),
    /// No operation
    Nop,
}

/// Encoded command bytes, without the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; 3],
    len: usize,
}

impl Encoded {
    fn one(a: u8) -> Self {
        Encoded {
            bytes: [a, 0, 0],
            len: 1,
        }
    }

    fn two(a: u8, b: u8) -> Self {
        Encoded {
            bytes: [a, b, 0],
            len: 2,
        }
    }

    fn three(a: u8, b: u8, c: u8) -> Self {
        Encoded {
            bytes: [a, b, c],
            len: 3,
        }
    }

    /// The encoded bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Command {
    /// Encode into 1 to 3 bytes. Out of range parameters are masked to the
    /// width of their register field.
    pub fn encode(self) -> Encoded {
        match self {
            Command::DisplayOn(on) => Encoded::one(Cmd::DISPLAY_ON | u8::from(on)),
            Command::EntireDisplayOn(on) => Encoded::one(Cmd::ENTIRE_DISPLAY_ON | u8::from(on)),
            Command::LowerColumnStart(col) => {
                Encoded::one(Cmd::LOWER_COLUMN_START | (col & Flag::LOWER_COLUMN_MASK))
            }
            Command::HigherColumnStart(col) => {
                Encoded::one(Cmd::HIGHER_COLUMN_START | ((col >> 4) & Flag::HIGHER_COLUMN_MASK))
            }
            Command::DisplayStartLine(line) => {
                Encoded::one(Cmd::DISPLAY_START_LINE | (line & Flag::START_LINE_MASK))
            }
            Command::MemoryMode(mode) => {
                Encoded::two(Cmd::MEMORY_MODE, mode as u8 & Flag::MEMORY_MODE_MASK)
            }
            Command::PageStart(page) => Encoded::one(Cmd::PAGE_START | (page & Flag::PAGE_MASK)),
            Command::Contrast(contrast) => Encoded::two(Cmd::CONTRAST, contrast),
            Command::SegmentRemap(remap) => Encoded::one(Cmd::SEGMENT_REMAP | u8::from(remap)),
            Command::MuxRatio(mux) => {
                Encoded::two(Cmd::MUX_RATIO, mux.clamp(Flag::MUX_MIN, Flag::MUX_MAX))
            }
            Command::ComScanInverted(invert) => Encoded::one(
                Cmd::COM_SCAN_DIRECTION | (u8::from(invert) << Flag::COM_SCAN_INVERT_POS),
            ),
            Command::DisplayOffset(offset) => Encoded::two(Cmd::DISPLAY_OFFSET, offset),
            Command::Clock { freq, divider } => Encoded::two(
                Cmd::CLOCK_DIVIDE,
                (divider & Flag::CLOCK_DIVIDER_MASK)
                    | ((freq << Flag::CLOCK_FREQ_POS) & Flag::CLOCK_FREQ_MASK),
            ),
            Command::PrechargePeriod(period) => Encoded::two(Cmd::PRECHARGE_PERIOD, period),
            Command::ComPins {
                alternative,
                left_right_remap,
            } => Encoded::two(
                Cmd::COM_PINS,
                Flag::COM_PINS_BASE
                    | (u8::from(alternative) << Flag::COM_PINS_ALTERNATIVE_POS)
                    | (u8::from(left_right_remap) << Flag::COM_PINS_REMAP_POS),
            ),
            Command::VcomhLevel(level) => Encoded::two(Cmd::VCOMH_LEVEL, level as u8),
            Command::ChargePump(mode) => Encoded::two(Cmd::CHARGE_PUMP, mode as u8),
            Command::Invert(invert) => Encoded::one(Cmd::INVERSE_DISPLAY | u8::from(invert)),
            Command::ColumnAddress { begin, end } => Encoded::three(
                Cmd::COLUMN_ADDRESS,
                begin & Flag::COLUMN_MASK,
                end & Flag::COLUMN_MASK,
            ),
            Command::PageAddress { begin, end } => Encoded::three(
                Cmd::PAGE_ADDRESS,
                begin & Flag::PAGE_MASK,
                end & Flag::PAGE_MASK,
            ),
            Command::Scroll(true) => Encoded::one(Cmd::ACTIVATE_SCROLL),
            Command::Scroll(false) => Encoded::one(Cmd::DEACTIVATE_SCROLL),
            Command::Nop => Encoded::one(Cmd::NOP),
        }
    }
}

/// Page-mode column start as the pair of commands the controller expects.
///
/// The column register is split over two opcodes: bits 0..=3 go with
/// `0x00`, bits 4..=6 with `0x10`. The lower nibble command is sent first.
pub fn column_start(col: u8) -> [Command; 2] {
    [
        Command::LowerColumnStart(col),
        Command::HigherColumnStart(col),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_pair(col: u8) -> (u8, u8) {
        let [low, high] = column_start(col);
        (low.encode().as_slice()[0], high.encode().as_slice()[0])
    }

    #[test]
    fn column_start_splits_into_nibbles() {
        assert_eq!(column_pair(0), (0x00, 0x10));
        assert_eq!(column_pair(0x0F), (0x0F, 0x10));
        assert_eq!(column_pair(0x10), (0x00, 0x11));
        assert_eq!(column_pair(31), (0x0F, 0x11));
        assert_eq!(column_pair(62), (0x0E, 0x13));
        assert_eq!(column_pair(100), (0x04, 0x16));
        assert_eq!(column_pair(0x7F), (0x0F, 0x17));
    }

    #[test]
    fn column_start_drops_bit_seven() {
        assert_eq!(column_pair(0x80), (0x00, 0x10));
        assert_eq!(column_pair(0xFF), (0x0F, 0x17));
    }

    #[test]
    fn page_start_masks_to_three_bits() {
        assert_eq!(Command::PageStart(0).encode().as_slice(), &[0xB0]);
        assert_eq!(Command::PageStart(7).encode().as_slice(), &[0xB7]);
        assert_eq!(Command::PageStart(9).encode().as_slice(), &[0xB1]);
    }

    #[test]
    fn single_byte_toggles() {
        assert_eq!(Command::DisplayOn(true).encode().as_slice(), &[0xAF]);
        assert_eq!(Command::DisplayOn(false).encode().as_slice(), &[0xAE]);
        assert_eq!(Command::EntireDisplayOn(true).encode().as_slice(), &[0xA5]);
        assert_eq!(Command::SegmentRemap(true).encode().as_slice(), &[0xA1]);
        assert_eq!(Command::Invert(true).encode().as_slice(), &[0xA7]);
        assert_eq!(Command::ComScanInverted(true).encode().as_slice(), &[0xC8]);
        assert_eq!(Command::ComScanInverted(false).encode().as_slice(), &[0xC0]);
        assert_eq!(Command::Scroll(true).encode().as_slice(), &[0x2F]);
        assert_eq!(Command::Scroll(false).encode().as_slice(), &[0x2E]);
        assert_eq!(Command::Nop.encode().as_slice(), &[0xE3]);
    }

    #[test]
    fn start_line_masks_to_six_bits() {
        assert_eq!(Command::DisplayStartLine(0).encode().as_slice(), &[0x40]);
        assert_eq!(Command::DisplayStartLine(63).encode().as_slice(), &[0x7F]);
        assert_eq!(Command::DisplayStartLine(64).encode().as_slice(), &[0x40]);
    }

    #[test]
    fn mux_ratio_is_clamped() {
        assert_eq!(Command::MuxRatio(0).encode().as_slice(), &[0xA8, 15]);
        assert_eq!(Command::MuxRatio(31).encode().as_slice(), &[0xA8, 31]);
        assert_eq!(Command::MuxRatio(200).encode().as_slice(), &[0xA8, 63]);
    }

    #[test]
    fn clock_packs_frequency_and_divider() {
        let cmd = Command::Clock {
            freq: 0x8,
            divider: 0x0,
        };
        assert_eq!(cmd.encode().as_slice(), &[0xD5, 0x80]);

        let cmd = Command::Clock {
            freq: 0x1F,
            divider: 0x13,
        };
        assert_eq!(cmd.encode().as_slice(), &[0xD5, 0xF3]);
    }

    #[test]
    fn com_pins_sets_fixed_bit() {
        let cmd = Command::ComPins {
            alternative: false,
            left_right_remap: false,
        };
        assert_eq!(cmd.encode().as_slice(), &[0xDA, 0x02]);

        let cmd = Command::ComPins {
            alternative: true,
            left_right_remap: true,
        };
        assert_eq!(cmd.encode().as_slice(), &[0xDA, 0x32]);
    }

    #[test]
    fn address_windows_are_masked() {
        let cmd = Command::ColumnAddress {
            begin: 0,
            end: 0xFF,
        };
        assert_eq!(cmd.encode().as_slice(), &[0x21, 0x00, 0x7F]);

        let cmd = Command::PageAddress { begin: 2, end: 15 };
        assert_eq!(cmd.encode().as_slice(), &[0x22, 0x02, 0x07]);
    }

    #[test]
    fn enum_parameters_pass_through() {
        assert_eq!(
            Command::MemoryMode(MemoryMode::Page).encode().as_slice(),
            &[0x20, 0x02]
        );
        assert_eq!(
            Command::ChargePump(ChargePumpMode::Mode7V5).encode().as_slice(),
            &[0x8D, 0x14]
        );
        assert_eq!(
            Command::VcomhLevel(VcomLevel::Level0_77).encode().as_slice(),
            &[0xDB, 0x20]
        );
        assert_eq!(Command::Contrast(0x7F).encode().as_slice(), &[0x81, 0x7F]);
    }
}
