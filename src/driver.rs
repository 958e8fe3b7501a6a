//! SSD1315 Display Driver Implementation
//!
//! This module contains the main driver implementation for the SSD1315 OLED controller.
//! It owns the display buffer and turns region writes into page/column addressed
//! I2C transfers.
//!
//! ## Architecture
//!
//! The driver is organized into several function categories:
//!
//! ### Initialization Functions
//! - `new()` - Create the driver, no bus traffic
//! - `init()` - Default power-up sequence followed by a clear
//!
//! ### Region Functions
//! - `output_bitmap()` - Copy packed bytes into the buffer and send the region
//! - `fill_area()` - Fill a region with one byte value and send it
//! - `clear_screen()` - Zero the whole panel
//! - `draw_bitmap()` - Send an embedded-graphics [`PackedBitmap`]
//!
//! ### Configuration Functions
//! - `set_*()` - One-shot controller commands
//! - `command()` - Send any [`Command`] directly
//!
//! ### Buffer Access
//! - `framebuffer()` - The whole buffer, page by page
//! - `read_region()` - A region of the buffer in packed order
//!
//! ## Critical Implementation Details
//!
//! ### Buffer layout
//!
//! The buffer mirrors display RAM: the byte for (page, column) lives at
//! `page * WIDTH + column`. Region writes land at their real position, and
//! transfers always read back from the buffer, never from the caller's slice.
//!
//! ### Transfer size
//!
//! Many I2C peripherals cap a single write well below a full 128 column
//! page. Every page is sent as a run of chunks of at most
//! `max_transfer - 1` bytes, each preceded by a fresh column address.
//!
//! ### Column addressing
//!
//! Page addressing mode takes the column start as two commands, lower
//! nibble (`0x00..=0x0F`) then upper three bits (`0x10..=0x17`). See
//! [`cmd::column_start`](crate::cmd::column_start).
//!
//! ### Bus errors
//!
//! A failed write is logged and counted. With [`BusErrorPolicy::Continue`]
//! the transfer carries on with the next command or chunk; with
//! [`BusErrorPolicy::Abort`] the error is returned immediately.

use display_interface::DisplayError;
use embedded_hal::i2c::I2c;

use crate::cmd::{column_start, Command};
use crate::config::{BusErrorPolicy, Config};
use crate::error::Error;
use crate::flag::{ChargePumpMode, MemoryMode, VcomLevel};
use crate::graphics::PackedBitmap;
use crate::interface::DisplayInterface;
use crate::region::Region;
use crate::{BUFFER_SIZE, WIDTH};

const COLUMNS: usize = WIDTH as usize;

/// SSD1315 OLED Display Driver
///
/// Owns the I2C interface and the display buffer. All operations are
/// blocking and run to completion on the calling thread.
pub struct Ssd1315<I2C> {
    /// The display interface
    interface: DisplayInterface<I2C>,
    config: Config,
    buffer: [u8; BUFFER_SIZE],
    bus_errors: u32,
}

impl<I2C> Ssd1315<I2C> {
    /// Create the driver. Sends nothing; call [`Ssd1315::init`] to bring the panel up.
    pub fn new(i2c: I2C, config: Config) -> Result<Self, Error> {
        if !config.is_valid() {
            log::error!(
                "Rejecting max transfer of {} bytes, must be 2..={}",
                config.max_transfer,
                crate::MAX_TRANSFER_LIMIT
            );
            return Err(Error::InvalidConfig);
        }

        Ok(Ssd1315 {
            interface: DisplayInterface::new(i2c, config.address),
            config,
            buffer: [0; BUFFER_SIZE],
            bus_errors: 0,
        })
    }

    /// Configuration the driver was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The whole display buffer, `page * WIDTH + column`
    pub fn framebuffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Failed I2C writes since creation, saturating
    pub fn bus_error_count(&self) -> u32 {
        self.bus_errors
    }

    /// Copy a region of the buffer into `out` in packed order, the same
    /// layout [`Ssd1315::output_bitmap`] takes.
    pub fn read_region(&self, region: Region, out: &mut [u8]) -> Result<(), Error> {
        region.validate_len(out.len())?;

        let x = region.x as usize;
        let width = region.width as usize;
        for (page, row) in region.pages().zip(out.chunks_exact_mut(width)) {
            let start = usize::from(page) * COLUMNS + x;
            row.copy_from_slice(&self.buffer[start..start + width]);
        }
        Ok(())
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2C {
        self.interface.release()
    }
}

impl<I2C> Ssd1315<I2C>
where
    I2C: I2c,
{
    /// Default power-up sequence, then a clear.
    ///
    /// `xy_flip` rotates the picture by 180 degrees (segment remap plus
    /// reversed COM scan), for modules mounted upside down.
    pub fn init(&mut self, xy_flip: bool) -> Result<(), Error> {
        log::info!(
            "Initializing SSD1315 at 0x{:02X}, flipped: {}",
            self.interface.address(),
            xy_flip
        );

        self.set_charge_pump(ChargePumpMode::Mode7V5)?;
        self.set_display_on(false)?;
        self.set_memory_mode(MemoryMode::Page)?;
        self.set_display_start_line(0)?;
        self.set_com_scan_inverted(xy_flip)?;
        self.set_segment_remap(xy_flip)?;
        self.set_inverted(false)?;
        self.set_display_on(true)?;
        self.set_entire_display_on(false)?;

        self.clear_screen()
    }

    // ==================== Region Functions ====================

    /// Send a prepared bitmap.
    ///
    /// `data` holds one byte per column per page: each byte is 8 pixels of
    /// one column (LSB on top), bytes go left to right, pages top to bottom.
    /// Its length must be exactly `height / 8 * width`.
    ///
    /// Nothing is written to the buffer or the bus if the region or the
    /// length is invalid.
    pub fn output_bitmap(&mut self, region: Region, data: &[u8]) -> Result<(), Error> {
        region.validate_len(data.len())?;

        let x = region.x as usize;
        let width = region.width as usize;
        for (page, row) in region.pages().zip(data.chunks_exact(width)) {
            let start = usize::from(page) * COLUMNS + x;
            self.buffer[start..start + width].copy_from_slice(row);
        }

        self.write_region(region)
    }

    /// Fill a region with one byte value, 8 vertical pixels at a time
    pub fn fill_area(&mut self, region: Region, data: u8) -> Result<(), Error> {
        region.validate()?;

        let x = region.x as usize;
        let width = region.width as usize;
        for page in region.pages() {
            let start = usize::from(page) * COLUMNS + x;
            self.buffer[start..start + width].fill(data);
        }

        self.write_region(region)
    }

    /// Zero the buffer and send the whole panel
    pub fn clear_screen(&mut self) -> Result<(), Error> {
        self.fill_area(Region::full(), 0x00)
    }

    /// Send an embedded-graphics bitmap with its top left corner at (`x`, `y`).
    /// `y` has to be a multiple of 8.
    pub fn draw_bitmap(&mut self, x: u32, y: u32, bitmap: &PackedBitmap<'_>) -> Result<(), Error> {
        let region = Region::new(x, y, bitmap.width(), bitmap.height());
        self.output_bitmap(region, bitmap.as_bytes())
    }

    /// Stream a validated region of the buffer to the panel, page by page,
    /// in chunks that fit one I2C write.
    fn write_region(&mut self, region: Region) -> Result<(), Error> {
        let max_chunk = self.config.max_chunk();
        let columns = region.columns();
        let first = usize::from(*columns.start());
        let end = usize::from(*columns.end()) + 1;

        log::debug!(
            "Writing pages {:?} columns {:?} in chunks of {}",
            region.pages(),
            columns,
            max_chunk
        );

        for page in region.pages() {
            self.command(Command::PageStart(page))?;

            let row = usize::from(page) * COLUMNS;
            let mut col = first;
            while col < end {
                self.set_column_start(col as u8)?;

                let chunk = max_chunk.min(end - col);
                let start = row + col;
                let result = self.interface.data(&self.buffer[start..start + chunk]);
                self.settle(result)?;

                col += chunk;
            }
        }
        Ok(())
    }

    /// Apply the bus error policy to the outcome of one write
    fn settle(&mut self, result: Result<(), DisplayError>) -> Result<(), Error> {
        let Err(e) = result else {
            return Ok(());
        };

        self.bus_errors = self.bus_errors.saturating_add(1);
        match self.config.bus_error_policy {
            BusErrorPolicy::Continue => Ok(()),
            BusErrorPolicy::Abort => {
                log::error!("Aborting transfer after I2C write error");
                Err(Error::Bus(e))
            }
        }
    }

    // ==================== Configuration Functions ====================

    /// Send one command directly
    pub fn command(&mut self, command: Command) -> Result<(), Error> {
        log::trace!("Command {:?}", command);
        let result = self.interface.cmd(command);
        self.settle(result)
    }

    /// Panel on or sleep
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error> {
        self.command(Command::DisplayOn(on))
    }

    /// Light every pixel (`true`) or follow RAM content
    pub fn set_entire_display_on(&mut self, on: bool) -> Result<(), Error> {
        self.command(Command::EntireDisplayOn(on))
    }

    /// Page mode column start, sent as the lower and higher nibble commands
    pub fn set_column_start(&mut self, col: u8) -> Result<(), Error> {
        for command in column_start(col) {
            self.command(command)?;
        }
        Ok(())
    }

    /// RAM row shown on the first line, 0..=63
    pub fn set_display_start_line(&mut self, line: u8) -> Result<(), Error> {
        self.command(Command::DisplayStartLine(line))
    }

    /// Memory addressing mode. Region writes rely on [`MemoryMode::Page`].
    pub fn set_memory_mode(&mut self, mode: MemoryMode) -> Result<(), Error> {
        self.command(Command::MemoryMode(mode))
    }

    /// Page mode page start, 0..=7
    pub fn set_page_start(&mut self, page: u8) -> Result<(), Error> {
        self.command(Command::PageStart(page))
    }

    /// Contrast, 0..=255
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error> {
        self.command(Command::Contrast(contrast))
    }

    /// Mirror horizontally
    pub fn set_segment_remap(&mut self, remap: bool) -> Result<(), Error> {
        self.command(Command::SegmentRemap(remap))
    }

    /// Multiplex ratio, clamped to 15..=63
    pub fn set_mux_ratio(&mut self, mux: u8) -> Result<(), Error> {
        self.command(Command::MuxRatio(mux))
    }

    /// Mirror vertically
    pub fn set_com_scan_inverted(&mut self, invert: bool) -> Result<(), Error> {
        self.command(Command::ComScanInverted(invert))
    }

    /// Vertical shift by COM, 0..=63
    pub fn set_display_offset(&mut self, offset: u8) -> Result<(), Error> {
        self.command(Command::DisplayOffset(offset))
    }

    /// Oscillator frequency and divide ratio, 4 bits each
    pub fn set_clock(&mut self, freq: u8, divider: u8) -> Result<(), Error> {
        self.command(Command::Clock { freq, divider })
    }

    /// Pre-charge period
    pub fn set_precharge_period(&mut self, period: u8) -> Result<(), Error> {
        self.command(Command::PrechargePeriod(period))
    }

    /// COM pins hardware configuration
    pub fn set_com_pins(&mut self, alternative: bool, left_right_remap: bool) -> Result<(), Error> {
        self.command(Command::ComPins {
            alternative,
            left_right_remap,
        })
    }

    /// VCOMH deselect level
    pub fn set_vcomh_level(&mut self, level: VcomLevel) -> Result<(), Error> {
        self.command(Command::VcomhLevel(level))
    }

    /// Charge pump mode
    pub fn set_charge_pump(&mut self, mode: ChargePumpMode) -> Result<(), Error> {
        self.command(Command::ChargePump(mode))
    }

    /// Inverted or normal display
    pub fn set_inverted(&mut self, invert: bool) -> Result<(), Error> {
        self.command(Command::Invert(invert))
    }

    /// Column window for horizontal and vertical addressing modes
    pub fn set_column_address(&mut self, begin: u8, end: u8) -> Result<(), Error> {
        self.command(Command::ColumnAddress { begin, end })
    }

    /// Page window for horizontal and vertical addressing modes
    pub fn set_page_address(&mut self, begin: u8, end: u8) -> Result<(), Error> {
        self.command(Command::PageAddress { begin, end })
    }

    /// Start or stop a previously set up scroll
    pub fn set_scroll_active(&mut self, active: bool) -> Result<(), Error> {
        self.command(Command::Scroll(active))
    }

    /// No operation
    pub fn nop(&mut self) -> Result<(), Error> {
        self.command(Command::Nop)
    }
}
