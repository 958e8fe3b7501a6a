//! SSD1315 OLED Display Driver
//!
//! Used with the common 0.96" 128x64 monochrome OLED modules that talk I2C.
//!
//! The SSD1315 is register compatible with the SSD1306 for everything this
//! driver touches, so the same code drives both.
//!
//! ### Usage
//! The driver keeps one buffer that mirrors the controller's display RAM. To
//! display something you:
//!
//! 1. create the driver with [`driver::Ssd1315::new`] and run [`driver::Ssd1315::init`]
//! 1. prepare packed bytes yourself, or draw into a [`graphics::PackedBitmap`]
//!    with [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//! 1. send them with [`driver::Ssd1315::output_bitmap`] or [`driver::Ssd1315::draw_bitmap`]
//!
//! Regions are addressed in pixels but must start and end on a page boundary
//! vertically (multiples of 8 rows). Each byte carries 8 vertically stacked
//! pixels of one column, LSB on top.
//!
//! Transfers are split so that no single I2C write is longer than
//! [`config::Config::max_transfer`] bytes.
//!
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod config;
pub mod driver;
pub mod error;
pub mod flag;
pub mod graphics;
pub mod interface;
pub mod region;

pub use crate::cmd::{Cmd, Command};
pub use crate::config::{BusErrorPolicy, Config};
pub use crate::driver::Ssd1315;
pub use crate::error::Error;
pub use crate::flag::{ChargePumpMode, Flag, MemoryMode, VcomLevel};
pub use crate::graphics::PackedBitmap;
pub use crate::region::Region;

/// Default 7-bit I2C address (D/C# pin low)
pub const I2C_ADDR_DEFAULT: u8 = 0x3C;

/// Alternate 7-bit I2C address (D/C# pin high)
pub const I2C_ADDR_ALTERNATE: u8 = 0x3D;

/// Display width, pixels horizontally
pub const WIDTH: u32 = 128;

/// Display height, pixels vertically
pub const HEIGHT: u32 = 64;

/// Pixel rows packed into one page
pub const BITS_PER_PAGE: u32 = 8;

/// Number of 8-row pages
pub const PAGE_COUNT: u32 = HEIGHT / BITS_PER_PAGE;

/// Size in bytes of the whole display RAM
pub const BUFFER_SIZE: usize = (WIDTH * PAGE_COUNT) as usize;

/// Default upper bound for one I2C write, marker byte included
pub const I2C_BUFFER_SIZE: usize = 32;

/// Largest accepted transfer size: one full page plus the marker byte
pub const MAX_TRANSFER_LIMIT: usize = WIDTH as usize + 1;
