//! Graphics support via embedded-graphics
//!
//! [`PackedBitmap`] is a [`DrawTarget`] over a caller owned byte slice laid
//! out the way the controller wants it: one byte per column per 8-row page,
//! LSB on top, pages top to bottom. Draw into it, then hand it to
//! [`crate::driver::Ssd1315::draw_bitmap`].
//!
//! ```
//! use embedded_graphics::pixelcolor::BinaryColor;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::{Line, PrimitiveStyle};
//! use ssd1315::PackedBitmap;
//!
//! let mut bytes = [0u8; PackedBitmap::required_len(16, 8)];
//! let mut bitmap = PackedBitmap::new(&mut bytes, 16, 8).unwrap();
//! Line::new(Point::new(0, 0), Point::new(15, 0))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut bitmap)
//!     .unwrap();
//! assert!(bitmap.as_bytes().iter().all(|&b| b == 0x01));
//! ```

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use crate::error::Error;
use crate::BITS_PER_PAGE;

/// Page packed 1bpp image
pub struct PackedBitmap<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> PackedBitmap<'a> {
    /// Bytes needed for a `width` x `height` image. `height` is expected to
    /// be a multiple of 8.
    pub const fn required_len(width: u32, height: u32) -> usize {
        (height / BITS_PER_PAGE) as usize * width as usize
    }

    /// Wrap `buf` as a `width` x `height` image. The current content of
    /// `buf` is kept.
    pub fn new(buf: &'a mut [u8], width: u32, height: u32) -> Result<Self, Error> {
        if height == 0 || height % BITS_PER_PAGE != 0 {
            return Err(Error::InvalidRows);
        }
        if width == 0 {
            return Err(Error::InvalidColumns);
        }
        let expected = Self::required_len(width, height);
        if buf.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: buf.len(),
            });
        }

        Ok(PackedBitmap { buf, width, height })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed bytes, ready for [`crate::driver::Ssd1315::output_bitmap`]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf
    }

    /// Whether the pixel at (`x`, `y`) is lit. Out of range reads as off.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        match self.locate(x, y) {
            Some((index, mask)) => self.buf[index] & mask != 0,
            None => false,
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if let Some((index, mask)) = self.locate(x, y) {
            if on {
                self.buf[index] |= mask;
            } else {
                self.buf[index] &= !mask;
            }
        }
    }

    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let page = (y / BITS_PER_PAGE) as usize;
        let index = page * self.width as usize + x as usize;
        Some((index, 1 << (y % BITS_PER_PAGE)))
    }
}

impl DrawTarget for PackedBitmap<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            self.set_pixel(x, y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl OriginDimensions for PackedBitmap<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
