//! Pixel regions and their validation against the display geometry
//!
//! The controller addresses RAM in pages of 8 rows, so a region's top edge
//! and height have to be multiples of 8. Horizontally any column range
//! inside the panel is fine.

use core::ops::RangeInclusive;

use embedded_graphics::primitives::Rectangle;

use crate::error::Error;
use crate::{BITS_PER_PAGE, BUFFER_SIZE, HEIGHT, WIDTH};

/// A rectangle of pixels, in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// First column
    pub x: u32,
    /// First row, multiple of 8
    pub y: u32,
    /// Width in columns
    pub width: u32,
    /// Height in rows, multiple of 8
    pub height: u32,
}

impl Region {
    /// Create a region. Nothing is checked until [`Region::validate`].
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole panel
    pub const fn full() -> Self {
        Region::new(0, 0, WIDTH, HEIGHT)
    }

    /// Check the region against the panel geometry.
    ///
    /// Rows are checked before columns, and the first failure wins.
    /// Returns the number of packed bytes the region covers.
    pub fn validate(&self) -> Result<usize, Error> {
        self.check_rows()?;
        self.check_columns()?;
        let size = self.byte_count();
        Self::check_capacity(size)?;
        Ok(size)
    }

    /// Same as [`Region::validate`], and `len` must be exactly the number
    /// of bytes the region needs.
    pub fn validate_len(&self, len: usize) -> Result<usize, Error> {
        self.check_rows()?;
        self.check_columns()?;

        let expected = self.byte_count();
        if len != expected {
            log::warn!(
                "Rejecting {} data bytes for a {}x{} region, expected {}",
                len,
                self.width,
                self.height,
                expected
            );
            return Err(Error::InvalidLength {
                expected,
                actual: len,
            });
        }

        Self::check_capacity(expected)?;
        Ok(expected)
    }

    fn check_rows(&self) -> Result<(), Error> {
        if self.rows_valid() {
            return Ok(());
        }
        log::warn!(
            "Rejecting rows y={} height={}: must be page aligned and within {} rows",
            self.y,
            self.height,
            HEIGHT
        );
        Err(Error::InvalidRows)
    }

    fn check_columns(&self) -> Result<(), Error> {
        if self.columns_valid() {
            return Ok(());
        }
        log::warn!(
            "Rejecting columns x={} width={}: must be within {} columns",
            self.x,
            self.width,
            WIDTH
        );
        Err(Error::InvalidColumns)
    }

    // Unreachable with the row and column checks in place, guards the copy
    // into the buffer.
    fn check_capacity(size: usize) -> Result<(), Error> {
        if size > BUFFER_SIZE {
            log::warn!("Rejecting region of {} bytes, buffer holds {}", size, BUFFER_SIZE);
            return Err(Error::Oversized);
        }
        Ok(())
    }

    fn rows_valid(&self) -> bool {
        self.height > 0
            && self.y % BITS_PER_PAGE == 0
            && self.height % BITS_PER_PAGE == 0
            && self
                .y
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= HEIGHT)
    }

    fn columns_valid(&self) -> bool {
        self.width > 0
            && self
                .x
                .checked_add(self.width)
                .is_some_and(|right| right <= WIDTH)
    }

    /// Packed bytes covered: one per column per page
    pub fn byte_count(&self) -> usize {
        (self.height / BITS_PER_PAGE) as usize * self.width as usize
    }

    /// Pages covered, first to last inclusive. Empty if the rows are invalid.
    pub(crate) fn pages(&self) -> RangeInclusive<u8> {
        if !self.rows_valid() {
            return RangeInclusive::new(1, 0);
        }
        let first = self.y / BITS_PER_PAGE;
        let last = (self.y + self.height) / BITS_PER_PAGE - 1;
        first as u8..=last as u8
    }

    /// Columns covered, first to last inclusive. Empty if the columns are invalid.
    pub(crate) fn columns(&self) -> RangeInclusive<u8> {
        if !self.columns_valid() {
            return RangeInclusive::new(1, 0);
        }
        let last = self.x + self.width - 1;
        self.x as u8..=last as u8
    }
}

impl TryFrom<Rectangle> for Region {
    type Error = Error;

    /// Convert an `embedded-graphics` rectangle. Negative coordinates are
    /// rejected with the same errors as out of range ones; the full
    /// geometry check still happens in [`Region::validate`].
    fn try_from(rect: Rectangle) -> Result<Self, Self::Error> {
        let y = u32::try_from(rect.top_left.y).map_err(|_| Error::InvalidRows)?;
        let x = u32::try_from(rect.top_left.x).map_err(|_| Error::InvalidColumns)?;
        Ok(Region::new(x, y, rect.size.width, rect.size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::{Point, Size};

    #[test]
    fn full_single_page_is_valid() {
        assert_eq!(Region::new(0, 0, 128, 8).validate().unwrap(), 128);
    }

    #[test]
    fn full_panel_is_valid() {
        assert_eq!(Region::full().validate().unwrap(), BUFFER_SIZE);
    }

    #[test]
    fn unaligned_rows_are_rejected() {
        assert!(matches!(
            Region::new(0, 4, 128, 8).validate(),
            Err(Error::InvalidRows)
        ));
        assert!(matches!(
            Region::new(0, 0, 128, 12).validate(),
            Err(Error::InvalidRows)
        ));
    }

    #[test]
    fn rows_past_the_bottom_are_rejected() {
        assert!(matches!(
            Region::new(0, 56, 10, 16).validate(),
            Err(Error::InvalidRows)
        ));
        assert!(matches!(
            Region::new(0, 0, 10, 0).validate(),
            Err(Error::InvalidRows)
        ));
        assert!(matches!(
            Region::new(0, u32::MAX - 7, 10, 16).validate(),
            Err(Error::InvalidRows)
        ));
    }

    #[test]
    fn columns_past_the_edge_are_rejected() {
        assert!(matches!(
            Region::new(120, 0, 16, 8).validate(),
            Err(Error::InvalidColumns)
        ));
        assert!(matches!(
            Region::new(0, 0, 0, 8).validate(),
            Err(Error::InvalidColumns)
        ));
        assert!(matches!(
            Region::new(u32::MAX, 0, 2, 8).validate(),
            Err(Error::InvalidColumns)
        ));
        assert_eq!(Region::new(120, 0, 8, 8).validate().unwrap(), 8);
    }

    #[test]
    fn rows_are_checked_before_columns() {
        assert!(matches!(
            Region::new(200, 3, 16, 8).validate(),
            Err(Error::InvalidRows)
        ));
    }

    #[test]
    fn length_must_match_region() {
        let region = Region::new(10, 8, 20, 16);
        assert_eq!(region.validate_len(40).unwrap(), 40);
        match region.validate_len(39) {
            Err(Error::InvalidLength { expected, actual }) => {
                assert_eq!(expected, 40);
                assert_eq!(actual, 39);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn geometry_errors_win_over_length() {
        assert!(matches!(
            Region::new(0, 4, 8, 8).validate_len(3),
            Err(Error::InvalidRows)
        ));
        assert!(matches!(
            Region::new(127, 0, 8, 8).validate_len(3),
            Err(Error::InvalidColumns)
        ));
    }

    #[test]
    fn page_and_column_spans() {
        let region = Region::new(5, 16, 30, 24);
        assert_eq!(region.pages(), 2..=4);
        assert_eq!(region.columns(), 5..=34);
        assert_eq!(Region::full().pages(), 0..=7);
        assert_eq!(Region::full().columns(), 0..=127);
    }

    #[test]
    fn spans_of_invalid_regions_are_empty() {
        assert!(Region::new(0, 0, 0, 8).columns().is_empty());
        assert!(Region::new(u32::MAX, 0, 2, 8).columns().is_empty());
        assert!(Region::new(0, 0, 8, 0).pages().is_empty());
        assert!(Region::new(0, u32::MAX - 7, 0, 16).pages().is_empty());
        assert!(Region::new(0, 56, 8, 16).pages().is_empty());
    }

    #[test]
    fn rectangle_conversion() {
        let rect = Rectangle::new(Point::new(3, 8), Size::new(10, 16));
        assert_eq!(Region::try_from(rect).unwrap(), Region::new(3, 8, 10, 16));

        let rect = Rectangle::new(Point::new(0, -8), Size::new(10, 16));
        assert!(matches!(Region::try_from(rect), Err(Error::InvalidRows)));

        let rect = Rectangle::new(Point::new(-1, 0), Size::new(10, 16));
        assert!(matches!(Region::try_from(rect), Err(Error::InvalidColumns)));
    }
}
