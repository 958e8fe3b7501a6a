//! embedded-graphics integration: draw into a packed bitmap and send it.
//!
//! Run with: cargo test --test graphics

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::{ErrorType, I2c, Operation};
use ssd1315::{Config, PackedBitmap, Region, Ssd1315};

struct NullI2c;

impl ErrorType for NullI2c {
    type Error = core::convert::Infallible;
}

impl I2c for NullI2c {
    fn transaction(
        &mut self,
        _address: u8,
        _operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn text_lands_in_the_framebuffer() -> anyhow::Result<()> {
    let mut bytes = [0u8; PackedBitmap::required_len(36, 16)];
    let mut bitmap = PackedBitmap::new(&mut bytes, 36, 16)?;
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    Text::with_baseline("kata", Point::new(0, 3), style, Baseline::Top).draw(&mut bitmap)?;

    let mut display = Ssd1315::new(NullI2c, Config::default())?;
    display.draw_bitmap(50, 24, &bitmap)?;

    let mut back = [0u8; PackedBitmap::required_len(36, 16)];
    display.read_region(Region::new(50, 24, 36, 16), &mut back)?;
    assert_eq!(back.as_slice(), bitmap.as_bytes());
    assert!(back.iter().any(|&b| b != 0));
    Ok(())
}

#[test]
fn rectangle_matches_fill_area() -> anyhow::Result<()> {
    let mut bytes = [0u8; PackedBitmap::required_len(20, 16)];
    let mut bitmap = PackedBitmap::new(&mut bytes, 20, 16)?;
    bitmap
        .bounding_box()
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(&mut bitmap)?;

    let mut drawn = Ssd1315::new(NullI2c, Config::default())?;
    drawn.draw_bitmap(8, 40, &bitmap)?;

    let mut filled = Ssd1315::new(NullI2c, Config::default())?;
    let region = Region::try_from(Rectangle::new(Point::new(8, 40), Size::new(20, 16)))?;
    filled.fill_area(region, 0xFF)?;

    assert_eq!(drawn.framebuffer(), filled.framebuffer());
    Ok(())
}
