//! Display interface using I2C
//!
//! The SSD1315 has no D/C pin in I2C mode. Instead every write starts with a
//! control byte: [`Cmd::MARKER`] for command bytes, [`Cmd::DATA`] for pixel
//! data that goes to display RAM.
use crate::cmd::{Cmd, Command};
use crate::MAX_TRANSFER_LIMIT;
use display_interface::DisplayError;
use embedded_hal::i2c::I2c;

/// I2C connection to the controller
pub struct DisplayInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Marker plus data, reused for every data write
    scratch: [u8; MAX_TRANSFER_LIMIT],
}

impl<I2C> DisplayInterface<I2C> {
    /// Wrap an I2C bus for the device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        DisplayInterface {
            i2c,
            address,
            scratch: [0; MAX_TRANSFER_LIMIT],
        }
    }

    /// Device address this interface writes to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DisplayInterface<I2C>
where
    I2C: I2c,
{
    /// Send one command as its own transfer
    pub(crate) fn cmd(&mut self, command: Command) -> Result<(), DisplayError> {
        let encoded = command.encode();
        let params = encoded.as_slice();

        let mut frame = [Cmd::MARKER, 0, 0, 0];
        frame[1..=params.len()].copy_from_slice(params);

        self.write(&frame[..=params.len()])
    }

    /// Send pixel data as one transfer. `data` has to fit next to the marker
    /// byte in [`MAX_TRANSFER_LIMIT`].
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        if data.len() >= MAX_TRANSFER_LIMIT {
            log::error!(
                "Data transfer of {} bytes exceeds the {} byte limit",
                data.len(),
                MAX_TRANSFER_LIMIT - 1
            );
            return Err(DisplayError::OutOfBoundsError);
        }

        self.scratch[0] = Cmd::DATA;
        self.scratch[1..=data.len()].copy_from_slice(data);

        let address = self.address;
        let frame = &self.scratch[..=data.len()];
        match self.i2c.write(address, frame) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!(
                    "I2C write error for {} data bytes at 0x{:02X}: {:?}",
                    data.len(),
                    address,
                    e
                );
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// One complete, blocking write with start and stop condition
    fn write(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        match self.i2c.write(self.address, frame) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!(
                    "I2C write error for command {:02X?} at 0x{:02X}: {:?}",
                    &frame[1..],
                    self.address,
                    e
                );
                Err(DisplayError::BusWriteError)
            }
        }
    }
}
