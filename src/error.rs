//! Driver errors

pub use display_interface::DisplayError;

/// Errors returned by the driver
#[derive(Debug, Clone)]
pub enum Error {
    /// Rows are not page aligned, empty, or run past the last page
    InvalidRows,
    /// Columns are empty or run past the last column
    InvalidColumns,
    /// Data length does not match the region
    InvalidLength {
        /// Bytes the region needs
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
    /// Region does not fit the display buffer
    Oversized,
    /// Configuration rejected at construction
    InvalidConfig,
    /// I2C write failed
    Bus(DisplayError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidRows => write!(f, "invalid row range"),
            Self::InvalidColumns => write!(f, "invalid column range"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid data length {actual}, region needs {expected}")
            }
            Self::Oversized => write!(f, "region exceeds display buffer"),
            Self::InvalidConfig => write!(f, "invalid driver configuration"),
            Self::Bus(e) => write!(f, "I2C write error: {e:?}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Bus(e)
    }
}
