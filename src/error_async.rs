//! Error types for asynchronous LM75 operations.
//!
//! Same taxonomy as the blocking [`crate::error`] module, bound to the
//! embedded-hal-async I2C trait instead.

use crate::error::UnsupportedVariant;
use core::fmt::{Debug, Formatter};
use embedded_hal_async::i2c::I2c;

/// Error that occurs during async initialization of the LM75.
/// Contains both the error and the I2C interface for error recovery.
pub struct InitError<I>
where
    I: I2c,
{
    pub i2c: I,
    pub error: Error<I>,
}

impl<I> Debug for InitError<I>
where
    I: I2c,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.error.fmt(f)
    }
}

/// Error types that can occur during async sensor operations.
pub enum Error<I>
where
    I: I2c,
{
    /// Error occurred during an I2C write operation
    WriteError(I::Error),
    /// Error occurred during an I2C write-read operation
    WriteReadError(I::Error),
    /// Threshold outside the operating range or thresholds out of order
    InvalidRange,
    /// Resolution tag not recognized
    UnsupportedVariant(u8),
}

impl<I> Error<I>
where
    I: I2c,
{
    /// Whether the error came from the bus rather than from the arguments.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::WriteError(_) | Self::WriteReadError(_))
    }
}

impl<I> From<UnsupportedVariant> for Error<I>
where
    I: I2c,
{
    fn from(e: UnsupportedVariant) -> Self {
        Self::UnsupportedVariant(e.0)
    }
}

impl<I> Debug for Error<I>
where
    I: I2c,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Self::WriteReadError(e) => f.debug_tuple("WriteReadError").field(e).finish(),
            Self::WriteError(e) => f.debug_tuple("WriteError").field(e).finish(),
            Self::InvalidRange => f.write_str("InvalidRange"),
            Self::UnsupportedVariant(tag) => {
                f.debug_tuple("UnsupportedVariant").field(tag).finish()
            }
        }
    }
}
