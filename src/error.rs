use core::fmt::{Debug, Formatter};
use embedded_hal::i2c::I2c;

/// A resolution tag that matches no known LM75 variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct UnsupportedVariant(pub u8);

/// Error during initialization of sensor. Wraps [`Error`] and hands the bus back.
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

/// Error for sensor operations.
pub enum Error<I>
where
    I: I2c,
{
    /// Bus write failed
    WriteError(I::Error),
    /// Bus write-read failed
    WriteReadError(I::Error),
    /// Threshold outside -55..=125 °C, or hysteresis not below shutdown threshold
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
