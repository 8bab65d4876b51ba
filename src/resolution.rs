//! LM75 Resolution Variants
//!
//! Different LM75 parts left-justify a different number of significant bits
//! in the temperature register. The variant is a property of the part
//! number, not something the driver can switch at runtime.

use crate::error::UnsupportedVariant;

/// Significant bits of the temperature register.
///
/// Tags read from settings convert with `try_from`; an unknown tag becomes
/// [`Error::UnsupportedVariant`](crate::error::Error::UnsupportedVariant)
/// through `?` in code returning the driver's error type.
///
/// ```
/// # use embedded_hal_mock::eh1::i2c::Mock as I2cMock;
/// use lm75_driver::{error::Error, resolution::Resolution};
///
/// fn resolution_from_settings(tag: u8) -> Result<Resolution, Error<I2cMock>> {
///     Ok(Resolution::try_from(tag)?)
/// }
///
/// assert!(matches!(resolution_from_settings(1), Ok(Resolution::Bits11)));
/// assert!(matches!(resolution_from_settings(3), Err(Error::UnsupportedVariant(3))));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// Classic LM75: 9 bits, 0.5 °C per LSB
    Bits9 = 0,
    /// LM75A-style parts: 11 bits, 0.125 °C per LSB
    Bits11 = 1,
}

impl Resolution {
    /// Right shift that drops the unused low bits of a 16-bit register value.
    pub const fn shift(self) -> u8 {
        match self {
            Self::Bits9 => 7,
            Self::Bits11 => 5,
        }
    }

    /// Degrees Celsius per LSB once shifted.
    pub const fn step(self) -> f32 {
        match self {
            Self::Bits9 => 0.5,
            Self::Bits11 => 0.125,
        }
    }
}

impl TryFrom<u8> for Resolution {
    type Error = UnsupportedVariant;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Bits9),
            1 => Ok(Self::Bits11),
            _ => Err(UnsupportedVariant(tag)),
        }
    }
}
