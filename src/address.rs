//! LM75 I2C Address Configuration
//!
//! The LM75 answers on a 7-bit address of the form `0b1001_A2A1A0`, where the
//! low three bits are strapped by the A2, A1 and A0 pins. Up to eight sensors
//! can therefore share a bus:
//! - 0x48 (default, all address pins to GND)
//! - ...
//! - 0x4F (all address pins to VCC)

/// Represents an LM75 7-bit I2C address.
///
/// Note: embedded-hal transports take 7-bit addresses as-is. HALs that expect
/// the 8-bit form can use [`Address::transport_byte()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(pub u8);

/// Fixed upper bits of every LM75 address.
const BASE: u8 = 0b100_1000;

impl Address {
    /// Builds the address from the logic levels of the A2, A1 and A0 pins.
    pub const fn from_pins(a2: bool, a1: bool, a0: bool) -> Self {
        Self(BASE | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8))
    }

    /// The address left-shifted by one, as placed on the wire with the R/W bit
    /// cleared.
    pub const fn transport_byte(self) -> u8 {
        self.0 << 1
    }
}

impl Default for Address {
    /// Returns the default I2C address (0x48), all address pins tied to GND.
    fn default() -> Self {
        Self(BASE)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl From<u8> for Address {
    fn from(addr: u8) -> Self {
        Self(addr)
    }
}
