//! LM75 Register Map
//!
//! The LM75 exposes four registers behind a pointer byte:
//! - Temperature: read-only, 2 bytes, left-justified two's complement
//! - Configuration: 1 byte
//! - Hysteresis threshold (THYST): 2 bytes, 0.5 °C resolution
//! - Over-temperature shutdown threshold (TOS): 2 bytes, 0.5 °C resolution
//!
//! All 2-byte registers are transferred most significant byte first.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    /// Temperature register (0x00)
    Temperature = 0x00,

    /// Configuration register (0x01)
    Configuration = 0x01,

    /// Hysteresis threshold register (0x02)
    /// The OS output is released once the temperature drops below this value
    Hysteresis = 0x02,

    /// Over-temperature shutdown threshold register (0x03)
    /// The OS output is asserted once the temperature exceeds this value
    OverTemperatureShutdown = 0x03,
}

// Configuration register bits
/// Bit 0: shutdown
pub const CONF_SHUTDOWN: u8 = 0b0000_0001;
/// Bit 2: OS pin polarity, set for active-high
pub const CONF_OS_ACTIVE_HIGH: u8 = 0b0000_0100;
/// Bits 3-4: fault queue length
pub const CONF_FAULT_QUEUE_MASK: u8 = 0b0001_1000;
/// Offset of the fault queue field
pub const CONF_FAULT_QUEUE_SHIFT: u8 = 3;
/// Bit 5: comparator (0) / interrupt (1) mode
pub const CONF_INT_MODE: u8 = 0b0010_0000;
