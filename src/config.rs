//! LM75 Configuration Register
//!
//! The configuration register controls how the sensor drives its OS
//! (over-temperature shutdown) output and whether it is converting at all:
//! - Shutdown: stops conversions, leaving the bus interface alive
//! - OS polarity: active-low (default) or active-high alarm pin
//! - Fault queue: consecutive faults needed before OS trips
//! - Mode: comparator (thermostat) or interrupt output

use crate::registers::{
    CONF_FAULT_QUEUE_MASK, CONF_FAULT_QUEUE_SHIFT, CONF_INT_MODE, CONF_OS_ACTIVE_HIGH,
    CONF_SHUTDOWN,
};

/// Number of consecutive out-of-range conversions required before the OS
/// output is asserted. Filters out spurious trips in noisy environments.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultQueue {
    One = 0,
    #[default]
    Two = 1,
    Four = 2,
    Six = 3,
}

impl FaultQueue {
    /// Number of faults this setting waits for.
    pub const fn faults(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Six => 6,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Four,
            _ => Self::Six,
        }
    }
}

/// Logic level of the OS pin while the alarm is asserted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OsPolarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

/// OS output behaviour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OsMode {
    /// OS is asserted above TOS and released below THYST (thermostat).
    #[default]
    Comparator,
    /// OS is asserted on crossing and stays asserted until a register is read.
    Interrupt,
}

/// Decoded configuration register.
///
/// The default value is what the driver writes during initialization:
/// two-fault queue, active-low OS pin, comparator mode, converting (`0x08`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    pub shutdown: bool,
    pub os_polarity: OsPolarity,
    pub fault_queue: FaultQueue,
    pub mode: OsMode,
}

impl Configuration {
    /// Converts a register byte into a configuration.
    ///
    /// Bit mapping:
    /// - Bit 0: Shutdown
    /// - Bit 2: OS polarity
    /// - Bit 3-4: Fault queue
    /// - Bit 5: Interrupt mode
    pub fn from_byte(byte: u8) -> Self {
        Self {
            shutdown: (byte & CONF_SHUTDOWN) != 0,
            os_polarity: if (byte & CONF_OS_ACTIVE_HIGH) != 0 {
                OsPolarity::ActiveHigh
            } else {
                OsPolarity::ActiveLow
            },
            fault_queue: FaultQueue::from_bits(
                (byte & CONF_FAULT_QUEUE_MASK) >> CONF_FAULT_QUEUE_SHIFT,
            ),
            mode: if (byte & CONF_INT_MODE) != 0 {
                OsMode::Interrupt
            } else {
                OsMode::Comparator
            },
        }
    }

    pub fn to_byte(self) -> u8 {
        let mut byte = (self.fault_queue as u8) << CONF_FAULT_QUEUE_SHIFT;
        if self.shutdown {
            byte |= CONF_SHUTDOWN;
        }
        if self.os_polarity == OsPolarity::ActiveHigh {
            byte |= CONF_OS_ACTIVE_HIGH;
        }
        if self.mode == OsMode::Interrupt {
            byte |= CONF_INT_MODE;
        }

        byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_init_configuration() {
        assert_eq!(Configuration::default().to_byte(), 0x08);
        assert_eq!(Configuration::default().fault_queue.faults(), 2);
    }

    #[test]
    fn decodes_every_field() {
        let config = Configuration::from_byte(0b0011_1101);
        assert!(config.shutdown);
        assert_eq!(config.os_polarity, OsPolarity::ActiveHigh);
        assert_eq!(config.fault_queue, FaultQueue::Six);
        assert_eq!(config.mode, OsMode::Interrupt);
        assert_eq!(config.to_byte(), 0b0011_1101);
    }

    #[test]
    fn unused_bits_are_dropped() {
        // bits 1, 6 and 7 carry nothing we model
        let config = Configuration::from_byte(0b1100_0010);
        assert_eq!(config, Configuration::from_byte(0));
        assert_eq!(config.fault_queue, FaultQueue::One);
        assert_eq!(config.to_byte(), 0);
    }
}
