//! Platform-agnostic driver for the LM75 digital temperature sensor, built on
//! the [`embedded-hal`] I2C traits.
//!
//! Both a blocking driver ([`sensor::Lm75`]) and an async one
//! ([`sensor_async::Lm75`]) are provided. They share the register map, the
//! configuration model and the raw-to-Celsius codec.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//!
//! ```
//! # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! use lm75_driver::{address::Address, resolution::Resolution, sensor::Lm75};
//!
//! # let i2c = I2cMock::new(&[
//! #     I2cTransaction::write(0x48, vec![0x01, 0x08]),
//! #     I2cTransaction::write(0x48, vec![0x02, 0x4B, 0x00]),
//! #     I2cTransaction::write(0x48, vec![0x03, 0x50, 0x00]),
//! #     I2cTransaction::write_read(0x48, vec![0x00], vec![0x19, 0x80]),
//! # ]);
//! let mut lm75 = Lm75::new(i2c, Resolution::Bits9, Address::default(), 75.0, 80.0).unwrap();
//! let celsius = lm75.temperature().unwrap();
//! assert_eq!(celsius, 25.5);
//! # lm75.release().done();
//! ```

#![cfg_attr(not(test), no_std)]

pub mod address;
pub mod config;
pub mod error;
pub mod error_async;
pub mod registers;
pub mod resolution;
pub mod sensor;
pub mod sensor_async;
pub mod temperature;
