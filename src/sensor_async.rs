//! LM75 Asynchronous Driver Implementation
//!
//! Non-blocking interface to the LM75 built on embedded-hal-async. It mirrors
//! the blocking driver in [`crate::sensor`] operation for operation, so the
//! same register sequences go out on the bus:
//! - Initialization (configuration, hysteresis and shutdown thresholds)
//! - Temperature reads with sentinel caching on failure
//! - Threshold updates and read-back
//! - Shutdown control and raw/typed configuration access

use crate::{
    address::Address,
    config::Configuration,
    error_async::{Error, InitError},
    registers::{Register, CONF_SHUTDOWN},
    resolution::Resolution,
    temperature::{quantize_threshold, threshold_window, Temperature, SENTINEL_CELSIUS},
};
use embedded_hal_async::i2c::I2c;
use log::{debug, warn};

/// LM75 Driver
pub struct Lm75<I>
where
    I: I2c,
{
    i2c: I,
    address: u8,
    resolution: Resolution,
    hysteresis: f32,
    over_temperature_shutdown: f32,
    temperature: f32,
}

impl<I> Lm75<I>
where
    I: I2c,
{
    /// Construct a new i2c driver for the LM75 and configure it.
    ///
    /// See [`crate::sensor::Lm75::new`] for the exact register sequence and
    /// argument checks.
    pub async fn new(
        i2c: I,
        resolution: Resolution,
        address: Address,
        low: f32,
        high: f32,
    ) -> Result<Self, InitError<I>> {
        let Some((low, high)) = threshold_window(low, high) else {
            return Err(InitError {
                i2c,
                error: Error::InvalidRange,
            });
        };

        let mut sensor = Self {
            i2c,
            address: address.into(),
            resolution,
            hysteresis: 0.0,
            over_temperature_shutdown: 0.0,
            temperature: 0.0,
        };

        if let Err(error) = sensor.initialize(low, high).await {
            Err(InitError {
                error,
                i2c: sensor.i2c,
            })
        } else {
            Ok(sensor)
        }
    }

    async fn initialize(&mut self, low: f32, high: f32) -> Result<(), Error<I>> {
        debug!(
            "lm75@{:#04x}: init {:?}, thyst {} tos {}",
            self.address, self.resolution, low, high
        );
        self.set_configuration(Configuration::default()).await?;
        self.write_temperature_register(Register::Hysteresis, low)
            .await?;
        self.hysteresis = low;
        self.write_temperature_register(Register::OverTemperatureShutdown, high)
            .await?;
        self.over_temperature_shutdown = high;
        Ok(())
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I {
        self.i2c
    }

    pub(crate) async fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .await
            .map_err(|e| Error::WriteReadError(e))
    }

    pub(crate) async fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c
            .write(self.address, bytes)
            .await
            .map_err(|e| Error::WriteError(e))
    }

    pub(crate) async fn read_register(&mut self, reg: Register) -> Result<u8, Error<I>> {
        let mut buf = [0; 1];
        self.read(&[reg as u8], &mut buf).await?;
        Ok(buf[0])
    }

    pub(crate) async fn write_register(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<I>> {
        self.write(&[reg as u8, value]).await
    }

    pub(crate) async fn read_temperature_register(
        &mut self,
        reg: Register,
    ) -> Result<Temperature, Error<I>> {
        let mut buf = [0; 2];
        self.read(&[reg as u8], &mut buf).await?;
        Ok(Temperature::from_bytes(buf))
    }

    pub(crate) async fn write_temperature_register(
        &mut self,
        reg: Register,
        celsius: f32,
    ) -> Result<(), Error<I>> {
        let data = Temperature::from_threshold(celsius).to_bytes();
        self.write(&[reg as u8, data[0], data[1]]).await
    }

    /// Set the hysteresis threshold (THYST).
    pub async fn set_hysteresis(&mut self, low: f32) -> Result<(), Error<I>> {
        let low = match quantize_threshold(low) {
            Some(low) if low < self.over_temperature_shutdown => low,
            _ => return Err(Error::InvalidRange),
        };
        debug!("lm75@{:#04x}: thyst {}", self.address, low);
        self.write_temperature_register(Register::Hysteresis, low)
            .await?;
        self.hysteresis = low;
        Ok(())
    }

    /// Set the over-temperature shutdown threshold (TOS).
    pub async fn set_over_temperature_shutdown(&mut self, high: f32) -> Result<(), Error<I>> {
        let high = match quantize_threshold(high) {
            Some(high) if high > self.hysteresis => high,
            _ => return Err(Error::InvalidRange),
        };
        debug!("lm75@{:#04x}: tos {}", self.address, high);
        self.write_temperature_register(Register::OverTemperatureShutdown, high)
            .await?;
        self.over_temperature_shutdown = high;
        Ok(())
    }

    /// Move both thresholds at once.
    pub async fn set_thresholds(&mut self, low: f32, high: f32) -> Result<(), Error<I>> {
        let Some((low, high)) = threshold_window(low, high) else {
            return Err(Error::InvalidRange);
        };
        debug!("lm75@{:#04x}: thyst {} tos {}", self.address, low, high);
        self.write_temperature_register(Register::Hysteresis, low)
            .await?;
        self.hysteresis = low;
        self.write_temperature_register(Register::OverTemperatureShutdown, high)
            .await?;
        self.over_temperature_shutdown = high;
        Ok(())
    }

    pub async fn read_hysteresis(&mut self) -> Result<f32, Error<I>> {
        let raw = self.read_temperature_register(Register::Hysteresis).await?;
        self.hysteresis = raw.celsius(Resolution::Bits9);
        Ok(self.hysteresis)
    }

    pub async fn read_over_temperature_shutdown(&mut self) -> Result<f32, Error<I>> {
        let raw = self
            .read_temperature_register(Register::OverTemperatureShutdown)
            .await?;
        self.over_temperature_shutdown = raw.celsius(Resolution::Bits9);
        Ok(self.over_temperature_shutdown)
    }

    /// Read the current temperature in degrees Celsius.
    ///
    /// On failure the cached reading is replaced by
    /// [`SENTINEL_CELSIUS`](crate::temperature::SENTINEL_CELSIUS).
    pub async fn temperature(&mut self) -> Result<f32, Error<I>> {
        match self.read_temperature_register(Register::Temperature).await {
            Ok(raw) => {
                self.temperature = raw.celsius(self.resolution);
                Ok(self.temperature)
            }
            Err(e) => {
                warn!("lm75@{:#04x}: temperature read failed: {:?}", self.address, e);
                self.temperature = SENTINEL_CELSIUS;
                Err(e)
            }
        }
    }

    pub async fn enable_shutdown(&mut self) -> Result<(), Error<I>> {
        let mut value = self.read_register(Register::Configuration).await?;
        value |= CONF_SHUTDOWN;
        self.write_register(Register::Configuration, value).await
    }

    pub async fn disable_shutdown(&mut self) -> Result<(), Error<I>> {
        let mut value = self.read_register(Register::Configuration).await?;
        value &= !CONF_SHUTDOWN;
        self.write_register(Register::Configuration, value).await
    }

    pub async fn is_shutdown(&mut self) -> Result<bool, Error<I>> {
        let value = self.read_register(Register::Configuration).await?;
        Ok((value & CONF_SHUTDOWN) != 0)
    }

    pub async fn get_configuration(&mut self) -> Result<Configuration, Error<I>> {
        let value = self.get_configuration_raw().await?;
        Ok(Configuration::from_byte(value))
    }

    pub async fn set_configuration(&mut self, config: Configuration) -> Result<(), Error<I>> {
        self.set_configuration_raw(config.to_byte()).await
    }

    pub async fn get_configuration_raw(&mut self) -> Result<u8, Error<I>> {
        self.read_register(Register::Configuration).await
    }

    /// Overwrite the whole configuration register verbatim.
    pub async fn set_configuration_raw(&mut self, value: u8) -> Result<(), Error<I>> {
        self.write_register(Register::Configuration, value).await
    }

    pub fn hysteresis(&self) -> f32 {
        self.hysteresis
    }

    pub fn over_temperature_shutdown(&self) -> f32 {
        self.over_temperature_shutdown
    }

    pub fn last_temperature(&self) -> f32 {
        self.temperature
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn address(&self) -> Address {
        Address(self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use futures::executor::block_on;

    const ADDR: u8 = 0x49;

    fn configured(i2c: I2cMock) -> Lm75<I2cMock> {
        Lm75 {
            i2c,
            address: ADDR,
            resolution: Resolution::Bits9,
            hysteresis: 75.0,
            over_temperature_shutdown: 80.0,
            temperature: 0.0,
        }
    }

    #[test]
    fn new_then_read_temperature() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x01, 0x08]),
            I2cTransaction::write(ADDR, vec![0x02, 0xF6, 0x00]),
            I2cTransaction::write(ADDR, vec![0x03, 0x19, 0x80]),
            I2cTransaction::write_read(ADDR, vec![0x00], vec![0x48, 0x00]),
        ]);
        block_on(async {
            let address = Address::from_pins(false, false, true);
            let mut lm75 = Lm75::new(i2c, Resolution::Bits11, address, -10.0, 25.5)
                .await
                .unwrap();
            assert_eq!(lm75.temperature().await.unwrap(), 72.0);
            assert_eq!(lm75.last_temperature(), 72.0);
            lm75.release().done();
        });
    }

    #[test]
    fn new_rejects_inverted_limits() {
        let i2c = I2cMock::new(&[]);
        block_on(async {
            let Err(err) = Lm75::new(i2c, Resolution::Bits9, Address(ADDR), 10.0, 5.0).await
            else {
                panic!("inverted limits accepted");
            };
            assert!(matches!(err.error, Error::InvalidRange));
            let mut i2c = err.i2c;
            i2c.done();
        });
    }

    #[test]
    fn failed_read_caches_sentinel() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x01, 0x08]),
            I2cTransaction::write(ADDR, vec![0x02, 0x4B, 0x00]),
            I2cTransaction::write(ADDR, vec![0x03, 0x50, 0x00]),
            I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
        ]);
        block_on(async {
            let mut lm75 = Lm75::new(i2c, Resolution::Bits9, Address(ADDR), 75.0, 80.0)
                .await
                .unwrap();
            let err = lm75.temperature().await.unwrap_err();
            assert!(err.is_transport());
            assert_eq!(lm75.last_temperature(), SENTINEL_CELSIUS);
            lm75.release().done();
        });
    }

    #[test]
    fn thresholds_and_shutdown() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x01, 0x08]),
            I2cTransaction::write(ADDR, vec![0x02, 0x4B, 0x00]),
            I2cTransaction::write(ADDR, vec![0x03, 0x50, 0x00]),
            I2cTransaction::write(ADDR, vec![0x03, 0x5A, 0x00]),
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x08]),
            I2cTransaction::write(ADDR, vec![0x01, 0x09]),
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x09]),
            I2cTransaction::write(ADDR, vec![0x01, 0x08]),
        ]);
        block_on(async {
            let mut lm75 = Lm75::new(i2c, Resolution::Bits9, Address(ADDR), 75.0, 80.0)
                .await
                .unwrap();
            assert!(matches!(
                lm75.set_hysteresis(130.0).await,
                Err(Error::InvalidRange)
            ));
            assert!(matches!(
                lm75.set_over_temperature_shutdown(-60.0).await,
                Err(Error::InvalidRange)
            ));
            lm75.set_over_temperature_shutdown(90.0).await.unwrap();
            assert_eq!(lm75.over_temperature_shutdown(), 90.0);
            lm75.enable_shutdown().await.unwrap();
            lm75.disable_shutdown().await.unwrap();
            lm75.release().done();
        });
    }

    #[test]
    fn typed_configuration_round_trips_through_bus() {
        let config = Configuration {
            shutdown: true,
            ..Default::default()
        };
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x01, 0x09]),
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x09]),
        ]);
        block_on(async {
            let mut lm75 = configured(i2c);
            lm75.set_configuration(config).await.unwrap();
            assert_eq!(lm75.get_configuration().await.unwrap(), config);
            lm75.release().done();
        });
    }

    #[test]
    fn new_rejects_limits_that_round_together() {
        let i2c = I2cMock::new(&[]);
        block_on(async {
            let Err(err) = Lm75::new(i2c, Resolution::Bits9, Address(ADDR), 80.6, 80.9).await
            else {
                panic!("limits sharing a register step accepted");
            };
            assert!(matches!(err.error, Error::InvalidRange));
            let mut i2c = err.i2c;
            i2c.done();
        });
    }

    #[test]
    fn set_hysteresis_caches_register_value() {
        let i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x02, 0x50, 0x00])]);
        block_on(async {
            let mut lm75 = configured(i2c);
            lm75.over_temperature_shutdown = 85.0;
            lm75.set_hysteresis(80.25).await.unwrap();
            assert_eq!(lm75.hysteresis(), 80.0);
            lm75.release().done();
        });
    }

    #[test]
    fn thresholds_must_stay_ordered() {
        let i2c = I2cMock::new(&[]);
        block_on(async {
            let mut lm75 = configured(i2c);
            assert!(matches!(
                lm75.set_hysteresis(80.0).await,
                Err(Error::InvalidRange)
            ));
            assert!(matches!(
                lm75.set_over_temperature_shutdown(70.0).await,
                Err(Error::InvalidRange)
            ));
            // 75.4 lands on 75.0, the current hysteresis
            assert!(matches!(
                lm75.set_over_temperature_shutdown(75.4).await,
                Err(Error::InvalidRange)
            ));
            assert!(matches!(
                lm75.set_thresholds(40.0, 30.0).await,
                Err(Error::InvalidRange)
            ));
            assert!(matches!(
                lm75.set_thresholds(80.6, 80.9).await,
                Err(Error::InvalidRange)
            ));
            assert_eq!(lm75.hysteresis(), 75.0);
            assert_eq!(lm75.over_temperature_shutdown(), 80.0);
            lm75.release().done();
        });
    }

    #[test]
    fn set_thresholds_moves_the_window() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x02, 0xF6, 0x00]),
            I2cTransaction::write(ADDR, vec![0x03, 0x00, 0x80]),
        ]);
        block_on(async {
            let mut lm75 = configured(i2c);
            lm75.set_thresholds(-10.0, 0.5).await.unwrap();
            assert_eq!(lm75.hysteresis(), -10.0);
            assert_eq!(lm75.over_temperature_shutdown(), 0.5);
            lm75.release().done();
        });
    }

    #[test]
    fn thresholds_read_back() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(ADDR, vec![0x02], vec![0xF5, 0x80]),
            I2cTransaction::write_read(ADDR, vec![0x03], vec![0x50, 0x80]),
        ]);
        block_on(async {
            let mut lm75 = configured(i2c);
            assert_eq!(lm75.read_hysteresis().await.unwrap(), -10.5);
            assert_eq!(lm75.read_over_temperature_shutdown().await.unwrap(), 80.5);
            assert_eq!(lm75.hysteresis(), -10.5);
            assert_eq!(lm75.over_temperature_shutdown(), 80.5);
            lm75.release().done();
        });
    }

    #[test]
    fn raw_configuration_and_shutdown_state() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x01, 0x3F]),
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x3D]),
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x3D]),
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x08]),
        ]);
        block_on(async {
            let mut lm75 = configured(i2c);
            lm75.set_configuration_raw(0x3F).await.unwrap();
            assert_eq!(lm75.get_configuration_raw().await.unwrap(), 0x3D);
            assert!(lm75.is_shutdown().await.unwrap());
            assert!(!lm75.is_shutdown().await.unwrap());
            lm75.release().done();
        });
    }
}
