use crate::{
    address::Address,
    config::Configuration,
    error::{Error, InitError},
    registers::{Register, CONF_SHUTDOWN},
    resolution::Resolution,
    temperature::{quantize_threshold, threshold_window, Temperature, SENTINEL_CELSIUS},
};
use embedded_hal::i2c::I2c;
use log::{debug, warn};

/// LM75 Driver
///
/// Owns the bus handle for its lifetime and caches the last values written to
/// or read from the threshold and temperature registers.
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
    /// Writes the default [`Configuration`] (two-fault queue, active-low OS
    /// pin, comparator mode), then the hysteresis threshold `low` and the
    /// over-temperature shutdown threshold `high`.
    ///
    /// Both limits are rounded to the register's 0.5 °C steps. They must lie
    /// within -55..=125 °C and the rounded `low` must be below the rounded
    /// `high`, otherwise `InvalidRange` is returned without touching the bus.
    /// A bus failure part-way leaves the device partially configured.
    pub fn new(
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

        if let Err(error) = sensor.initialize(low, high) {
            Err(InitError {
                error,
                i2c: sensor.i2c,
            })
        } else {
            Ok(sensor)
        }
    }

    fn initialize(&mut self, low: f32, high: f32) -> Result<(), Error<I>> {
        debug!(
            "lm75@{:#04x}: init {:?}, thyst {} tos {}",
            self.address, self.resolution, low, high
        );
        self.set_configuration(Configuration::default())?;
        self.write_temperature_register(Register::Hysteresis, low)?;
        self.hysteresis = low;
        self.write_temperature_register(Register::OverTemperatureShutdown, high)?;
        self.over_temperature_shutdown = high;
        Ok(())
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I {
        self.i2c
    }

    pub(crate) fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .map_err(|e| Error::WriteReadError(e))
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|e| Error::WriteError(e))
    }

    pub(crate) fn read_register(&mut self, reg: Register) -> Result<u8, Error<I>> {
        let mut buf = [0; 1];
        self.read(&[reg as u8], &mut buf)?;
        Ok(buf[0])
    }

    pub(crate) fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<I>> {
        self.write(&[reg as u8, value])
    }

    pub(crate) fn read_temperature_register(
        &mut self,
        reg: Register,
    ) -> Result<Temperature, Error<I>> {
        let mut buf = [0; 2];
        self.read(&[reg as u8], &mut buf)?;
        Ok(Temperature::from_bytes(buf))
    }

    pub(crate) fn write_temperature_register(
        &mut self,
        reg: Register,
        celsius: f32,
    ) -> Result<(), Error<I>> {
        let data = Temperature::from_threshold(celsius).to_bytes();
        self.write(&[reg as u8, data[0], data[1]])
    }

    /// Set the hysteresis threshold (THYST).
    ///
    /// Must lie within -55..=125 °C and, once rounded to 0.5 °C, below the
    /// current over-temperature shutdown threshold. The rounded value is cached.
    pub fn set_hysteresis(&mut self, low: f32) -> Result<(), Error<I>> {
        let low = match quantize_threshold(low) {
            Some(low) if low < self.over_temperature_shutdown => low,
            _ => return Err(Error::InvalidRange),
        };
        debug!("lm75@{:#04x}: thyst {}", self.address, low);
        self.write_temperature_register(Register::Hysteresis, low)?;
        self.hysteresis = low;
        Ok(())
    }

    /// Set the over-temperature shutdown threshold (TOS).
    ///
    /// Must lie within -55..=125 °C and, once rounded to 0.5 °C, above the
    /// current hysteresis threshold. The rounded value is cached.
    pub fn set_over_temperature_shutdown(&mut self, high: f32) -> Result<(), Error<I>> {
        let high = match quantize_threshold(high) {
            Some(high) if high > self.hysteresis => high,
            _ => return Err(Error::InvalidRange),
        };
        debug!("lm75@{:#04x}: tos {}", self.address, high);
        self.write_temperature_register(Register::OverTemperatureShutdown, high)?;
        self.over_temperature_shutdown = high;
        Ok(())
    }

    /// Move both thresholds at once, for windows that do not overlap the
    /// current one.
    pub fn set_thresholds(&mut self, low: f32, high: f32) -> Result<(), Error<I>> {
        let Some((low, high)) = threshold_window(low, high) else {
            return Err(Error::InvalidRange);
        };
        debug!("lm75@{:#04x}: thyst {} tos {}", self.address, low, high);
        self.write_temperature_register(Register::Hysteresis, low)?;
        self.hysteresis = low;
        self.write_temperature_register(Register::OverTemperatureShutdown, high)?;
        self.over_temperature_shutdown = high;
        Ok(())
    }

    /// Read the hysteresis threshold back from the device.
    pub fn read_hysteresis(&mut self) -> Result<f32, Error<I>> {
        let raw = self.read_temperature_register(Register::Hysteresis)?;
        self.hysteresis = raw.celsius(Resolution::Bits9);
        Ok(self.hysteresis)
    }

    /// Read the over-temperature shutdown threshold back from the device.
    pub fn read_over_temperature_shutdown(&mut self) -> Result<f32, Error<I>> {
        let raw = self.read_temperature_register(Register::OverTemperatureShutdown)?;
        self.over_temperature_shutdown = raw.celsius(Resolution::Bits9);
        Ok(self.over_temperature_shutdown)
    }

    /// Read the current temperature in degrees Celsius.
    ///
    /// On failure the cached reading is replaced by
    /// [`SENTINEL_CELSIUS`](crate::temperature::SENTINEL_CELSIUS).
    pub fn temperature(&mut self) -> Result<f32, Error<I>> {
        match self.read_temperature_register(Register::Temperature) {
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

    /// Put the sensor into low-power shutdown. Conversions stop; the bus and
    /// registers stay accessible.
    pub fn enable_shutdown(&mut self) -> Result<(), Error<I>> {
        let mut value = self.read_register(Register::Configuration)?;
        value |= CONF_SHUTDOWN;
        self.write_register(Register::Configuration, value)
    }

    /// Resume conversions.
    pub fn disable_shutdown(&mut self) -> Result<(), Error<I>> {
        let mut value = self.read_register(Register::Configuration)?;
        value &= !CONF_SHUTDOWN;
        self.write_register(Register::Configuration, value)
    }

    pub fn is_shutdown(&mut self) -> Result<bool, Error<I>> {
        let value = self.read_register(Register::Configuration)?;
        Ok((value & CONF_SHUTDOWN) != 0)
    }

    pub fn get_configuration(&mut self) -> Result<Configuration, Error<I>> {
        let value = self.get_configuration_raw()?;
        Ok(Configuration::from_byte(value))
    }

    pub fn set_configuration(&mut self, config: Configuration) -> Result<(), Error<I>> {
        self.set_configuration_raw(config.to_byte())
    }

    pub fn get_configuration_raw(&mut self) -> Result<u8, Error<I>> {
        self.read_register(Register::Configuration)
    }

    /// Overwrite the whole configuration register verbatim.
    pub fn set_configuration_raw(&mut self, value: u8) -> Result<(), Error<I>> {
        self.write_register(Register::Configuration, value)
    }

    /// Last hysteresis threshold written or read, in °C.
    pub fn hysteresis(&self) -> f32 {
        self.hysteresis
    }

    /// Last over-temperature shutdown threshold written or read, in °C.
    pub fn over_temperature_shutdown(&self) -> f32 {
        self.over_temperature_shutdown
    }

    /// Last temperature read, in °C.
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
