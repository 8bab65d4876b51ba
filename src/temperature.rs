use crate::resolution::Resolution;

/// Lowest temperature the LM75 is specified to measure, in °C.
pub const MIN_CELSIUS: f32 = -55.0;
/// Highest temperature the LM75 is specified to measure, in °C.
pub const MAX_CELSIUS: f32 = 125.0;

/// Physically impossible reading cached when a conversion fails, so that a
/// caller ignoring the returned error still sees garbage.
pub const SENTINEL_CELSIUS: f32 = -1000.0;

/// Returns `true` if `celsius` lies within the sensor's operating range.
/// NaN is never in range.
pub fn in_range(celsius: f32) -> bool {
    (MIN_CELSIUS..=MAX_CELSIUS).contains(&celsius)
}

/// The value a threshold register will actually hold for `celsius`, or
/// `None` if `celsius` is outside the operating range.
pub fn quantize_threshold(celsius: f32) -> Option<f32> {
    if !in_range(celsius) {
        return None;
    }
    Some(Temperature::from_threshold(celsius).celsius(Resolution::Bits9))
}

/// Quantizes a hysteresis / shutdown pair, keeping it only if both are in
/// range and hysteresis stays strictly below shutdown after quantization.
pub fn threshold_window(low: f32, high: f32) -> Option<(f32, f32)> {
    match (quantize_threshold(low), quantize_threshold(high)) {
        (Some(low), Some(high)) if low < high => Some((low, high)),
        _ => None,
    }
}

/// Raw value of one of the temperature-family registers (temperature,
/// hysteresis, over-temperature shutdown).
///
/// The sensor stores a two's complement value left-justified in 16 bits; how
/// many of the top bits are meaningful depends on the [`Resolution`].
///
/// # Example
/// ```
/// # use lm75_driver::{resolution::Resolution, temperature::Temperature};
/// let temp = Temperature::from_bytes([0x48, 0x00]);
///
/// assert_eq!(temp.celsius(Resolution::Bits11), 72.0);
/// assert_eq!(temp.raw(), 0x4800);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Temperature {
    pub(crate) raw: u16,
}

impl Temperature {
    pub fn new(raw: u16) -> Self {
        Self { raw }
    }

    pub fn from_bytes(data: [u8; 2]) -> Self {
        Self {
            raw: u16::from_be_bytes(data),
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.raw.to_be_bytes()
    }

    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Encodes a threshold value with the sensor's 0.5 °C threshold
    /// resolution.
    ///
    /// For non-negative values the high byte holds the integer degrees and
    /// the low byte is `0x80` when the fractional part is at least 0.5.
    /// Negative values are encoded as a two's complement half-degree count,
    /// truncated toward zero. Finer precision is discarded.
    pub fn from_threshold(celsius: f32) -> Self {
        let half_degrees = (celsius * 2.0) as i16;
        Self {
            raw: (half_degrees << 7) as u16,
        }
    }

    /// Decodes the raw value to degrees Celsius.
    ///
    /// The shift happens before the two's complement arithmetic so the
    /// unused low bits never leak into the result.
    pub fn celsius(&self, resolution: Resolution) -> f32 {
        let shift = resolution.shift();
        if self.raw & 0x8000 == 0 {
            (self.raw >> shift) as f32 * resolution.step()
        } else {
            let magnitude = ((!self.raw) >> shift) + 1;
            -(magnitude as f32) * resolution.step()
        }
    }
}
