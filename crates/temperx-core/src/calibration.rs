//! Linear calibration of decoded readings.

/// Factors and offsets applied as `value * factor + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Factor for temperature
    pub temperature_factor: f64,
    /// Offset for temperature
    pub temperature_offset: f64,
    /// Factor for humidity (not applied, humidity is not decoded)
    pub humidity_factor: f64,
    /// Offset for humidity (not applied, humidity is not decoded)
    pub humidity_offset: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            temperature_factor: 1.0,
            temperature_offset: 0.0,
            humidity_factor: 1.0,
            humidity_offset: 0.0,
        }
    }
}

impl Calibration {
    /// Apply the temperature factor and offset.
    #[must_use]
    pub fn apply_temperature(&self, value: f64) -> f64 {
        value * self.temperature_factor + self.temperature_offset
    }
}
