//! A single sensor reading.

use crate::decode::RawReading;
use crate::identity::DeviceIdentity;

/// Result of one successful measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Position of the device in enumeration order, starting at 1
    pub index: usize,
    /// Identity of the device that produced the reading
    pub identity: DeviceIdentity,
    /// Temperature bytes as reported
    pub raw: RawReading,
    /// Decoded temperature before calibration
    pub temperature: f64,
    /// Temperature after calibration
    pub calibrated: f64,
}

impl Reading {
    /// Metric name for the temperature gauge of this reading.
    #[must_use]
    pub fn temperature_metric(&self) -> String {
        format!("{}.temperature", self.index)
    }
}
