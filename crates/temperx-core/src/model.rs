//! Known sensor models.
//!
//! A model ties a device signature to the command that triggers a
//! measurement and the function that decodes the response. Humidity is
//! not decoded for any model yet.

use std::time::Duration;

use crate::decode::decode_temperature;
use crate::identity::DeviceIdentity;

/// Everything needed to talk to one kind of sensor.
#[derive(Debug, Clone, Copy)]
pub struct SensorModel {
    /// Human readable model name
    pub name: &'static str,
    /// Identity signature, `vvvv:pppp:rrrr:ii`
    pub signature: &'static str,
    /// Output report that triggers a measurement
    pub command: &'static [u8],
    /// Maximum response length to request
    pub response_len: usize,
    /// Timeout for each write and read
    pub io_timeout: Duration,
    /// Decoder for the temperature bytes
    pub decode: fn(u8, u8) -> f64,
}

impl SensorModel {
    /// Check whether an enumerated device is this model.
    #[must_use]
    pub fn matches(&self, identity: &DeviceIdentity) -> bool {
        identity.signature() == self.signature
    }

    /// Look up a known model by its signature.
    #[must_use]
    pub fn find(signature: &str) -> Option<&'static SensorModel> {
        KNOWN_MODELS.iter().find(|model| model.signature == signature)
    }
}

/// TEMPerHUM / TEMPerX (ID 413d:2107), temperature interface.
pub const TEMPER_X: SensorModel = SensorModel {
    name: "TEMPerX",
    signature: "413d:2107:0000:01",
    command: &[0x01, 0x80, 0x33, 0x01, 0x00, 0x00, 0x00, 0x00],
    response_len: 8,
    io_timeout: Duration::from_secs(1),
    decode: decode_temperature,
};

/// All supported sensor models.
pub const KNOWN_MODELS: &[SensorModel] = &[TEMPER_X];
