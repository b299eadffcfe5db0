//! Temperature decoding for TEMPerX response reports.
//!
//! The sensor reports a 14-bit reading in bytes 2 and 3 of its response,
//! scaled by 0.03125 °C per unit after dividing by four. Values above
//! `0x4000` encode temperatures below zero as a deficit from that boundary.

/// Readings strictly above this value are negative temperatures.
const NEGATIVE_THRESHOLD: f64 = 16384.0;

/// Degrees Celsius per unit of the pre-scaled reading.
const RESOLUTION: f64 = 0.03125;

/// Offset of the high temperature byte in a response report.
const HIGH_BYTE: usize = 2;

/// Offset of the low temperature byte in a response report.
const LOW_BYTE: usize = 3;

/// Shortest response that still carries a temperature.
pub const MIN_RESPONSE_LEN: usize = LOW_BYTE + 1;

/// Decode a temperature in degrees Celsius from the two raw report bytes.
///
/// Total over all byte pairs. The arithmetic is kept in this exact order so
/// results are bit-identical with reference readings.
#[must_use]
pub fn decode_temperature(high: u8, low: u8) -> f64 {
    let raw = 256.0 * f64::from(high) + f64::from(low);
    if raw > NEGATIVE_THRESHOLD {
        return -((NEGATIVE_THRESHOLD - (raw / 4.0)) * RESOLUTION);
    }
    (raw / 4.0) * RESOLUTION
}

/// The two temperature bytes of a response, before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawReading {
    /// High byte (response offset 2)
    pub high: u8,
    /// Low byte (response offset 3)
    pub low: u8,
}

impl RawReading {
    /// Create a raw reading from its two bytes.
    #[must_use]
    pub fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    /// Extract the temperature bytes from a response report.
    ///
    /// Returns `None` if the response is shorter than [`MIN_RESPONSE_LEN`].
    #[must_use]
    pub fn from_response(response: &[u8]) -> Option<Self> {
        match response {
            [_, _, high, low, ..] => Some(Self::new(*high, *low)),
            _ => None,
        }
    }

    /// The 16-bit value `256 * high + low`.
    #[must_use]
    pub fn value(&self) -> u16 {
        u16::from_be_bytes([self.high, self.low])
    }

    /// Decode with the given decode function.
    #[must_use]
    pub fn decode_with(&self, decode: fn(u8, u8) -> f64) -> f64 {
        decode(self.high, self.low)
    }
}
