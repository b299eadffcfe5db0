//! temperx Core - Sensor report decoding and device models.
//!
//! This crate contains the pure parts of temperx: turning the bytes of a
//! TEMPerX response into a temperature, describing which USB devices are
//! sensors, and the linear calibration applied to every reading.

pub mod calibration;
pub mod decode;
pub mod identity;
pub mod model;
pub mod reading;

pub use calibration::Calibration;
pub use decode::{MIN_RESPONSE_LEN, RawReading, decode_temperature};
pub use identity::DeviceIdentity;
pub use model::{KNOWN_MODELS, SensorModel, TEMPER_X};
pub use reading::Reading;
