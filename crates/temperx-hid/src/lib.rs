//! temperx HID - TEMPerX sensor discovery and communication.
//!
//! This crate walks the attached HID devices, picks out the ones matching a
//! [`SensorModel`](temperx_core::SensorModel), and runs one short session per
//! sensor: open, write the command report, read the response, close.
//!
//! The USB side is behind the [`HidTransport`] and [`HidHandle`] traits.
//! [`HidApiTransport`] implements them with `hidapi`.

pub mod backend;
pub mod error;
pub mod scan;
pub mod session;
pub mod transport;

pub use backend::{HidApiHandle, HidApiTransport};
pub use error::{HidError, HidResult, TransportError};
pub use scan::{DeviceFailure, ScanSummary, scan};
pub use session::{Session, SessionState};
pub use transport::{DeviceDescriptor, HidHandle, HidTransport};

#[cfg(test)]
pub(crate) mod testing;
