//! Minimal HID transport interface.
//!
//! The session and scan logic only need to enumerate devices, open one,
//! write an output report, read an input report and close. Anything that
//! can do those four things can drive a sensor, which is how the tests run
//! without hardware.

use std::borrow::Cow;
use std::ffi::CString;
use std::time::Duration;

use temperx_core::DeviceIdentity;

use crate::error::TransportError;

/// An enumerated HID device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Vendor, product, revision and interface
    pub identity: DeviceIdentity,
    /// Backend specific path used to open the device
    pub path: CString,
}

impl DeviceDescriptor {
    /// The device path for logs.
    #[must_use]
    pub fn display_path(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

/// Access to the HID devices on the system.
pub trait HidTransport {
    /// Handle to an opened device.
    type Handle: HidHandle;
    /// Devices found by one walk of the bus.
    type Devices: Iterator<Item = DeviceDescriptor>;

    /// Walk the bus. Every call sees the devices attached right now.
    ///
    /// # Errors
    /// Returns an error if the device list cannot be read.
    fn enumerate(&mut self) -> Result<Self::Devices, TransportError>;

    /// Claim a device.
    ///
    /// # Errors
    /// Returns an error if the device is gone, already claimed, or not
    /// accessible to this user.
    fn open(&self, device: &DeviceDescriptor) -> Result<Self::Handle, TransportError>;
}

/// An opened HID device.
pub trait HidHandle {
    /// Send an output report, returning the number of bytes written.
    ///
    /// `timeout` is a cap the backend may not be able to enforce;
    /// [`HidApiHandle`](crate::HidApiHandle) ignores it, since `hidapi`
    /// writes block until the kernel accepts the report.
    ///
    /// # Errors
    /// Returns an error if the write fails, or if `timeout` elapses on a
    /// backend that enforces it.
    fn write(&mut self, data: &[u8], timeout: Duration) -> Result<usize, TransportError>;

    /// Read one input report of at most `max_len` bytes.
    ///
    /// # Errors
    /// Returns an error if the read fails or no report arrives within
    /// `timeout`.
    fn read(&mut self, max_len: usize, timeout: Duration) -> Result<Vec<u8>, TransportError>;

    /// Release the device.
    fn close(self);
}
