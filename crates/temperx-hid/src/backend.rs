//! `hidapi` transport.

use std::io::ErrorKind;
use std::time::Duration;

use hidapi::{DeviceInfo, HidApi, HidDevice};
use temperx_core::DeviceIdentity;
use tracing::{debug, trace};

use crate::error::TransportError;
use crate::transport::{DeviceDescriptor, HidHandle, HidTransport};

impl From<hidapi::HidError> for TransportError {
    fn from(err: hidapi::HidError) -> Self {
        match err {
            hidapi::HidError::IncompleteSendError { sent, all } => {
                Self::ShortWrite { written: sent, expected: all }
            }
            hidapi::HidError::IoError { error } if error.kind() == ErrorKind::PermissionDenied => {
                Self::PermissionDenied
            }
            other => Self::Backend(other.to_string()),
        }
    }
}

/// HID transport backed by the system `hidapi` library.
pub struct HidApiTransport {
    api: HidApi,
}

impl HidApiTransport {
    /// Initialise `hidapi`.
    ///
    /// # Errors
    /// Returns an error if the HID subsystem cannot be initialised.
    pub fn new() -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        debug!("hidapi initialised");
        Ok(Self { api })
    }
}

fn descriptor(info: &DeviceInfo) -> DeviceDescriptor {
    // Non-USB devices report interface -1, which never matches a sensor
    let interface = u8::try_from(info.interface_number()).unwrap_or(u8::MAX);
    DeviceDescriptor {
        identity: DeviceIdentity::new(
            info.vendor_id(),
            info.product_id(),
            info.release_number(),
            interface,
        ),
        path: info.path().to_owned(),
    }
}

impl HidTransport for HidApiTransport {
    type Handle = HidApiHandle;
    type Devices = std::vec::IntoIter<DeviceDescriptor>;

    fn enumerate(&mut self) -> Result<Self::Devices, TransportError> {
        self.api.refresh_devices()?;
        let devices: Vec<DeviceDescriptor> = self.api.device_list().map(descriptor).collect();
        trace!(count = devices.len(), "Enumerated HID devices");
        Ok(devices.into_iter())
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<Self::Handle, TransportError> {
        let handle = self.api.open_path(&device.path)?;
        debug!(path = %device.display_path(), identity = %device.identity, "Opened HID device");
        Ok(HidApiHandle { device: handle })
    }
}

/// Trim a read buffer to the report length. `hidapi` returns zero bytes
/// when the timeout elapses.
fn report_from_read(
    mut buf: Vec<u8>,
    len: usize,
    timeout: Duration,
) -> Result<Vec<u8>, TransportError> {
    if len == 0 {
        return Err(TransportError::Timeout(timeout));
    }
    buf.truncate(len);
    Ok(buf)
}

/// An opened `hidapi` device.
pub struct HidApiHandle {
    device: HidDevice,
}

impl HidHandle for HidApiHandle {
    // hidapi writes block without a timeout; hidraw caps them itself.
    fn write(&mut self, data: &[u8], _timeout: Duration) -> Result<usize, TransportError> {
        Ok(self.device.write(data)?)
    }

    fn read(&mut self, max_len: usize, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; max_len];
        let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let len = self.device.read_timeout(&mut buf, millis)?;
        report_from_read(buf, len, timeout)
    }

    fn close(self) {
        drop(self.device);
        trace!("Closed HID device");
    }
}
