//! In-memory transport for tests.

use std::cell::RefCell;
use std::ffi::CString;
use std::fmt::Write as _;
use std::rc::Rc;
use std::time::Duration;

use temperx_core::DeviceIdentity;

use crate::error::TransportError;
use crate::transport::{DeviceDescriptor, HidHandle, HidTransport};

/// How a fake device reacts.
#[derive(Debug, Clone)]
pub(crate) enum Behaviour {
    Respond(Vec<u8>),
    OpenDenied,
    WriteTimeout,
    ShortWrite(usize),
    ReadTimeout,
}

impl Behaviour {
    /// A well-formed TEMPerX response carrying the given temperature bytes.
    pub(crate) fn respond(high: u8, low: u8) -> Self {
        Self::Respond(vec![0x80, 0x80, high, low, 0x4e, 0x20, 0x00, 0x00])
    }
}

type CallLog = Rc<RefCell<Vec<String>>>;

/// Transport over a fixed list of fake devices, recording every call.
#[derive(Default)]
pub(crate) struct FakeTransport {
    devices: Vec<(DeviceDescriptor, Behaviour)>,
    calls: CallLog,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_device(&mut self, identity: DeviceIdentity, behaviour: Behaviour) -> DeviceDescriptor {
        let path = CString::new(format!("/dev/hidraw{}", self.devices.len())).expect("no NUL");
        let descriptor = DeviceDescriptor { identity, path };
        self.devices.push((descriptor.clone(), behaviour));
        descriptor
    }

    pub(crate) fn add_sensor(&mut self, behaviour: Behaviour) -> DeviceDescriptor {
        self.add_device(DeviceIdentity::new(0x413d, 0x2107, 0x0000, 0x01), behaviour)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls starting with `op`.
    pub(crate) fn count(&self, op: &str) -> usize {
        self.calls.borrow().iter().filter(|call| call.starts_with(op)).count()
    }

    /// Calls made against one device path.
    pub(crate) fn calls_for(&self, path: &str) -> Vec<String> {
        self.calls.borrow().iter().filter(|call| call.contains(path)).cloned().collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl HidTransport for FakeTransport {
    type Handle = FakeHandle;
    type Devices = std::vec::IntoIter<DeviceDescriptor>;

    fn enumerate(&mut self) -> Result<Self::Devices, TransportError> {
        self.record("enumerate".to_string());
        let devices: Vec<_> = self.devices.iter().map(|(d, _)| d.clone()).collect();
        Ok(devices.into_iter())
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<Self::Handle, TransportError> {
        self.record(format!("open {}", device.display_path()));
        let behaviour = self
            .devices
            .iter()
            .find(|(d, _)| d.path == device.path)
            .map(|(_, b)| b.clone())
            .ok_or_else(|| TransportError::Backend("No such device".to_string()))?;
        if matches!(behaviour, Behaviour::OpenDenied) {
            return Err(TransportError::PermissionDenied);
        }
        Ok(FakeHandle {
            path: device.display_path().into_owned(),
            behaviour,
            calls: Rc::clone(&self.calls),
        })
    }
}

pub(crate) struct FakeHandle {
    path: String,
    behaviour: Behaviour,
    calls: CallLog,
}

impl HidHandle for FakeHandle {
    fn write(&mut self, data: &[u8], timeout: Duration) -> Result<usize, TransportError> {
        let hex = data.iter().fold(String::new(), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        });
        self.calls.borrow_mut().push(format!("write {} {hex}", self.path));
        match self.behaviour {
            Behaviour::WriteTimeout => Err(TransportError::Timeout(timeout)),
            Behaviour::ShortWrite(written) => Ok(written),
            _ => Ok(data.len()),
        }
    }

    fn read(&mut self, max_len: usize, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        self.calls.borrow_mut().push(format!("read {}", self.path));
        match &self.behaviour {
            Behaviour::Respond(bytes) => Ok(bytes.iter().copied().take(max_len).collect()),
            _ => Err(TransportError::Timeout(timeout)),
        }
    }

    fn close(self) {
        self.calls.borrow_mut().push(format!("close {}", self.path));
    }
}
