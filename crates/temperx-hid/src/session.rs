//! Short-lived sensor session.
//!
//! A session owns an opened device handle from `open` until `close`. The
//! handle is released exactly once: by an explicit [`Session::close`] or,
//! on any early return, when the session is dropped.

use std::time::Duration;

use temperx_core::{DeviceIdentity, MIN_RESPONSE_LEN, RawReading, SensorModel};
use tracing::{debug, trace};

use crate::error::{HidError, HidResult, TransportError};
use crate::transport::{DeviceDescriptor, HidHandle, HidTransport};

/// Where a session is in its open/write/read/close sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Device claimed, nothing sent yet
    Opened,
    /// Command report written
    Written,
    /// Response report received
    Read,
    /// Handle released
    Closed,
}

/// An open session with one HID device.
pub struct Session<H: HidHandle> {
    identity: DeviceIdentity,
    handle: Option<H>,
    state: SessionState,
}

impl<H: HidHandle> Session<H> {
    /// Open a session with an enumerated device.
    ///
    /// # Errors
    /// Returns [`HidError::Open`] if the transport cannot claim the device.
    pub fn open<T>(transport: &T, device: &DeviceDescriptor) -> HidResult<Self>
    where
        T: HidTransport<Handle = H>,
    {
        let handle = transport.open(device).map_err(HidError::Open)?;
        trace!(identity = %device.identity, "Session opened");
        Ok(Self { identity: device.identity, handle: Some(handle), state: SessionState::Opened })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Write an output report.
    ///
    /// # Errors
    /// Returns [`HidError::Write`] on timeout, transport failure, or if
    /// fewer than `command.len()` bytes were accepted.
    pub fn write(&mut self, command: &[u8], timeout: Duration) -> HidResult<usize> {
        let handle = self.handle.as_mut().ok_or(HidError::Closed)?;
        let written = handle.write(command, timeout).map_err(HidError::Write)?;
        if written < command.len() {
            return Err(HidError::Write(TransportError::ShortWrite {
                written,
                expected: command.len(),
            }));
        }
        self.state = SessionState::Written;
        Ok(written)
    }

    /// Read an input report of at most `max_len` bytes.
    ///
    /// # Errors
    /// Returns [`HidError::Read`] on timeout, transport failure, or if the
    /// response is too short to carry a temperature.
    pub fn read(&mut self, max_len: usize, timeout: Duration) -> HidResult<Vec<u8>> {
        let handle = self.handle.as_mut().ok_or(HidError::Closed)?;
        let response = handle.read(max_len, timeout).map_err(HidError::Read)?;
        if response.len() < MIN_RESPONSE_LEN {
            return Err(HidError::Read(TransportError::ShortResponse(response.len())));
        }
        self.state = SessionState::Read;
        Ok(response)
    }

    /// Send the model's command and return the temperature bytes of the
    /// response.
    ///
    /// # Errors
    /// Returns [`HidError::Write`] or [`HidError::Read`] from the failing
    /// step.
    pub fn exchange(&mut self, model: &SensorModel) -> HidResult<RawReading> {
        self.write(model.command, model.io_timeout)?;
        let response = self.read(model.response_len, model.io_timeout)?;
        RawReading::from_response(&response)
            .ok_or(HidError::Read(TransportError::ShortResponse(response.len())))
    }

    /// Release the device. Further calls do nothing.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.close();
            self.state = SessionState::Closed;
            debug!(identity = %self.identity, "Session closed");
        }
    }
}

impl<H: HidHandle> Drop for Session<H> {
    fn drop(&mut self) {
        self.close();
    }
}
