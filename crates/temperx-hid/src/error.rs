//! HID error types.

use std::time::Duration;

use thiserror::Error;

/// Failure reported by the HID transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("Short response: {0} bytes")]
    ShortResponse(usize),

    #[error("Permission denied - check udev rules")]
    PermissionDenied,

    #[error("HID backend error: {0}")]
    Backend(String),
}

/// HID error type.
///
/// `Open`, `Write` and `Read` are per-device and never abort a scan.
#[derive(Debug, Error)]
pub enum HidError {
    #[error("Failed to enumerate HID devices: {0}")]
    Enumerate(#[source] TransportError),

    #[error("Open error: {0}")]
    Open(#[source] TransportError),

    #[error("Output report write failed: {0}")]
    Write(#[source] TransportError),

    #[error("Input report read failed: {0}")]
    Read(#[source] TransportError),

    #[error("Session already closed")]
    Closed,
}

impl HidError {
    /// Name of the session stage that failed.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Enumerate(_) => "enumerate",
            Self::Open(_) => "open",
            Self::Write(_) => "write",
            Self::Read(_) => "read",
            Self::Closed => "closed",
        }
    }
}

/// Result type for HID operations.
pub type HidResult<T> = Result<T, HidError>;
