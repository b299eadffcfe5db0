//! Composite USB device identity.

use std::fmt;

/// Vendor, product, revision and interface of an enumerated HID device.
///
/// Displays as `vvvv:pppp:rrrr:ii` in lowercase hex, the form used for
/// sensor signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    /// USB Vendor ID
    pub vendor_id: u16,
    /// USB Product ID
    pub product_id: u16,
    /// Device release number (bcdDevice)
    pub revision: u16,
    /// Interface index
    pub interface: u8,
}

impl DeviceIdentity {
    /// Create a new identity.
    #[must_use]
    pub fn new(vendor_id: u16, product_id: u16, revision: u16, interface: u8) -> Self {
        Self { vendor_id, product_id, revision, interface }
    }

    /// The colon-separated signature string for this identity.
    #[must_use]
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:04x}:{:04x}:{:02x}",
            self.vendor_id, self.product_id, self.revision, self.interface
        )
    }
}
