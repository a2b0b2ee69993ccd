use std::fmt;
use std::sync::mpsc::Sender;

use crate::device_catalog::descriptor::DeviceDescriptor;

#[derive(Debug)]
pub struct EnumerateError(pub String);

impl fmt::Display for EnumerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device enumeration failed: {}", self.0)
    }
}

impl std::error::Error for EnumerateError {}

/// The injected device-enumeration collaborator.
pub trait DeviceEnumerator: Send + Sync {
    /// Flat list of currently attached input devices. May block briefly.
    fn enumerate(&self) -> Result<Vec<DeviceDescriptor>, EnumerateError>;

    /// Registers a hot-plug notification channel. Implementations that
    /// cannot observe device changes leave this as the default no-op.
    fn watch(&self, _notify: Sender<()>) {}
}
