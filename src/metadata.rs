//! Device metadata snapshot.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of an open device suitable
//! for UI display, logging and persistence. It is produced by
//! [`DeviceHandle::metadata`](crate::handle::DeviceHandle::metadata); fields the device
//! did not report (or reported empty) remain `None`.
//!
//! ## Re-identifying a device
//! - `vid`, `pid` and `serial_number` come from the device itself and survive replugging.
//! - `path` names the port or interface node and can change on reconnect; use it for diagnostics.
//! - `strings` is vendor-defined and may be empty; its order follows the device's string indices.

use serde::{Deserialize, Serialize};

/// Snapshot of metadata describing a single device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// USB Vendor ID (VID).
    pub vid: u16,

    /// USB Product ID (PID).
    pub pid: u16,

    /// OS/topological path to the device (lossy text form).
    pub path: String,

    pub manufacturer: Option<String>,

    pub product: Option<String>,

    /// On USB, this usually maps to the iSerialNumber string.
    pub serial_number: Option<String>,

    /// Indexed strings, in index order, up to the first index the device rejected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strings: Vec<String>,
}

impl DeviceMeta {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
