//! Static identity of a discoverable HID device.
//!
//! A [`DeviceDescriptor`] is produced by an external enumeration step (for example
//! `hidapi::HidApi::device_list`) and handed to
//! [`DeviceHandle::new`](crate::handle::DeviceHandle::new). It is never mutated afterwards.
//!
//! # Path
//! `path` is the platform-specific identifier passed to the native open call
//! (`/dev/hidraw3`, `1-2:1.0`, `\\?\hid#vid_046d...`). Treat it as opaque. It is kept
//! as a [`CString`] because that is what the native layer consumes.

use serde::{Deserialize, Serialize};
use std::ffi::{CStr, CString};
use std::fmt;

/// Path + VID/PID of a single HID interface.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    #[serde(with = "path_text")]
    path: CString,
    vendor_id: u16,
    product_id: u16,
}

impl DeviceDescriptor {
    pub fn new(path: CString, vendor_id: u16, product_id: u16) -> Self {
        Self {
            path,
            vendor_id,
            product_id,
        }
    }

    /// Build a descriptor from a textual path.
    ///
    /// Fails with [`Error::InvalidPath`](crate::Error::InvalidPath) if `path` contains a NUL byte.
    pub fn from_path_str(path: &str, vendor_id: u16, product_id: u16) -> crate::Result<Self> {
        let path = CString::new(path).map_err(|_| crate::Error::InvalidPath(path.to_string()))?;
        Ok(Self::new(path, vendor_id, product_id))
    }

    /// Platform-specific device path.
    #[inline]
    pub fn path(&self) -> &CStr {
        &self.path
    }

    /// Path decoded for display and logging.
    pub fn path_lossy(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    #[inline]
    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    #[inline]
    pub fn product_id(&self) -> u16 {
        self.product_id
    }
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VID:PID={:04x}:{:04x} path={}",
            self.vendor_id,
            self.product_id,
            self.path.to_string_lossy()
        )
    }
}

#[cfg(feature = "hid")]
impl From<&hidapi::DeviceInfo> for DeviceDescriptor {
    fn from(info: &hidapi::DeviceInfo) -> Self {
        Self::new(info.path().to_owned(), info.vendor_id(), info.product_id())
    }
}

/// Serialize the path as text so descriptors read naturally in TOML/JSON.
mod path_text {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::ffi::CString;

    pub fn serialize<S: Serializer>(path: &CString, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&path.to_string_lossy())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CString, D::Error> {
        let text = String::deserialize(d)?;
        CString::new(text).map_err(|_| de::Error::custom("device path contains a NUL byte"))
    }
}
