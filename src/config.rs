//! TOML configuration for a single managed device.
//!
//! ```toml
//! nonblocking = true
//! read_timeout_ms = 250
//!
//! [device]
//! path = "/dev/hidraw3"
//! vendor_id = 0x046d
//! product_id = 0xc52b
//! ```
//!
//! `nonblocking` defaults to `false`; `read_timeout_ms` defaults to
//! [`DEFAULT_READ_TIMEOUT_MS`].

use crate::descriptor::DeviceDescriptor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_READ_TIMEOUT_MS: i32 = 1000;

fn default_read_timeout_ms() -> i32 {
    DEFAULT_READ_TIMEOUT_MS
}

/// Which device to manage and how to drive it once connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleConfig {
    pub device: DeviceDescriptor,

    /// Switch the device to nonblocking reads after a successful connect.
    #[serde(default)]
    pub nonblocking: bool,

    /// Timeout used by [`DeviceHandle::read_default`](crate::handle::DeviceHandle::read_default).
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: i32,
}

impl HandleConfig {
    pub fn new(device: DeviceDescriptor) -> Self {
        Self {
            device,
            nonblocking: false,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }

    pub fn from_toml_str(text: &str) -> crate::Result<Self> {
        toml::from_str(text).map_err(|e| {
            warn!("rejected device config: {e}");
            crate::Error::from(e)
        })
    }

    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = HandleConfig::from_toml_str(
            r#"
            nonblocking = true
            read_timeout_ms = 250

            [device]
            path = "/dev/hidraw3"
            vendor_id = 0x046d
            product_id = 0xc52b
            "#,
        )
        .unwrap();
        assert!(cfg.nonblocking);
        assert_eq!(cfg.read_timeout_ms, 250);
        assert_eq!(cfg.device.vendor_id(), 0x046d);
        assert_eq!(cfg.device.product_id(), 0xc52b);
        assert_eq!(cfg.device.path().to_str().unwrap(), "/dev/hidraw3");
    }

    #[test]
    fn defaults_apply() {
        let cfg = HandleConfig::from_toml_str(
            r#"
            [device]
            path = "1-2:1.0"
            vendor_id = 1
            product_id = 2
            "#,
        )
        .unwrap();
        assert!(!cfg.nonblocking);
        assert_eq!(cfg.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
    }

    #[test]
    fn missing_device_is_an_error() {
        let err = HandleConfig::from_toml_str("nonblocking = true").unwrap_err();
        assert!(matches!(err, crate::Error::Toml(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = HandleConfig::load("/nonexistent/hidhandle.toml").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
