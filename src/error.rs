//! Error types for the setup edges of `hidhandle`.
//!
//! Device operations on [`DeviceHandle`](crate::handle::DeviceHandle) never return
//! these; they report failure through native return codes. `Error` is used only where
//! configuration is loaded or a backend is constructed.

use thiserror::Error;

/// Errors raised while loading configuration or setting up a backend.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A device path contained an interior NUL byte and cannot be handed to the native layer.
    #[error("invalid device path: {0:?}")]
    InvalidPath(String),

    #[cfg(feature = "hid")]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

pub type Result<T> = std::result::Result<T, Error>;
