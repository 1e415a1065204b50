//! hidhandle — a managed handle over a single HID device.
//!
//! Wraps a native HID layer ([`NativeHidBackend`]) behind [`DeviceHandle`], which owns the
//! native reference, gates every operation on its presence, and bounds every native string
//! buffer. Discovery is left to the caller: hand in a [`DeviceDescriptor`] (for example from
//! `hidapi::HidApi::device_list`) and drive the handle from there.
//!
//! ```no_run
//! # #[cfg(feature = "hid")]
//! # fn main() -> hidhandle::Result<()> {
//! use hidhandle::backends::hid::HidApiBackend;
//! use hidhandle::{DeviceDescriptor, DeviceHandle};
//!
//! let api = hidapi::HidApi::new()?;
//! let info = api.device_list().next().expect("no HID devices");
//! let mut dev = DeviceHandle::new(HidApiBackend::new(&api), DeviceDescriptor::from(info), None);
//! if dev.connect() {
//!     println!("{dev}");
//!     let mut buf = [0u8; 64];
//!     let n = dev.read_timeout(&mut buf, 100);
//!     println!("read {n}");
//!     dev.disconnect();
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "hid"))]
//! # fn main() {}
//! ```

pub mod backends;
pub mod buffer;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod handle;
pub mod metadata;

pub use backends::NativeHidBackend;
pub use buffer::{WideBuf, MAX_STRING_LEN};
pub use config::HandleConfig;
pub use descriptor::DeviceDescriptor;
pub use error::{Error, Result};
pub use handle::{DeviceHandle, IndexedStrings, MAX_INDEXED_STRINGS, NO_DEVICE};
pub use metadata::DeviceMeta;
