//! Native backends for `hidhandle`.
//!
//! A backend is the opaque capability that actually talks to the HID driver. The
//! [`DeviceHandle`](crate::handle::DeviceHandle) mediates every call into it and is the
//! only place that decides *whether* a call happens; backends only decide *how*.
//!
//! # Return-code convention
//! All primitives return the native `int` convention unchanged:
//! - `write` / `read` / `read_timeout`: bytes transferred, `0` for nothing, `-1` on failure.
//! - `set_nonblocking` and the string getters: `0` on success, non-zero on failure.
//!
//! # Feature flags
//! - **`hid`** (default) enables [`hid::HidApiBackend`], backed by the `hidapi` crate.

use crate::buffer::WideBuf;
use std::ffi::CStr;

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

/// Primitive operations a native HID layer must expose.
///
/// `Handle` is an owned native reference to an open device session. [`close`](Self::close)
/// consumes it, so a closed reference cannot be passed back in. Absence is modelled by the
/// caller (`Option<Handle>`); backends never receive a null reference.
pub trait NativeHidBackend {
    type Handle;

    /// Open the device at `path`. `None` if the native open failed.
    fn open(&self, path: &CStr) -> Option<Self::Handle>;

    fn close(&self, handle: Self::Handle);

    /// Write an output report. `data` is passed through byte-for-byte, including any
    /// report-ID prefix the platform expects.
    fn write(&self, handle: &Self::Handle, data: &[u8]) -> i32;

    /// Blocking read (or immediate, if nonblocking mode is active).
    fn read(&self, handle: &Self::Handle, buf: &mut [u8]) -> i32;

    /// Read with a timeout in milliseconds. `-1` waits indefinitely.
    fn read_timeout(&self, handle: &Self::Handle, buf: &mut [u8], timeout_ms: i32) -> i32;

    /// `nonblocking`: `1` to enable, `0` to disable.
    fn set_nonblocking(&self, handle: &Self::Handle, nonblocking: i32) -> i32;

    fn serial_number_string(&self, handle: &Self::Handle, out: &mut WideBuf, max_len: usize)
        -> i32;

    fn manufacturer_string(&self, handle: &Self::Handle, out: &mut WideBuf, max_len: usize)
        -> i32;

    fn product_string(&self, handle: &Self::Handle, out: &mut WideBuf, max_len: usize) -> i32;

    /// `0` on success; non-zero when the index does not exist or the call failed.
    fn indexed_string(
        &self,
        handle: &Self::Handle,
        index: i32,
        out: &mut WideBuf,
        max_len: usize,
    ) -> i32;
}
