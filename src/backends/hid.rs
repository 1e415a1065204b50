//! `hidapi`-backed native layer.
//!
//! [`HidApiBackend`] adapts the `Result`-returning `hidapi` API to the integer
//! return-code contract of [`NativeHidBackend`]: `Ok(n)` becomes `n`, any error
//! becomes `-1` and is logged at `debug`. Closing is dropping the `HidDevice`.

use crate::backends::NativeHidBackend;
use crate::buffer::WideBuf;
use hidapi::{HidApi, HidDevice, HidResult};
use std::ffi::CStr;
use tracing::debug;

/// Native failure sentinel.
const FAILURE: i32 = -1;

/// [`NativeHidBackend`] over a borrowed [`HidApi`] context.
pub struct HidApiBackend<'a> {
    api: &'a HidApi,
}

impl<'a> HidApiBackend<'a> {
    pub fn new(api: &'a HidApi) -> Self {
        Self { api }
    }
}

fn transfer_code(op: &str, res: HidResult<usize>) -> i32 {
    match res {
        Ok(n) => i32::try_from(n).unwrap_or(i32::MAX),
        Err(e) => {
            debug!("hid {op} failed: {e}");
            FAILURE
        }
    }
}

fn string_code(
    op: &str,
    res: HidResult<Option<String>>,
    out: &mut WideBuf,
    max_len: usize,
) -> i32 {
    out.clear();
    match res {
        Ok(Some(s)) => {
            out.set_str(&s, max_len);
            0
        }
        Ok(None) => 0,
        Err(e) => {
            debug!("hid {op} failed: {e}");
            FAILURE
        }
    }
}

impl NativeHidBackend for HidApiBackend<'_> {
    type Handle = HidDevice;

    fn open(&self, path: &CStr) -> Option<HidDevice> {
        match self.api.open_path(path) {
            Ok(dev) => Some(dev),
            Err(e) => {
                debug!("hid open {:?} failed: {e}", path);
                None
            }
        }
    }

    fn close(&self, handle: HidDevice) {
        drop(handle);
    }

    fn write(&self, handle: &HidDevice, data: &[u8]) -> i32 {
        transfer_code("write", handle.write(data))
    }

    fn read(&self, handle: &HidDevice, buf: &mut [u8]) -> i32 {
        transfer_code("read", handle.read(buf))
    }

    fn read_timeout(&self, handle: &HidDevice, buf: &mut [u8], timeout_ms: i32) -> i32 {
        transfer_code("read_timeout", handle.read_timeout(buf, timeout_ms))
    }

    fn set_nonblocking(&self, handle: &HidDevice, nonblocking: i32) -> i32 {
        match handle.set_blocking_mode(nonblocking == 0) {
            Ok(()) => 0,
            Err(e) => {
                debug!("hid set_nonblocking({nonblocking}) failed: {e}");
                FAILURE
            }
        }
    }

    fn serial_number_string(&self, handle: &HidDevice, out: &mut WideBuf, max_len: usize) -> i32 {
        string_code("serial_number", handle.get_serial_number_string(), out, max_len)
    }

    fn manufacturer_string(&self, handle: &HidDevice, out: &mut WideBuf, max_len: usize) -> i32 {
        string_code("manufacturer", handle.get_manufacturer_string(), out, max_len)
    }

    fn product_string(&self, handle: &HidDevice, out: &mut WideBuf, max_len: usize) -> i32 {
        string_code("product", handle.get_product_string(), out, max_len)
    }

    fn indexed_string(
        &self,
        handle: &HidDevice,
        index: i32,
        out: &mut WideBuf,
        max_len: usize,
    ) -> i32 {
        string_code("indexed_string", handle.get_indexed_string(index), out, max_len)
    }
}
