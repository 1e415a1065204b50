//! Managed handle over a single HID device.
//!
//! [`DeviceHandle`] owns the native reference for one device and mediates every
//! read, write and metadata query against it. It never raises on native failure:
//! results are the backend's return codes, empty strings or `None`, and the caller
//! decides whether to retry.
//!
//! ## Lifecycle
//! 1. Construct from a [`DeviceDescriptor`], optionally with a reference that discovery
//!    already opened. No native call happens here.
//! 2. [`connect`](DeviceHandle::connect) opens the descriptor's path.
//! 3. Read / write / query.
//! 4. [`disconnect`](DeviceHandle::disconnect) closes and releases the reference.
//!
//! Operations on a handle without a native reference are no-ops with a fixed result
//! and perform no native call.
//!
//! ## Threading
//! The handle does no internal locking. Share it across threads only behind one mutex
//! per handle, held for the duration of each call.

use crate::backends::NativeHidBackend;
use crate::buffer::{WideBuf, MAX_STRING_LEN};
use crate::config::{HandleConfig, DEFAULT_READ_TIMEOUT_MS};
use crate::descriptor::DeviceDescriptor;
use crate::metadata::DeviceMeta;
use std::ffi::CStr;
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, info, warn};

/// Upper bound on indices visited by [`DeviceHandle::device_strings`].
pub const MAX_INDEXED_STRINGS: usize = 16;

/// Returned by [`DeviceHandle::set_nonblocking`] when there is no native reference.
pub const NO_DEVICE: i32 = -1;

const UNKNOWN_DEVICE: &str = "unknown device (not connected)";

/// Which native string getter to call.
#[derive(Clone, Copy, Debug)]
enum StringQuery {
    SerialNumber,
    Manufacturer,
    Product,
    Indexed(i32),
}

/// How a string query reports a non-zero native return code.
///
/// The named getters historically hand back whatever the buffer holds (usually empty)
/// while the indexed getter reports `None`. Callers rely on both, so each call site
/// states which one it wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OnFailure {
    BufferContents,
    Absent,
}

/// Owned handle to one HID device.
pub struct DeviceHandle<B: NativeHidBackend> {
    backend: B,
    descriptor: DeviceDescriptor,
    native: Option<B::Handle>,
    connected: bool,
    nonblocking_on_connect: bool,
    read_timeout_ms: i32,
}

impl<B: NativeHidBackend> DeviceHandle<B> {
    /// Wrap a discovered device. `native` is a reference discovery may already hold.
    pub fn new(backend: B, descriptor: DeviceDescriptor, native: Option<B::Handle>) -> Self {
        Self {
            backend,
            descriptor,
            native,
            connected: false,
            nonblocking_on_connect: false,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }

    /// Build an unopened handle from configuration.
    pub fn from_config(backend: B, config: &HandleConfig) -> Self {
        let mut handle = Self::new(backend, config.device.clone(), None);
        handle.nonblocking_on_connect = config.nonblocking;
        handle.read_timeout_ms = config.read_timeout_ms;
        handle
    }

    /// `true` while a native reference is held, i.e. the handle can attempt I/O.
    ///
    /// This is not the same as [`is_connected`](Self::is_connected): a reference handed
    /// over by discovery is valid before `connect` has run.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.native.is_some()
    }

    /// `true` after a successful [`connect`](Self::connect) until [`disconnect`](Self::disconnect).
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    #[inline]
    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn vendor_id(&self) -> u16 {
        self.descriptor.vendor_id()
    }

    #[inline]
    pub fn product_id(&self) -> u16 {
        self.descriptor.product_id()
    }

    /// Platform-specific device path.
    #[inline]
    pub fn path(&self) -> &CStr {
        self.descriptor.path()
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn read_timeout_ms(&self) -> i32 {
        self.read_timeout_ms
    }

    /// Open the device at the descriptor's path.
    ///
    /// Returns whether the native open succeeded. An already-connected handle returns
    /// `true` without touching the device. A reference that is held but not connected
    /// (one handed over by discovery, say) is closed before the path is reopened.
    pub fn connect(&mut self) -> bool {
        if self.connected && self.native.is_some() {
            debug!("{} already connected", self.descriptor);
            return true;
        }

        if let Some(stale) = self.native.take() {
            debug!("{} releasing unconnected reference before open", self.descriptor);
            self.backend.close(stale);
        }

        match self.backend.open(self.descriptor.path()) {
            Some(native) => {
                self.native = Some(native);
                self.connected = true;
                info!("connected to {}", self.descriptor);
                true
            }
            None => {
                self.connected = false;
                warn!("failed to open {}", self.descriptor);
                false
            }
        }
    }

    /// [`connect`](Self::connect), then apply the configured nonblocking mode.
    pub fn connect_configured(&mut self) -> bool {
        if !self.connect() {
            return false;
        }
        if self.nonblocking_on_connect {
            let rc = self.set_nonblocking(1);
            if rc != 0 {
                warn!("{} rejected nonblocking mode ({rc})", self.descriptor);
            }
        }
        true
    }

    /// Close and release the native reference.
    ///
    /// Returns `false` if no reference was held. The outcome of the native close is
    /// not reported. After this the handle is neither connected nor valid, so a second
    /// call returns `false`.
    pub fn disconnect(&mut self) -> bool {
        let Some(native) = self.native.take() else {
            return false;
        };
        self.backend.close(native);
        self.connected = false;
        info!("disconnected from {}", self.descriptor);
        true
    }

    /// Send `data` as-is. Returns the native result, or `0` when there is no reference
    /// or `data` is empty.
    ///
    /// No report-ID byte is added; platforms that need one must include it in `data`.
    pub fn write(&self, data: &[u8]) -> i32 {
        let Some(native) = self.native.as_ref() else {
            return 0;
        };
        if data.is_empty() {
            return 0;
        }
        self.backend.write(native, data)
    }

    /// Read into `buf` (blocking unless nonblocking mode is on). `0` without a reference.
    pub fn read(&self, buf: &mut [u8]) -> i32 {
        match self.native.as_ref() {
            Some(native) => self.backend.read(native, buf),
            None => 0,
        }
    }

    /// Read into `buf`, waiting at most `timeout_ms`. `0` without a reference.
    pub fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> i32 {
        match self.native.as_ref() {
            Some(native) => self.backend.read_timeout(native, buf, timeout_ms),
            None => 0,
        }
    }

    /// [`read_timeout`](Self::read_timeout) with the configured timeout.
    pub fn read_default(&self, buf: &mut [u8]) -> i32 {
        self.read_timeout(buf, self.read_timeout_ms)
    }

    /// Enable (`1`) or disable (`0`) nonblocking reads. Safe at any time.
    ///
    /// Unlike the other operations this reports [`NO_DEVICE`] rather than `0` when no
    /// reference is held.
    pub fn set_nonblocking(&self, nonblocking: i32) -> i32 {
        match self.native.as_ref() {
            Some(native) => self.backend.set_nonblocking(native, nonblocking),
            None => NO_DEVICE,
        }
    }

    pub fn serial_number(&self) -> String {
        self.named_string(StringQuery::SerialNumber)
    }

    pub fn manufacturer(&self) -> String {
        self.named_string(StringQuery::Manufacturer)
    }

    pub fn product(&self) -> String {
        self.named_string(StringQuery::Product)
    }

    /// String at `index`, or `None` if the device rejected the index or the call failed.
    pub fn device_string(&self, index: i32) -> Option<String> {
        self.query_string(StringQuery::Indexed(index), OnFailure::Absent)
    }

    /// Indexed strings from index 0 upward, stopping at the first failure or after
    /// [`MAX_INDEXED_STRINGS`] indices.
    pub fn device_strings(&self) -> IndexedStrings<'_, B> {
        IndexedStrings {
            handle: self,
            next_index: 0,
            done: false,
        }
    }

    /// Collect the device's identity and strings. Issues several native calls.
    pub fn metadata(&self) -> DeviceMeta {
        let non_empty = |s: String| (!s.is_empty()).then_some(s);
        DeviceMeta {
            vid: self.vendor_id(),
            pid: self.product_id(),
            path: self.descriptor.path_lossy(),
            manufacturer: non_empty(self.manufacturer()),
            product: non_empty(self.product()),
            serial_number: non_empty(self.serial_number()),
            strings: self.device_strings().collect(),
        }
    }

    fn named_string(&self, query: StringQuery) -> String {
        self.query_string(query, OnFailure::BufferContents)
            .unwrap_or_default()
    }

    /// Run one native string getter into a fresh bounded buffer.
    fn query_string(&self, query: StringQuery, on_failure: OnFailure) -> Option<String> {
        let Some(native) = self.native.as_ref() else {
            return match on_failure {
                OnFailure::BufferContents => Some(String::new()),
                OnFailure::Absent => None,
            };
        };

        let mut buf = WideBuf::new();
        let rc = match query {
            StringQuery::SerialNumber => {
                self.backend
                    .serial_number_string(native, &mut buf, MAX_STRING_LEN)
            }
            StringQuery::Manufacturer => {
                self.backend
                    .manufacturer_string(native, &mut buf, MAX_STRING_LEN)
            }
            StringQuery::Product => self.backend.product_string(native, &mut buf, MAX_STRING_LEN),
            StringQuery::Indexed(index) => {
                self.backend
                    .indexed_string(native, index, &mut buf, MAX_STRING_LEN)
            }
        };

        if rc != 0 {
            debug!("{:?} query on {} returned {rc}", query, self.descriptor);
            if on_failure == OnFailure::Absent {
                return None;
            }
        }
        Some(buf.to_string_lossy())
    }
}

/// `manufacturer: X, serial_number: Y, product: Z` for a valid handle, otherwise
/// `unknown device (not connected)`.
///
/// Formatting a valid handle makes three native round-trips; keep it off hot paths.
impl<B: NativeHidBackend> fmt::Display for DeviceHandle<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str(UNKNOWN_DEVICE);
        }
        write!(
            f,
            "manufacturer: {}, serial_number: {}, product: {}",
            self.manufacturer(),
            self.serial_number(),
            self.product()
        )
    }
}

impl<B: NativeHidBackend> fmt::Debug for DeviceHandle<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("descriptor", &self.descriptor)
            .field("valid", &self.is_valid())
            .field("connected", &self.connected)
            .finish()
    }
}

/// Lazy walk over a device's indexed strings.
///
/// Ends at the first index the device rejects or after [`MAX_INDEXED_STRINGS`] indices,
/// and stays ended. Each call to [`DeviceHandle::device_strings`] starts again at 0.
pub struct IndexedStrings<'a, B: NativeHidBackend> {
    handle: &'a DeviceHandle<B>,
    next_index: i32,
    done: bool,
}

impl<B: NativeHidBackend> Iterator for IndexedStrings<'_, B> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        if self.next_index as usize >= MAX_INDEXED_STRINGS {
            self.done = true;
            return None;
        }
        match self
            .handle
            .query_string(StringQuery::Indexed(self.next_index), OnFailure::Absent)
        {
            Some(s) => {
                self.next_index += 1;
                Some(s)
            }
            None => {
                self.done = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(MAX_INDEXED_STRINGS - self.next_index as usize))
        }
    }
}

impl<B: NativeHidBackend> FusedIterator for IndexedStrings<'_, B> {}
