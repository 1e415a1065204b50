//! Bounded wide-string buffer used for native string retrieval.
//!
//! Native HID string getters fill a caller-owned `wchar_t` buffer of a fixed
//! capacity. [`WideBuf`] is the Rust side of that contract: storage is a fixed
//! array of [`MAX_STRING_LEN`] UTF-16 code units (1024 bytes), and every write
//! path clamps to that capacity, so a backend cannot overrun it.

use std::fmt;

/// Capacity of a [`WideBuf`] in UTF-16 code units.
pub const MAX_STRING_LEN: usize = 1024 / 2;

/// Fixed-capacity UTF-16 buffer handed to [`NativeHidBackend`](crate::backends::NativeHidBackend)
/// string primitives.
#[derive(Clone)]
pub struct WideBuf {
    units: [u16; MAX_STRING_LEN],
    len: usize,
}

impl WideBuf {
    pub const fn new() -> Self {
        Self {
            units: [0; MAX_STRING_LEN],
            len: 0,
        }
    }

    /// Total capacity in code units.
    #[inline]
    pub const fn capacity(&self) -> usize {
        MAX_STRING_LEN
    }

    /// Number of code units currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Replace the contents with `text`, truncated to `min(max_len, capacity)` code units.
    pub fn set_str(&mut self, text: &str, max_len: usize) {
        let limit = max_len.min(self.capacity());
        let mut n = 0;
        for unit in text.encode_utf16().take(limit) {
            self.units[n] = unit;
            n += 1;
        }
        self.len = n;
    }

    /// Current contents as UTF-16 code units.
    #[inline]
    pub fn units(&self) -> &[u16] {
        &self.units[..self.len]
    }

    /// Full backing storage, for raw FFI backends that write `wchar_t` data directly.
    ///
    /// Call [`set_len`](Self::set_len) afterwards to publish what was written.
    #[inline]
    pub fn units_mut(&mut self) -> &mut [u16] {
        &mut self.units
    }

    /// Set the number of valid code units (clamped to capacity).
    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(MAX_STRING_LEN);
    }

    /// Decode the contents, replacing unpaired surrogates with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.units())
    }
}

impl Default for WideBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WideBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WideBuf")
            .field("len", &self.len)
            .field("text", &self.to_string_lossy())
            .finish()
    }
}
