//! Recording mock of the native HID layer.
#![allow(dead_code)]

use hidhandle::{DeviceDescriptor, DeviceHandle, NativeHidBackend, WideBuf};
use std::cell::RefCell;
use std::ffi::CStr;
use std::rc::Rc;

/// One native primitive invocation, as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    Close(u32),
    Write(u32, Vec<u8>),
    Read(u32, usize),
    ReadTimeout(u32, usize, i32),
    SetNonblocking(u32, i32),
    Serial(u32),
    Manufacturer(u32),
    Product(u32),
    Indexed(u32, i32),
}

#[derive(Debug)]
pub struct MockState {
    pub calls: Vec<Call>,
    pub open_ok: bool,
    pub next_id: u32,
    pub serial: Option<String>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    /// Index `i` succeeds while `i < indexed.len()`.
    pub indexed: Vec<String>,
    pub write_result: Option<i32>,
    pub read_data: Vec<u8>,
    pub nonblocking_result: i32,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            open_ok: true,
            next_id: 1,
            serial: Some("SN-0001".into()),
            manufacturer: Some("Acme".into()),
            product: Some("Widget".into()),
            indexed: Vec::new(),
            write_result: None,
            read_data: Vec::new(),
            nonblocking_result: 0,
        }
    }
}

/// Native reference handed out by [`MockBackend::open`]. Not `Clone`, like a real one.
#[derive(Debug, PartialEq, Eq)]
pub struct MockNative(pub u32);

#[derive(Clone, Default)]
pub struct MockBackend {
    pub state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn fill(&self, value: Option<String>, out: &mut WideBuf, max_len: usize) -> i32 {
        out.clear();
        match value {
            Some(s) => {
                out.set_str(&s, max_len);
                0
            }
            None => -1,
        }
    }
}

impl NativeHidBackend for MockBackend {
    type Handle = MockNative;

    fn open(&self, path: &CStr) -> Option<MockNative> {
        self.record(Call::Open(path.to_string_lossy().into_owned()));
        let mut st = self.state.borrow_mut();
        if !st.open_ok {
            return None;
        }
        let id = st.next_id;
        st.next_id += 1;
        Some(MockNative(id))
    }

    fn close(&self, handle: MockNative) {
        self.record(Call::Close(handle.0));
    }

    fn write(&self, handle: &MockNative, data: &[u8]) -> i32 {
        self.record(Call::Write(handle.0, data.to_vec()));
        self.state
            .borrow()
            .write_result
            .unwrap_or(data.len() as i32)
    }

    fn read(&self, handle: &MockNative, buf: &mut [u8]) -> i32 {
        self.record(Call::Read(handle.0, buf.len()));
        let st = self.state.borrow();
        let n = st.read_data.len().min(buf.len());
        buf[..n].copy_from_slice(&st.read_data[..n]);
        n as i32
    }

    fn read_timeout(&self, handle: &MockNative, buf: &mut [u8], timeout_ms: i32) -> i32 {
        self.record(Call::ReadTimeout(handle.0, buf.len(), timeout_ms));
        let st = self.state.borrow();
        let n = st.read_data.len().min(buf.len());
        buf[..n].copy_from_slice(&st.read_data[..n]);
        n as i32
    }

    fn set_nonblocking(&self, handle: &MockNative, nonblocking: i32) -> i32 {
        self.record(Call::SetNonblocking(handle.0, nonblocking));
        self.state.borrow().nonblocking_result
    }

    fn serial_number_string(&self, handle: &MockNative, out: &mut WideBuf, max_len: usize) -> i32 {
        self.record(Call::Serial(handle.0));
        let v = self.state.borrow().serial.clone();
        self.fill(v, out, max_len)
    }

    fn manufacturer_string(&self, handle: &MockNative, out: &mut WideBuf, max_len: usize) -> i32 {
        self.record(Call::Manufacturer(handle.0));
        let v = self.state.borrow().manufacturer.clone();
        self.fill(v, out, max_len)
    }

    fn product_string(&self, handle: &MockNative, out: &mut WideBuf, max_len: usize) -> i32 {
        self.record(Call::Product(handle.0));
        let v = self.state.borrow().product.clone();
        self.fill(v, out, max_len)
    }

    fn indexed_string(
        &self,
        handle: &MockNative,
        index: i32,
        out: &mut WideBuf,
        max_len: usize,
    ) -> i32 {
        self.record(Call::Indexed(handle.0, index));
        let v = usize::try_from(index)
            .ok()
            .and_then(|i| self.state.borrow().indexed.get(i).cloned());
        self.fill(v, out, max_len)
    }
}

pub const PATH: &str = "/dev/hidraw7";

pub fn descriptor() -> DeviceDescriptor {
    DeviceDescriptor::from_path_str(PATH, 0x1209, 0xbeef).unwrap()
}

/// Handle that has never been opened.
pub fn absent() -> (MockBackend, DeviceHandle<MockBackend>) {
    let backend = MockBackend::default();
    let handle = DeviceHandle::new(backend.clone(), descriptor(), None);
    (backend, handle)
}

/// Handle opened through `connect`, with the open call already cleared from the log.
pub fn connected() -> (MockBackend, DeviceHandle<MockBackend>) {
    let (backend, mut handle) = absent();
    assert!(handle.connect());
    backend.clear_calls();
    (backend, handle)
}
