//! List HID devices, or open one described by a TOML config and dump its metadata.
//!
//! ```text
//! cargo run --example diagnose
//! cargo run --example diagnose -- device.toml
//! RUST_LOG=hidhandle=debug cargo run --example diagnose -- device.toml
//! ```

use hidapi::HidApi;
use hidhandle::backends::hid::HidApiBackend;
use hidhandle::{DeviceDescriptor, DeviceHandle, HandleConfig};
use tracing_subscriber::EnvFilter;

fn main() -> hidhandle::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api = HidApi::new()?;

    let Some(config_path) = std::env::args().nth(1) else {
        for info in api.device_list() {
            println!(
                "{} up=0x{:02x} u=0x{:02x} iface={} prod={:?} ser={:?}",
                DeviceDescriptor::from(info),
                info.usage_page(),
                info.usage(),
                info.interface_number(),
                info.product_string(),
                info.serial_number(),
            );
        }
        return Ok(());
    };

    let config = HandleConfig::load(config_path)?;
    let mut dev = DeviceHandle::from_config(HidApiBackend::new(&api), &config);
    if !dev.connect_configured() {
        eprintln!("could not open {}", dev.descriptor());
        std::process::exit(1);
    }

    println!("{dev}");
    match dev.metadata().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("metadata: {e}"),
    }

    let mut buf = [0u8; 64];
    let n = dev.read_default(&mut buf);
    if n > 0 {
        println!("report ({n} bytes): {:02x?}", &buf[..n as usize]);
    } else {
        println!("no report within {} ms ({n})", dev.read_timeout_ms());
    }

    dev.disconnect();
    Ok(())
}
