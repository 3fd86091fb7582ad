use ina219_monitor::address::Address;
use ina219_monitor::config::{BootstrapPolicy, Config};
use ina219_monitor::SyncIna219;
use linux_embedded_hal::I2cdev;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let device = I2cdev::new("/dev/i2c-1")?;
    let config = Config {
        address: Address::from_byte(0x40)?,
        bootstrap: BootstrapPolicy::Strict,
        ..Config::default()
    };
    let mut ina = SyncIna219::new(device, config).map_err(|e| e.reason)?;

    println!("Snapshot: {:?}", ina.snapshot());

    loop {
        println!("Bus Voltage: {:.3} V", ina.read_voltage()?);
        println!("Current: {:.4} A", ina.read_current()?);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
