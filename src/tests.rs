use crate::address::Address;
use crate::calibration::Calibration;
use crate::config::{AlertConfig, BootstrapPolicy, Config};
use crate::configuration::Configuration;
use crate::errors::InitializationErrorReason;
use crate::measurements::{BusVoltage, ShuntVoltage};
use crate::register::RegisterName;
use crate::SyncIna219;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

const DEV_ADDR: u8 = 0x40;

/// Create the expected `Transaction` for a register read
#[allow(clippy::cast_possible_truncation)]
fn read_reg(reg: RegisterName, value: u16) -> Transaction {
    Transaction::write_read(
        DEV_ADDR,
        vec![reg as u8],
        vec![(value >> 8) as u8, (value & 0xFF) as u8],
    )
}

/// Create the expected `Transaction` for a register read that fails on the bus
fn failed_read(reg: RegisterName) -> Transaction {
    Transaction::write_read(DEV_ADDR, vec![reg as u8], vec![0, 0]).with_error(ErrorKind::Other)
}

/// Create the expected `Transaction` for a register write
#[allow(clippy::cast_possible_truncation)]
fn write_reg(reg: RegisterName, value: u16) -> Transaction {
    Transaction::write(DEV_ADDR, vec![reg as u8, (value >> 8) as u8, value as u8])
}

/// Calibration and configuration writes done first by every initialization
fn setup_transactions() -> Vec<Transaction> {
    vec![
        write_reg(RegisterName::Calibration, 10),
        write_reg(RegisterName::Configuration, 0x0097),
    ]
}

/// Reads of all six registers for the snapshot, in the order the driver performs them
fn snapshot_transactions() -> Vec<Transaction> {
    use RegisterName::{BusVoltage, Calibration, Configuration, Current, Power, ShuntVoltage};

    vec![
        read_reg(Configuration, 0x0097),
        read_reg(ShuntVoltage, 0x0032),
        read_reg(BusVoltage, 0x1000),
        read_reg(Power, 0),
        read_reg(Current, 0),
        read_reg(Calibration, 10),
    ]
}

/// Create an `INA219` that went through a clean initialization and then reacts with the given
/// transactions
fn mock(transactions: &[Transaction]) -> SyncIna219<I2cMock> {
    let mut all_transactions = setup_transactions();
    all_transactions.extend(snapshot_transactions());
    all_transactions.extend_from_slice(transactions);
    let mock = I2cMock::new(&all_transactions);

    SyncIna219::new(mock, Config::default()).unwrap()
}

fn on_alert() {}

#[test]
fn initialization() {
    let ina = mock(&[]);

    let snapshot = ina.snapshot();
    assert!(snapshot.is_complete());
    assert_eq!(snapshot.configuration, Some(Configuration::default()));
    assert_eq!(snapshot.shunt_voltage, Some(ShuntVoltage::from_bits(0x0032)));
    assert_eq!(snapshot.bus_voltage, Some(BusVoltage::from_bits(0x1000)));
    assert_eq!(snapshot.calibration, Some(Calibration::default()));
    assert_eq!(ina.address(), Address::DEFAULT);

    ina.destroy().done();
}

#[test]
fn read_voltage() {
    let mut ina = mock(&[read_reg(RegisterName::BusVoltage, 0x1000)]);

    let volts = ina.read_voltage().unwrap();
    assert_eq!(volts, 4096.0 * 0.0016);
    assert!((volts - 6.5536).abs() < 1e-5);

    ina.destroy().done();
}

#[test]
fn read_current() {
    let mut ina = mock(&[
        read_reg(RegisterName::ShuntVoltage, 0x0032),
        // The sign bit is set, this reads as no current at all
        read_reg(RegisterName::ShuntVoltage, 0x8032),
    ]);

    let amps = ina.read_current().unwrap();
    assert_eq!(amps, 50.0 / 3970.0);
    assert!((amps - 0.012_594).abs() < 1e-6);

    assert_eq!(ina.read_current().unwrap(), 0.0);

    ina.destroy().done();
}

#[test]
fn current_ignores_current_register() {
    // Only the shunt voltage register may be touched, the chip's own current register is unused
    let mut ina = mock(&[read_reg(RegisterName::ShuntVoltage, 3970)]);

    assert_eq!(ina.read_current().unwrap(), 1.0);

    ina.destroy().done();
}

#[test]
fn read_errors_are_passed_on() {
    let mut ina = mock(&[
        failed_read(RegisterName::BusVoltage),
        failed_read(RegisterName::ShuntVoltage),
    ]);

    assert_eq!(ina.read_voltage(), Err(ErrorKind::Other));
    assert_eq!(ina.read_current(), Err(ErrorKind::Other));

    ina.destroy().done();
}

#[test]
fn raw_reads() {
    let mut ina = mock(&[
        read_reg(RegisterName::Configuration, 0x0097),
        read_reg(RegisterName::Calibration, 10),
        read_reg(RegisterName::Power, 0x1234),
        read_reg(RegisterName::Current, 0xFFFF),
        read_reg(RegisterName::BusVoltage, (4_000 / 4) << 3 | 0b10),
    ]);

    assert_eq!(ina.configuration().unwrap(), Configuration::default());
    assert_eq!(ina.calibration().unwrap().value(), 10);
    assert_eq!(ina.power_raw().unwrap().0, 0x1234);
    assert_eq!(ina.current_raw().unwrap().0, 0xFFFF);

    let bus = ina.bus_voltage().unwrap();
    assert_eq!(bus.voltage_mv(), 4_000);
    assert!(bus.is_conversion_ready());
    assert!(!bus.has_math_overflowed());

    ina.destroy().done();
}

#[test]
fn missing_device_is_a_bind_error() {
    let nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);
    let mock = I2cMock::new(&[write_reg(RegisterName::Calibration, 10).with_error(nack)]);

    let Err(err) = SyncIna219::new(mock, Config::default()) else {
        panic!("Nothing acknowledged the address, creation must fail");
    };
    assert_eq!(err.reason, InitializationErrorReason::Bind(nack));

    err.into_device().done();
}

#[test]
fn other_calibration_failure_is_a_transport_error() {
    let mock = I2cMock::new(&[
        write_reg(RegisterName::Calibration, 10).with_error(ErrorKind::ArbitrationLoss)
    ]);

    let Err(err) = SyncIna219::new(mock, Config::default()) else {
        panic!("Writing the calibration failed, creation must fail");
    };
    assert_eq!(
        err.reason,
        InitializationErrorReason::I2cError(ErrorKind::ArbitrationLoss)
    );

    err.into_device().done();
}

#[test]
fn configuration_write_failure() {
    let mock = I2cMock::new(&[
        write_reg(RegisterName::Calibration, 10),
        write_reg(RegisterName::Configuration, 0x0097).with_error(ErrorKind::Bus),
    ]);

    let Err(err) = SyncIna219::new(mock, Config::default()) else {
        panic!("Writing the configuration failed, creation must fail");
    };
    assert_eq!(err.reason, InitializationErrorReason::I2cError(ErrorKind::Bus));

    err.into_device().done();
}

#[test]
fn failed_snapshot_read_is_skipped_by_default() {
    use RegisterName::{BusVoltage, Calibration, Configuration, Current, Power, ShuntVoltage};

    let mut transactions = setup_transactions();
    transactions.extend([
        read_reg(Configuration, 0x0097),
        read_reg(ShuntVoltage, 0x0032),
        read_reg(BusVoltage, 0x1000),
        failed_read(Power),
        read_reg(Current, 0),
        read_reg(Calibration, 10),
    ]);
    let mock = I2cMock::new(&transactions);

    let ina = SyncIna219::new(mock, Config::default()).unwrap();

    let snapshot = ina.snapshot();
    assert!(!snapshot.is_complete());
    assert_eq!(snapshot.power, None);
    assert_eq!(snapshot.calibration, Some(crate::calibration::Calibration::default()));

    ina.destroy().done();
}

#[test]
fn failed_snapshot_read_aborts_when_strict() {
    use RegisterName::{BusVoltage, Configuration, ShuntVoltage};

    let mut transactions = setup_transactions();
    transactions.extend([
        read_reg(Configuration, 0x0097),
        read_reg(ShuntVoltage, 0x0032),
        // No further reads after this one
        failed_read(BusVoltage),
    ]);
    let mock = I2cMock::new(&transactions);

    let config = Config {
        bootstrap: BootstrapPolicy::Strict,
        ..Config::default()
    };
    let Err(err) = SyncIna219::new(mock, config) else {
        panic!("A snapshot read failed with a strict policy, creation must fail");
    };
    assert_eq!(
        err.reason,
        InitializationErrorReason::BootstrapReadFailed {
            register: BusVoltage,
            error: ErrorKind::Other,
        }
    );

    err.into_device().done();
}

#[test]
fn alert_without_callback_is_accepted() {
    // The alert wiring is only stored, the chip is programmed as usual
    let mut transactions = setup_transactions();
    transactions.extend(snapshot_transactions());
    let mock = I2cMock::new(&transactions);

    let config = Config {
        alert: AlertConfig {
            enabled: true,
            pin: 4,
            callback: None,
        },
        ..Config::default()
    };
    let ina = SyncIna219::new(mock, config).unwrap();

    assert!(ina.alert().enabled);
    assert!(ina.alert().callback.is_none());
    assert!(ina.snapshot().is_complete());

    ina.destroy().done();
}

#[test]
fn alert_is_stored_but_unused() {
    let mut transactions = setup_transactions();
    transactions.extend(snapshot_transactions());
    let mock = I2cMock::new(&transactions);

    let config = Config {
        alert: AlertConfig {
            enabled: true,
            pin: 4,
            callback: Some(on_alert),
        },
        ..Config::default()
    };
    let ina = SyncIna219::new(mock, config).unwrap();

    assert!(ina.alert().enabled);
    assert_eq!(ina.alert().pin, 4);
    assert!(ina.alert().callback.is_some());

    ina.destroy().done();
}

#[test]
fn unchecked_does_not_touch_the_bus() {
    let address = Address::from_byte(0x45).unwrap();
    let mock = I2cMock::new(&[Transaction::write_read(
        0x45,
        vec![RegisterName::BusVoltage as u8],
        vec![0x10, 0x00],
    )]);

    let mut ina = SyncIna219::new_unchecked(mock, Config::with_address(address));
    assert_eq!(*ina.snapshot(), crate::snapshot::RegisterSnapshot::default());
    assert_eq!(ina.read_voltage().unwrap(), 4096.0 * 0.0016);

    ina.destroy().done();
}

#[cfg(feature = "async")]
#[test]
fn async_driver_reads_measurements() {
    use crate::AsyncIna219;
    use embassy_futures::block_on;

    let mut transactions = setup_transactions();
    transactions.extend(snapshot_transactions());
    transactions.extend([
        read_reg(RegisterName::BusVoltage, 0x1000),
        read_reg(RegisterName::ShuntVoltage, 0x0032),
        read_reg(RegisterName::ShuntVoltage, 0x8032),
    ]);
    let mock = I2cMock::new(&transactions);

    block_on(async {
        let mut ina = AsyncIna219::new(mock, Config::default()).await.unwrap();
        assert!(ina.snapshot().is_complete());

        assert_eq!(ina.read_voltage().await.unwrap(), 4096.0 * 0.0016);
        assert_eq!(ina.read_current().await.unwrap(), 50.0 / 3970.0);
        assert_eq!(ina.read_current().await.unwrap(), 0.0);

        ina.destroy().done();
    });
}

#[cfg(feature = "async")]
#[test]
fn async_driver_reports_bind_error() {
    use crate::AsyncIna219;
    use embassy_futures::block_on;

    let nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);
    let mock = I2cMock::new(&[write_reg(RegisterName::Calibration, 10).with_error(nack)]);

    let Err(err) = block_on(AsyncIna219::new(mock, Config::default())) else {
        panic!("Nothing acknowledged the address, creation must fail");
    };
    assert_eq!(err.reason, InitializationErrorReason::Bind(nack));

    err.into_device().done();
}
