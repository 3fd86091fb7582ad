//! Register contents captured once while the driver is created

use crate::calibration::Calibration;
use crate::configuration::Configuration;
use crate::measurements::{BusVoltage, CurrentRegister, PowerRegister, ShuntVoltage};

/// The value of every register right after initialization
///
/// This is taken once and never refreshed, other parties on the bus may change the chip afterwards.
/// A register is `None` if reading it failed and the driver was told to carry on, see
/// [`BootstrapPolicy::LogAndContinue`](crate::config::BootstrapPolicy::LogAndContinue).
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterSnapshot {
    pub configuration: Option<Configuration>,
    pub shunt_voltage: Option<ShuntVoltage>,
    pub bus_voltage: Option<BusVoltage>,
    pub power: Option<PowerRegister>,
    pub current: Option<CurrentRegister>,
    pub calibration: Option<Calibration>,
}

impl RegisterSnapshot {
    /// Check that every register made it into the snapshot
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.configuration.is_some()
            && self.shunt_voltage.is_some()
            && self.bus_voltage.is_some()
            && self.power.is_some()
            && self.current.is_some()
            && self.calibration.is_some()
    }
}
