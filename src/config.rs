//! Settings accepted when a driver is created

use crate::address::Address;

/// What to do when one of the reads filling the [`RegisterSnapshot`](crate::snapshot::RegisterSnapshot)
/// fails during initialization
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootstrapPolicy {
    /// Log the failure, leave the register out of the snapshot and keep going
    #[default]
    LogAndContinue,
    /// Abort the initialization on the first failed read
    Strict,
}

/// Wiring of the ALERT pin
///
/// The driver stores this but never configures the chip's alert function nor calls the callback.
#[derive(Debug, Default, Copy, Clone)]
pub struct AlertConfig {
    /// Whether the alert is used at all
    pub enabled: bool,
    /// GPIO the ALERT pin is connected to
    pub pin: u8,
    /// Called when the alert fires
    pub callback: Option<fn()>,
}

/// Configuration of a driver instance
///
/// ```rust
/// use ina219_monitor::address::Address;
/// use ina219_monitor::config::{BootstrapPolicy, Config};
///
/// let config = Config {
///     bootstrap: BootstrapPolicy::Strict,
///     ..Default::default()
/// };
/// assert_eq!(config.address, Address::from_byte(0x40).unwrap());
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Config {
    /// Address of the chip on the bus
    pub address: Address,
    /// ALERT pin wiring
    pub alert: AlertConfig,
    /// Handling of failed reads while taking the initial snapshot
    pub bootstrap: BootstrapPolicy,
}

impl Config {
    /// Configuration for a chip at the given address, everything else default
    #[must_use]
    pub fn with_address(address: Address) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }
}
