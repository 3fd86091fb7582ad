//! Driver for the INA219 power monitor
//!
//! The driver programs the chip once with a fixed calibration and a continuous shunt and bus
//! measurement configuration, then reports the bus voltage in volts and the current through the
//! shunt in amperes.
//!
//! # Example
//! ```rust,no_run
//! # fn example<I: embedded_hal::i2c::I2c>(i2c: I) -> Result<(), I::Error> {
//! use ina219_monitor::config::Config;
//! use ina219_monitor::SyncIna219;
//!
//! let mut ina = SyncIna219::new(i2c, Config::default()).map_err(|e| e.reason).unwrap();
//! let volts = ina.read_voltage()?;
//! let amps = ina.read_current()?;
//! let i2c = ina.destroy();
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//! - **`sync`** (default): blocking driver [`SyncIna219`] on `embedded-hal`
//! - **`async`** (default): driver [`AsyncIna219`] on `embedded-hal-async`
//! - **`std`**: implement `std::error::Error` on all error types
//! - **`defmt`**: log register writes and skipped snapshot reads, derive `defmt::Format`

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod address;
pub mod calibration;
pub mod config;
pub mod configuration;
pub mod errors;
pub mod measurements;
pub mod register;
pub mod snapshot;

#[cfg(feature = "async")]
mod r#async;

/// Driver using the `embedded-hal-async` I2C traits
#[cfg(feature = "async")]
pub use r#async::INA219 as AsyncIna219;

#[cfg(feature = "sync")]
mod sync {
    // Generated by build.rs from src/async.rs
    include!(concat!(env!("OUT_DIR"), "/de-asynced.rs"));
}

/// Driver using the blocking `embedded-hal` I2C traits
#[cfg(feature = "sync")]
pub use sync::INA219 as SyncIna219;

#[cfg(all(test, feature = "sync"))]
mod tests;
