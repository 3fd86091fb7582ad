//! Errors that can be returned by the different functions

use crate::register::RegisterName;
use core::fmt::{Debug, Display, Formatter};

/// The driver could not be created
///
/// Contains the I2C device that was passed to the driver, so it can be reused.
pub struct InitializationError<I2C, E> {
    /// Why the initialization failed
    pub reason: InitializationErrorReason<E>,
    /// The I2C device handed to the driver
    pub device: I2C,
}

impl<I2C, E> InitializationError<I2C, E> {
    pub(crate) const fn new(reason: InitializationErrorReason<E>, device: I2C) -> Self {
        Self { reason, device }
    }

    /// Drop the reason and get the I2C device back
    pub fn into_device(self) -> I2C {
        self.device
    }
}

impl<I2C, E: Debug> Debug for InitializationError<I2C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InitializationError")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

impl<I2C, E: Debug> Display for InitializationError<I2C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.reason, f)
    }
}

#[cfg(feature = "std")]
impl<I2C, E> std::error::Error for InitializationError<I2C, E>
where
    E: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Error conditions that can appear during initialization
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitializationErrorReason<E> {
    /// No device acknowledged the address
    Bind(E),
    /// Writing the calibration or configuration failed
    I2cError(E),
    /// Reading a register for the initial snapshot failed
    ///
    /// Only returned with [`BootstrapPolicy::Strict`](crate::config::BootstrapPolicy::Strict).
    BootstrapReadFailed {
        /// The register that could not be read
        register: RegisterName,
        /// Error of the underlying I2C read
        error: E,
    },
}

impl<E> From<E> for InitializationErrorReason<E> {
    fn from(value: E) -> Self {
        Self::I2cError(value)
    }
}

impl<E: Debug> Display for InitializationErrorReason<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bind(err) => write!(f, "No device acknowledged the address: {err:?}"),
            Self::I2cError(err) => write!(f, "I2C error: {err:?}"),
            Self::BootstrapReadFailed { register, error } => {
                write!(f, "Reading register {register:?} failed: {error:?}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for InitializationErrorReason<E>
where
    E: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind(err) | Self::I2cError(err) | Self::BootstrapReadFailed { error: err, .. } => {
                Some(err)
            }
        }
    }
}
