//! I2C address of the INA219 on the bus
//!
//! The chip answers on one of 16 addresses in `0x40..=0x4F`, selected by strapping the pins A0 and
//! A1 to GND, VS, SDA or SCL. The driver binds to `0x40` (both pins on GND) unless told otherwise.

use core::fmt::Formatter;
use core::ops::RangeInclusive;

/// Signal an address pin is strapped to
///
/// The discriminant is the 2 bit value the pin contributes to the address.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pin {
    /// The pin is connected to GND
    Gnd = 0,
    /// The pin is connected to VS
    Vs = 1,
    /// The pin is connected to SDA
    Sda = 2,
    /// The pin is connected to SCL
    Scl = 3,
}

impl Pin {
    const fn from_lowest_bits(byte: u8) -> Self {
        match byte & 0b11 {
            0 => Self::Gnd,
            1 => Self::Vs,
            2 => Self::Sda,
            _ => Self::Scl,
        }
    }
}

/// Validated 7 bit I2C address of an INA219
///
/// ```rust
/// use ina219_monitor::address::{Address, Pin};
///
/// assert_eq!(Address::default().as_byte(), 0x40);
/// assert_eq!(Address::from_pins(Pin::Sda, Pin::Scl).as_byte(), 0x4E);
/// assert!(Address::from_byte(0x20).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address {
    byte: u8,
}

impl Address {
    const VALID: RangeInclusive<u8> = 0x40..=0x4F;
    const MIN: u8 = *Self::VALID.start();
    const MAX: u8 = *Self::VALID.end();

    /// Address the chip answers on when A0 and A1 are both tied to GND
    pub const DEFAULT: Self = Self { byte: Self::MIN };

    /// Build the address from the straps of A0 and A1
    #[must_use]
    pub const fn from_pins(a0: Pin, a1: Pin) -> Self {
        Self {
            byte: Self::MIN | a0 as u8 | (a1 as u8) << 2,
        }
    }

    /// Validate a raw 7 bit address
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if no strapping of an INA219 produces this address.
    pub const fn from_byte(byte: u8) -> Result<Self, OutOfRange> {
        match byte {
            Self::MIN..=Self::MAX => Ok(Self { byte }),
            which => Err(OutOfRange { which }),
        }
    }

    /// The address as sent on the bus
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.byte
    }

    /// The straps of A0 and A1 that select this address
    #[must_use]
    pub const fn as_pins(self) -> (Pin, Pin) {
        (
            Pin::from_lowest_bits(self.byte),
            Pin::from_lowest_bits(self.byte >> 2),
        )
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Address {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Address::from_byte(value)
    }
}

/// The given byte is not an address an INA219 can be strapped to
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange {
    which: u8,
}

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "address {:#04x} is outside of {:#04x}..={:#04x}",
            self.which,
            Address::MIN,
            Address::MAX,
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}
