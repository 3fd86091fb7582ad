//! Readings of the measurement registers and their conversion into physical units

use crate::calibration::{BUS_VOLTAGE_SCALE, SHUNT_CURRENT_DIVISOR};
use crate::register::{ReadRegister, Register, RegisterName};

/// Convert a raw bus voltage word into volts
///
/// The scale is applied to the whole word, status flags included. The result is never negative.
///
/// ```rust
/// use ina219_monitor::measurements::decode_bus_voltage;
///
/// assert_eq!(decode_bus_voltage(0x1000), 4096.0 * 0.0016);
/// ```
#[must_use]
pub fn decode_bus_voltage(raw: u16) -> f32 {
    f32::from(raw) * BUS_VOLTAGE_SCALE
}

/// Convert a raw shunt voltage word into amperes
///
/// A word with the sign bit set reads as exactly zero amperes, negative currents are not reported.
///
/// ```rust
/// use ina219_monitor::measurements::decode_shunt_current;
///
/// assert_eq!(decode_shunt_current(0x0032), 50.0 / 3970.0);
/// assert_eq!(decode_shunt_current(0x8032), 0.0);
/// ```
#[must_use]
pub fn decode_shunt_current(raw: u16) -> f32 {
    if raw & ShuntVoltage::SIGN_BIT != 0 {
        0.0
    } else {
        f32::from(raw) / SHUNT_CURRENT_DIVISOR
    }
}

/// Contents of the shunt voltage register
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShuntVoltage(u16);

impl ShuntVoltage {
    const SIGN_BIT: u16 = 0x8000;

    /// Create a `ShuntVoltage` from the contents of the register
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The unaltered register word
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Check if the sign bit is set
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 & Self::SIGN_BIT != 0
    }

    /// The register as a two's complement value in units of 10µV
    #[must_use]
    pub const fn shunt_voltage_10uv(self) -> i16 {
        i16::from_ne_bytes(self.0.to_ne_bytes())
    }

    /// The current through the shunt in A, see [`decode_shunt_current`]
    #[must_use]
    pub fn current_amps(self) -> f32 {
        decode_shunt_current(self.0)
    }
}

impl Register for ShuntVoltage {
    const NAME: RegisterName = RegisterName::ShuntVoltage;
}

impl ReadRegister for ShuntVoltage {
    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}

/// Contents of the bus voltage register
///
/// This contains next to the measurement also some flags about the last measurement.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusVoltage(u16);

impl BusVoltage {
    const CONVERSION_READY: u16 = 0b10;
    const MATH_OVERFLOW: u16 = 0b01;

    /// Create `BusVoltage` from the contents of the register.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The unaltered register word
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Return the 13 bit magnitude in the datasheet resolution of 4mV
    #[must_use]
    pub const fn voltage_4mv(self) -> u16 {
        self.0 >> 3
    }

    /// Return the bus voltage in mV according to the datasheet resolution
    #[must_use]
    pub const fn voltage_mv(self) -> u16 {
        self.voltage_4mv() * 4
    }

    /// The bus voltage in V as reported by the driver, see [`decode_bus_voltage`]
    #[must_use]
    pub fn volts(self) -> f32 {
        decode_bus_voltage(self.0)
    }

    /// Check if the conversion ready flag is set
    #[must_use]
    pub const fn is_conversion_ready(self) -> bool {
        self.0 & Self::CONVERSION_READY != 0
    }

    /// This flag is set if the power or current calculation overflowed
    #[must_use]
    pub const fn has_math_overflowed(self) -> bool {
        self.0 & Self::MATH_OVERFLOW != 0
    }
}

impl Register for BusVoltage {
    const NAME: RegisterName = RegisterName::BusVoltage;
}

impl ReadRegister for BusVoltage {
    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}

/// Raw contents of the power register
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerRegister(pub u16);

impl Register for PowerRegister {
    const NAME: RegisterName = RegisterName::Power;
}

impl ReadRegister for PowerRegister {
    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}

/// Raw contents of the current register
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentRegister(pub u16);

impl Register for CurrentRegister {
    const NAME: RegisterName = RegisterName::Current;
}

impl ReadRegister for CurrentRegister {
    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}
