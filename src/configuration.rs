//! Types used to set the configuration for the INA219
//!
//! [`Configuration`] combines all fields of the configuration register. Every field knows its own
//! position inside the 16 bit word, the two reserved bits between the ADC range and the reset flag
//! are always written as zero.
//!
//! | bits   | field                                 |
//! |--------|---------------------------------------|
//! | 0..3   | [`OperatingMode`]                     |
//! | 3..6   | shunt [`ConversionTime`]              |
//! | 6..9   | bus [`ConversionTime`]                |
//! | 9..12  | [`Averaging`]                         |
//! | 12     | [`AdcRange`]                          |
//! | 13..15 | reserved                              |
//! | 15     | [`Reset`]                             |
//!
//! # Example
//! The `..` completion can be used to set specific values to change. For example:
//! ```rust
//! use ina219_monitor::configuration::{Averaging, Configuration};
//! let conf = Configuration {
//!     averaging: Averaging::new(0b011).unwrap(),
//!     .. Default::default()
//! };
//! assert_eq!(conf.as_bits(), 0b0000_0110_1001_0111);
//! ```

use crate::register::{ReadRegister, Register, RegisterName, WriteRegister};

/// Bits 13 and 14 are reserved and must be zero on every write
pub const RESERVED_MASK: u16 = 0b0110_0000_0000_0000;

/// Perform a system reset or continue work as normal
///
/// If set to `Reset` all registers are set to their defaults. The flag clears itself once the reset
/// was performed.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Reset {
    /// Continue normal operation
    #[default]
    Run = 0,
    /// Perform system reset
    Reset = 1,
}

impl Reset {
    const SHIFT: u8 = 15;
    const MASK: u16 = 1;

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Run,
            _ => Self::Reset,
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self as u16) << Self::SHIFT;
        reg
    }
}

/// Range selection bit of the ADC
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcRange {
    /// Range bit cleared, used by the driver
    #[default]
    Wide = 0,
    /// Range bit set
    Narrow = 1,
}

impl AdcRange {
    const SHIFT: u8 = 12;
    const MASK: u16 = 1;

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Wide,
            _ => Self::Narrow,
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self as u16) << Self::SHIFT;
        reg
    }
}

/// Number of samples averaged per result, as the 3 bit code written to the register
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Averaging(u8);

impl Averaging {
    const SHIFT: u8 = 9;
    const MASK: u16 = 0b111;

    /// No averaging, a single sample per result
    pub const SINGLE: Self = Self(0);

    /// Create an averaging setting from its 3 bit code
    ///
    /// Returns `None` if the code does not fit into 3 bits.
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        if code as u16 <= Self::MASK {
            Some(Self(code))
        } else {
            None
        }
    }

    /// The 3 bit code of this setting
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    const fn from_register(reg: u16) -> Self {
        Self(((reg >> Self::SHIFT) & Self::MASK) as u8)
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self.0 as u16) << Self::SHIFT;
        reg
    }
}

/// ADC conversion time for the shunt or bus voltage, as the 3 bit code written to the register
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConversionTime(u8);

impl ConversionTime {
    const SHIFT_SHUNT: u8 = 3;
    const SHIFT_BUS: u8 = 6;
    const MASK: u16 = 0b111;

    /// Conversion time programmed by the driver for both channels
    pub const DEFAULT: Self = Self(0b010);

    /// Create a conversion time from its 3 bit code
    ///
    /// Returns `None` if the code does not fit into 3 bits.
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        if code as u16 <= Self::MASK {
            Some(Self(code))
        } else {
            None
        }
    }

    /// The 3 bit code of this setting
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    const fn from_register<const SHIFT: u8>(reg: u16) -> Self {
        Self(((reg >> SHIFT) & Self::MASK) as u8)
    }

    #[must_use]
    const fn apply_to_reg<const SHIFT: u8>(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << SHIFT);
        reg |= (self.0 as u16) << SHIFT;
        reg
    }

    #[must_use]
    const fn from_shunt_register(reg: u16) -> Self {
        Self::from_register::<{ Self::SHIFT_SHUNT }>(reg)
    }

    #[must_use]
    const fn apply_to_shunt_reg(self, reg: u16) -> u16 {
        self.apply_to_reg::<{ Self::SHIFT_SHUNT }>(reg)
    }

    #[must_use]
    const fn from_bus_register(reg: u16) -> Self {
        Self::from_register::<{ Self::SHIFT_BUS }>(reg)
    }

    #[must_use]
    const fn apply_to_bus_reg(self, reg: u16) -> u16 {
        self.apply_to_reg::<{ Self::SHIFT_BUS }>(reg)
    }
}

impl Default for ConversionTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which signals are measured during a conversion
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MeasuredSignals {
    /// Only the shunt voltage is measured
    ShuntVoltage = 1,
    /// Only the bus voltage is measured
    BusVoltage = 2,
    /// Both voltages are measured
    #[default]
    ShuntAndBusVoltage = 3,
}

impl MeasuredSignals {
    #[must_use]
    const fn from_bits_wrapping(bits: u16) -> Self {
        match bits & 0b11 {
            1 => Self::ShuntVoltage,
            2 => Self::BusVoltage,
            3 => Self::ShuntAndBusVoltage,
            _ => unreachable!(), // Callers only pass codes that select at least one signal
        }
    }
}

/// Operation mode of the INA219
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Reduce power usage and disable current into the input pins
    PowerDown,
    /// Stop the conversions
    AdcOff,
    /// Trigger a single conversion of the given signals
    Triggered(MeasuredSignals),
    /// Continuously measure the given signals
    Continuous(MeasuredSignals),
}

impl OperatingMode {
    const SHIFT: u8 = 0;
    const MASK: u16 = 0b111;

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::PowerDown,
            0b100 => Self::AdcOff,
            x @ 1..=3 => Self::Triggered(MeasuredSignals::from_bits_wrapping(x)),
            x => Self::Continuous(MeasuredSignals::from_bits_wrapping(x)),
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self.as_bits()) << Self::SHIFT;
        reg
    }

    /// Return the bits representing this mode
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        match self {
            OperatingMode::PowerDown => 0,
            OperatingMode::AdcOff => 0b100,
            OperatingMode::Triggered(signals) => signals as u16,
            OperatingMode::Continuous(signals) => signals as u16 | 0b100,
        }
    }
}

impl Default for OperatingMode {
    fn default() -> Self {
        OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage)
    }
}

/// Configuration register
///
/// The [`Default`] is the configuration the driver writes while initializing: continuous shunt and
/// bus conversions, conversion time code `0b010` on both channels, no averaging.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Which signals to measure and if continuous or triggered operation is set up
    pub operating_mode: OperatingMode,
    /// Conversion time of the shunt voltage
    pub shunt_conversion_time: ConversionTime,
    /// Conversion time of the bus voltage
    pub bus_conversion_time: ConversionTime,
    /// Samples averaged per result
    pub averaging: Averaging,
    /// Range bit of the ADC
    pub adc_range: AdcRange,
    /// Indicate to perform a reset or continue to run normally
    pub reset: Reset,
}

impl Configuration {
    /// Turn the bits of the register into a `Configuration`, ignoring the reserved bits
    #[must_use]
    pub const fn from_bits(reg: u16) -> Self {
        Self {
            operating_mode: OperatingMode::from_register(reg),
            shunt_conversion_time: ConversionTime::from_shunt_register(reg),
            bus_conversion_time: ConversionTime::from_bus_register(reg),
            averaging: Averaging::from_register(reg),
            adc_range: AdcRange::from_register(reg),
            reset: Reset::from_register(reg),
        }
    }

    /// Turn this `Configuration` into the bits it describes
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        let Self {
            operating_mode,
            shunt_conversion_time,
            bus_conversion_time,
            averaging,
            adc_range,
            reset,
        } = self;

        encode_configuration(
            operating_mode,
            shunt_conversion_time,
            bus_conversion_time,
            averaging,
            adc_range,
            reset,
        )
    }
}

impl Register for Configuration {
    const NAME: RegisterName = RegisterName::Configuration;
}

impl ReadRegister for Configuration {
    fn from_bits(bits: u16) -> Self {
        Configuration::from_bits(bits)
    }
}

impl WriteRegister for Configuration {
    fn as_bits(&self) -> u16 {
        Configuration::as_bits(*self)
    }
}

/// Pack the fields of the configuration register into one word
///
/// The reserved bits 13 and 14 are always zero.
///
/// ```rust
/// use ina219_monitor::configuration::*;
///
/// let bits = encode_configuration(
///     OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage),
///     ConversionTime::DEFAULT,
///     ConversionTime::DEFAULT,
///     Averaging::SINGLE,
///     AdcRange::Wide,
///     Reset::Run,
/// );
/// assert_eq!(bits, 0x0097);
/// ```
#[must_use]
pub const fn encode_configuration(
    mode: OperatingMode,
    shunt_time: ConversionTime,
    bus_time: ConversionTime,
    avg: Averaging,
    range: AdcRange,
    reset: Reset,
) -> u16 {
    let mut bits = 0;
    bits = mode.apply_to_reg(bits);
    bits = shunt_time.apply_to_shunt_reg(bits);
    bits = bus_time.apply_to_bus_reg(bits);
    bits = avg.apply_to_reg(bits);
    bits = range.apply_to_reg(bits);
    bits = reset.apply_to_reg(bits);
    bits & !RESERVED_MASK
}
