//! The calibration register and the scaling constants tied to it
//!
//! The driver programs the calibration register exactly once with [`DEFAULT_CALIBRATION`]. The two
//! scaling constants used to turn raw readings into volts and amperes were derived for that value,
//! if the calibration ever becomes configurable they have to be recomputed from it.

use crate::register::{ReadRegister, Register, RegisterName, WriteRegister};

/// Value written to the calibration register during initialization
pub const DEFAULT_CALIBRATION: u16 = 10;

/// Volts per unit of the raw bus voltage word
///
/// This folds the 3 bit shift of the status flags and the LSB size into one factor that is applied
/// to the unshifted register word.
pub const BUS_VOLTAGE_SCALE: f32 = 0.0016;

/// Raw shunt voltage units per ampere with [`DEFAULT_CALIBRATION`] programmed
pub const SHUNT_CURRENT_DIVISOR: f32 = 3970.0;

/// Calibration register
///
/// Holds a 15 bit shunt calibration value, the top bit is reserved and always zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration(u16);

impl Calibration {
    const MASK: u16 = 0x7FFF;

    /// Create a calibration from its value
    ///
    /// Returns `None` if the value does not fit into 15 bits.
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        if value & !Self::MASK == 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The 15 bit calibration value
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self(DEFAULT_CALIBRATION)
    }
}

impl Register for Calibration {
    const NAME: RegisterName = RegisterName::Calibration;
}

impl ReadRegister for Calibration {
    fn from_bits(bits: u16) -> Self {
        Self(bits & Self::MASK)
    }
}

impl WriteRegister for Calibration {
    fn as_bits(&self) -> u16 {
        encode_calibration(self.0)
    }
}

/// Turn a calibration value into the register word
///
/// The 15 bit value passes through unchanged, the reserved top bit is cleared.
#[must_use]
pub const fn encode_calibration(value: u16) -> u16 {
    value & Calibration::MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_register() {
        let bits = Calibration::default().as_bits();
        assert_eq!(bits, 10);
        assert_eq!(Calibration::from_bits(bits).value(), 10);
    }

    #[test]
    fn encode_is_identity_on_fifteen_bits() {
        for value in [0, 1, 10, 0x1234, 0x7FFF] {
            assert_eq!(encode_calibration(value), value);
        }
        assert_eq!(encode_calibration(0x800A), 10);
    }

    #[test]
    fn reserved_bit_is_rejected() {
        assert!(Calibration::new(0x8000).is_none());
        assert_eq!(Calibration::new(0x7FFF).map(Calibration::value), Some(0x7FFF));
    }
}
