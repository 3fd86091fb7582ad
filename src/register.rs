#![allow(clippy::module_name_repetitions)]

/// Addresses of the internal registers of the INA219
///
/// The addresses are fixed by the datasheet. Every register holds a 16 bit word that is transferred
/// high byte first.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterName {
    /// Configuration register, see [`Configuration`](crate::configuration::Configuration)
    Configuration = 0x00,
    /// Shunt voltage register, see [`ShuntVoltage`](crate::measurements::ShuntVoltage)
    ShuntVoltage = 0x01,
    /// Bus voltage register, see [`BusVoltage`](crate::measurements::BusVoltage)
    BusVoltage = 0x02,
    /// Power register, see [`PowerRegister`](crate::measurements::PowerRegister)
    Power = 0x03,
    /// Current register, see [`CurrentRegister`](crate::measurements::CurrentRegister)
    Current = 0x04,
    /// Calibration register, see [`Calibration`](crate::calibration::Calibration)
    Calibration = 0x05,
}

impl RegisterName {
    /// All registers in the order they are read for the bootstrap snapshot
    pub const ALL: [Self; 6] = [
        Self::Configuration,
        Self::ShuntVoltage,
        Self::BusVoltage,
        Self::Power,
        Self::Current,
        Self::Calibration,
    ];

    /// The command byte selecting this register
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }
}

pub trait Register {
    const NAME: RegisterName;
    const ADDRESS: u8 = Self::NAME.address();
}

pub trait ReadRegister: Register {
    fn from_bits(bits: u16) -> Self;
}

pub trait WriteRegister: Register {
    fn as_bits(&self) -> u16;
}
