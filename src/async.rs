use crate::address::Address;
use crate::calibration::Calibration;
use crate::config::{AlertConfig, BootstrapPolicy, Config};
use crate::configuration::Configuration;
use crate::errors::{InitializationError, InitializationErrorReason};
use crate::measurements::{
    decode_bus_voltage, decode_shunt_current, BusVoltage, CurrentRegister, PowerRegister,
    ShuntVoltage,
};
use crate::register::{ReadRegister, WriteRegister};
use crate::snapshot::RegisterSnapshot;
use embedded_hal_async::i2c::{ErrorKind, I2c, NoAcknowledgeSource};

/// Embedded HAL compatible driver for the INA219
///
/// The driver owns the I2C device for its whole life, [`Self::destroy`] hands it back.
pub struct INA219<I2C> {
    i2c: I2C,
    address: Address,
    alert: AlertConfig,
    snapshot: RegisterSnapshot,
}

impl<I2C> INA219<I2C>
where
    I2C: I2c,
{
    /// Open an INA219 and bring it into the state the driver expects
    ///
    /// In this order the driver
    /// - writes [`Calibration::default()`] to the calibration register,
    /// - writes [`Configuration::default()`] to the configuration register,
    /// - reads all six registers once into the [`RegisterSnapshot`], handling failed reads as
    ///   given by [`Config::bootstrap`].
    ///
    /// # Errors
    /// If the chip does not acknowledge its address or a transfer fails, an [`InitializationError`] is returned that contains the I2C device again.
    pub async fn new(
        i2c: I2C,
        config: Config,
    ) -> Result<Self, InitializationError<I2C, I2C::Error>> {
        let mut new = Self::new_unchecked(i2c, config);

        match new.init(config.bootstrap).await {
            Ok(()) => Ok(new),
            Err(e) => Err(InitializationError::new(e, new.destroy())),
        }
    }

    async fn init(
        &mut self,
        policy: BootstrapPolicy,
    ) -> Result<(), InitializationErrorReason<I2C::Error>> {
        // The first transfer tells whether anything answers on our address at all
        self.write(Calibration::default())
            .await
            .map_err(bind_error)?;
        self.write(Configuration::default()).await?;

        let configuration = self.bootstrap_read(policy).await?;
        let shunt_voltage = self.bootstrap_read(policy).await?;
        let bus_voltage = self.bootstrap_read(policy).await?;
        let power = self.bootstrap_read(policy).await?;
        let current = self.bootstrap_read(policy).await?;
        let calibration = self.bootstrap_read(policy).await?;

        self.snapshot = RegisterSnapshot {
            configuration,
            shunt_voltage,
            bus_voltage,
            power,
            current,
            calibration,
        };

        Ok(())
    }

    async fn bootstrap_read<Reg: ReadRegister>(
        &mut self,
        policy: BootstrapPolicy,
    ) -> Result<Option<Reg>, InitializationErrorReason<I2C::Error>> {
        match self.read::<Reg>().await {
            Ok(reg) => Ok(Some(reg)),
            Err(error) => match policy {
                BootstrapPolicy::Strict => Err(InitializationErrorReason::BootstrapReadFailed {
                    register: Reg::NAME,
                    error,
                }),
                BootstrapPolicy::LogAndContinue => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Reading {} for the snapshot failed, skipping it", Reg::NAME);
                    Ok(None)
                }
            },
        }
    }

    /// Create a new `INA219` assuming the device is already initialized.
    ///
    /// No transfer happens and the snapshot stays empty.
    pub fn new_unchecked(i2c: I2C, config: Config) -> Self {
        INA219 {
            i2c,
            address: config.address,
            alert: config.alert,
            snapshot: RegisterSnapshot::default(),
        }
    }

    /// Destroy the driver returning the underlying I2C device
    ///
    /// This does leave the device in it's current state.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Address the driver talks to
    pub const fn address(&self) -> Address {
        self.address
    }

    /// ALERT pin wiring passed in at creation
    pub const fn alert(&self) -> &AlertConfig {
        &self.alert
    }

    /// Register contents read during initialization
    pub const fn snapshot(&self) -> &RegisterSnapshot {
        &self.snapshot
    }

    /// Read the bus voltage in V
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn read_voltage(&mut self) -> Result<f32, I2C::Error> {
        let reg: BusVoltage = self.read().await?;
        Ok(decode_bus_voltage(reg.bits()))
    }

    /// Read the current in A
    ///
    /// The current is derived from the shunt voltage register, a negative shunt voltage reads as 0A.
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn read_current(&mut self) -> Result<f32, I2C::Error> {
        let reg: ShuntVoltage = self.read().await?;
        Ok(decode_shunt_current(reg.bits()))
    }

    /// Read the bus voltage register including its flags
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn bus_voltage(&mut self) -> Result<BusVoltage, I2C::Error> {
        self.read().await
    }

    /// Read the shunt voltage register
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn shunt_voltage(&mut self) -> Result<ShuntVoltage, I2C::Error> {
        self.read().await
    }

    /// Read the current [`Configuration`] from the chip
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn configuration(&mut self) -> Result<Configuration, I2C::Error> {
        self.read().await
    }

    /// Read the [`Calibration`] the chip currently holds
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn calibration(&mut self) -> Result<Calibration, I2C::Error> {
        self.read().await
    }

    /// Read the power register without any scaling
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn power_raw(&mut self) -> Result<PowerRegister, I2C::Error> {
        self.read().await
    }

    /// Read the current register without any scaling
    ///
    /// # Errors
    /// Returns an error if the underlying I2C device returns an error.
    pub async fn current_raw(&mut self) -> Result<CurrentRegister, I2C::Error> {
        self.read().await
    }

    async fn read<Reg: ReadRegister>(&mut self) -> Result<Reg, I2C::Error> {
        let mut buf: [u8; 2] = [0x00; 2];
        self.i2c
            .write_read(self.address.as_byte(), &[Reg::ADDRESS], &mut buf)
            .await?;
        Ok(Reg::from_bits(u16::from_be_bytes(buf)))
    }

    /// Write the value contained in the register to the address dictated by its type
    async fn write<Reg: WriteRegister>(&mut self, value: Reg) -> Result<(), I2C::Error> {
        let bits = value.as_bits();
        #[cfg(feature = "defmt")]
        defmt::debug!("Writing {=u16:#x} to {}", bits, Reg::NAME);

        let [val0, val1] = bits.to_be_bytes();
        self.i2c
            .write(self.address.as_byte(), &[Reg::ADDRESS, val0, val1])
            .await
    }
}

/// A missing acknowledge on the very first transfer means no chip listens on the address
fn bind_error<E: embedded_hal_async::i2c::Error>(err: E) -> InitializationErrorReason<E> {
    match err.kind() {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address | NoAcknowledgeSource::Unknown) => {
            InitializationErrorReason::Bind(err)
        }
        _ => InitializationErrorReason::I2cError(err),
    }
}
