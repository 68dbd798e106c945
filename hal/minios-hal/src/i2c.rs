//! I2C bus abstractions
//!
//! Provides the raw I2C master trait drivers are ultimately written
//! against, the error taxonomy every transaction failure is folded into,
//! and an adapter for any `embedded-hal` 1.0 I2C master.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Device did not acknowledge its address or a data byte
    Nack,
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// Overrun
    Overrun,
    /// Timeout
    Timeout,
    /// Other error
    Other,
}

impl BusError {
    /// Check if the error means nothing answered at the address
    pub const fn is_nack(self) -> bool {
        matches!(self, BusError::Nack)
    }
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            BusError::Nack => "no acknowledge",
            BusError::Bus => "bus error",
            BusError::ArbitrationLost => "arbitration lost",
            BusError::Overrun => "overrun",
            BusError::Timeout => "timeout",
            BusError::Other => "i2c error",
        };
        f.write_str(msg)
    }
}

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Every call is one complete transaction: the bus is
/// idle again when it returns.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// An empty `data` slice addresses the device and stops, which is how
    /// presence is probed.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }
}

/// Adapter from an `embedded-hal` 1.0 I2C master to [`I2cBus`]
///
/// The board support layer constructs its chip HAL's I2C peripheral
/// (speed and pins already configured) and wraps it once at boot.
pub struct EmbeddedHalBus<I> {
    i2c: I,
}

impl<I: I2c> EmbeddedHalBus<I> {
    /// Wrap an initialized I2C master
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the underlying I2C master
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for EmbeddedHalBus<I> {
    type Error = BusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.i2c
            .write(address, data)
            .map_err(|e| BusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .read(address, buf)
            .map_err(|e| BusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), BusError> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| BusError::from(e.kind()))
    }
}
