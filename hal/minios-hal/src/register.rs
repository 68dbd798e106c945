//! Addressed register access
//!
//! Every peripheral on the bus exposes its state as 8-bit registers
//! behind a register pointer. [`RegisterBus`] turns the raw I2C master
//! operations into the handful of register transactions drivers need.
//!
//! Each method is exactly one bus transaction, so no access ever spans
//! two calls and nothing is left half-framed if a caller bails out early.

use crate::i2c::{BusError, I2cBus};

/// Register-level bus access
///
/// Blanket-implemented for every [`I2cBus`] whose error converts into
/// [`BusError`]. Drivers take `&mut B where B: RegisterBus` per call and
/// never store the bus.
pub trait RegisterBus {
    /// Address the device and stop, returning whether it acknowledged
    fn probe(&mut self, address: u8) -> Result<(), BusError>;

    /// Read one register
    fn read_register(&mut self, address: u8, reg: u8) -> Result<u8, BusError>;

    /// Read consecutive registers starting at `reg` into `buf`
    ///
    /// Relies on the device auto-incrementing its register pointer.
    fn read_registers(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError>;

    /// Write one register
    fn write_register(&mut self, address: u8, reg: u8, value: u8) -> Result<(), BusError>;

    /// Read `N` consecutive registers into an array
    fn read_array<const N: usize>(&mut self, address: u8, reg: u8) -> Result<[u8; N], BusError> {
        let mut buf = [0u8; N];
        self.read_registers(address, reg, &mut buf)?;
        Ok(buf)
    }

    /// Read a register, transform it, and write the result back
    ///
    /// Two transactions, not atomic: another writer between the read and
    /// the write is lost. Callers that share the bus across contexts must
    /// serialise at the bus handle (see [`crate::SharedBus`]).
    ///
    /// Returns the value written.
    fn modify_register<F>(&mut self, address: u8, reg: u8, f: F) -> Result<u8, BusError>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.read_register(address, reg)?;
        let updated = f(current);
        self.write_register(address, reg, updated)?;
        Ok(updated)
    }
}

impl<T> RegisterBus for T
where
    T: I2cBus,
    T::Error: Into<BusError>,
{
    fn probe(&mut self, address: u8) -> Result<(), BusError> {
        self.write(address, &[]).map_err(Into::into)
    }

    fn read_register(&mut self, address: u8, reg: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[reg], &mut buf)
            .map_err(Into::into)?;
        Ok(buf[0])
    }

    fn read_registers(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.write_read(address, &[reg], buf).map_err(Into::into)
    }

    fn write_register(&mut self, address: u8, reg: u8, value: u8) -> Result<(), BusError> {
        self.write(address, &[reg, value]).map_err(Into::into)
    }
}
