//! Mutex boundary for a bus reached from more than one context
//!
//! Drivers never lock anything themselves. When the bus handle has to be
//! reachable from several places (say, a UI task and a housekeeping
//! task), it lives inside an `embassy-sync` blocking mutex and each
//! context gets a [`SharedBus`] handle that holds the lock for exactly one
//! transaction.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::i2c::I2cBus;

/// Per-transaction locking handle onto a mutex-guarded bus
pub struct SharedBus<'a, M: RawMutex, B> {
    bus: &'a Mutex<M, RefCell<B>>,
}

impl<'a, M: RawMutex, B> SharedBus<'a, M, B> {
    /// Create a handle onto the guarded bus
    pub fn new(bus: &'a Mutex<M, RefCell<B>>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, B> Clone for SharedBus<'_, M, B> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<M: RawMutex, B: I2cBus> I2cBus for SharedBus<'_, M, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.lock(|bus| bus.borrow_mut().write(address, data))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.lock(|bus| bus.borrow_mut().read(address, buf))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus
            .lock(|bus| bus.borrow_mut().write_read(address, write_data, read_buf))
    }
}
