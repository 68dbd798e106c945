//! Address and readiness shared by every driver

use minios_hal::RegisterBus;

use crate::error::{DriverError, Result};

/// A peripheral's bus address plus whether `begin` succeeded on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Device {
    address: u8,
    ready: bool,
}

impl Device {
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            ready: false,
        }
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Presence probe: one address-only transaction
    ///
    /// Clears readiness first, so a failed re-`begin` leaves the driver
    /// unusable rather than trusting stale configuration.
    pub fn probe<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        self.ready = false;
        bus.probe(self.address).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::debug!("no device at {=u8:#x}: {}", self.address, e);
            if e.is_nack() {
                DriverError::NotPresent
            } else {
                DriverError::Unavailable(e)
            }
        })
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Address to talk to, if `begin` succeeded
    pub fn ready_address(&self) -> Result<u8> {
        if self.ready {
            Ok(self.address)
        } else {
            Err(DriverError::NotInitialized)
        }
    }
}
