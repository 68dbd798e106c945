//! FT3168 capacitive touch controller
//!
//! FocalTech register map: a touch-status byte whose low nibble is the
//! number of active fingers, followed by per-point coordinate registers.
//! Coordinates are 12 bits split as `XH[3:0]:XL`, `YH[3:0]:YL`; the upper
//! bits of `XH`/`YH` carry event flags and touch IDs.

use minios_core::decode::nibble12;
use minios_core::TouchPoint;
use minios_hal::RegisterBus;

use crate::device::Device;
use crate::error::Result;

/// Default I2C address
pub const DEFAULT_ADDRESS: u8 = 0x38;

/// FT3168 register addresses
pub mod reg {
    /// Number of touch points (low nibble)
    pub const TD_STATUS: u8 = 0x02;
    /// First point, X high nibble; followed by XL, YH, YL
    pub const P1_XH: u8 = 0x03;
    /// Chip identification
    pub const CHIP_ID: u8 = 0xA3;
}

/// FT3168 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ft3168 {
    dev: Device,
    panel: Option<(u16, u16)>,
}

impl Default for Ft3168 {
    fn default() -> Self {
        Self::new()
    }
}

impl Ft3168 {
    /// Create a driver at the default address
    pub const fn new() -> Self {
        Self::with_address(DEFAULT_ADDRESS)
    }

    /// Create a driver at a board-specific address
    pub const fn with_address(address: u8) -> Self {
        Self {
            dev: Device::new(address),
            panel: None,
        }
    }

    /// Clamp reported points to a panel of `width` x `height` pixels
    pub const fn with_panel(mut self, width: u16, height: u16) -> Self {
        self.panel = Some((width, height));
        self
    }

    /// Configured I2C address
    pub const fn address(&self) -> u8 {
        self.dev.address()
    }

    /// Whether `begin` succeeded
    pub const fn is_ready(&self) -> bool {
        self.dev.is_ready()
    }

    /// Probe the controller
    ///
    /// The chip ID is read for the boot log only; an unexpected or
    /// unreadable ID does not fail initialization.
    pub fn begin<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        self.dev.probe(bus)?;
        let _id = bus.read_register(self.dev.address(), reg::CHIP_ID);

        #[cfg(feature = "defmt")]
        match _id {
            Ok(id) => defmt::info!("Touch IC ID: {=u8:#x}", id),
            Err(e) => defmt::warn!("Touch IC ID unreadable: {}", e),
        }

        self.dev.mark_ready();
        Ok(())
    }

    /// Read the chip identification register
    pub fn chip_id<B: RegisterBus>(&self, bus: &mut B) -> Result<u8> {
        let addr = self.dev.ready_address()?;
        Ok(bus.read_register(addr, reg::CHIP_ID)?)
    }

    /// Number of fingers on the panel (0-15, practically 0-2)
    pub fn finger_count<B: RegisterBus>(&self, bus: &mut B) -> Result<u8> {
        let addr = self.dev.ready_address()?;
        let status = bus.read_register(addr, reg::TD_STATUS)?;
        Ok(status & 0x0F)
    }

    /// Check if at least one finger is down
    pub fn is_touched<B: RegisterBus>(&self, bus: &mut B) -> Result<bool> {
        Ok(self.finger_count(bus)? > 0)
    }

    /// Coordinates of the first touch point
    ///
    /// Returns whatever the point registers hold, even with no finger
    /// down; see [`Ft3168::touch`] for a gated read. Clamped to the panel
    /// when one was set with [`Ft3168::with_panel`].
    pub fn point<B: RegisterBus>(&self, bus: &mut B) -> Result<TouchPoint> {
        let addr = self.dev.ready_address()?;
        let [xh, xl, yh, yl] = bus.read_array::<4>(addr, reg::P1_XH)?;
        let point = TouchPoint::new(nibble12(xh, xl), nibble12(yh, yl));
        Ok(match self.panel {
            Some((width, height)) => point.clamp_to(width, height),
            None => point,
        })
    }

    /// First touch point, or `None` when the panel is not touched
    pub fn touch<B: RegisterBus>(&self, bus: &mut B) -> Result<Option<TouchPoint>> {
        if self.is_touched(bus)? {
            self.point(bus).map(Some)
        } else {
            Ok(None)
        }
    }
}
