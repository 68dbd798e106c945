//! AXP2101 power-management unit
//!
//! Battery gauge, charger status and ADC channels. The ADC channels come
//! up disabled, so `begin` turns on battery, VBUS and VSYS measurement
//! once; every voltage accessor depends on that write.
//!
//! ADC results are H6L8 register pairs whose 14-bit code is already in
//! millivolts.

use minios_core::decode::h6l8;
use minios_core::ChargeState;
use minios_hal::RegisterBus;

use crate::device::Device;
use crate::error::Result;

/// Default I2C address
pub const DEFAULT_ADDRESS: u8 = 0x34;

/// ADC channel enable value: VBAT, VBUS, VSYS
pub const ADC_CHANNELS: u8 = 0x07;

/// Die temperature reference code and the temperature it maps to
///
/// Linear fit around one datasheet point, approximate and uncalibrated.
const TDIE_REF_CODE: f32 = 2825.0;
const TDIE_REF_CELSIUS: f32 = 22.0;
const TDIE_CELSIUS_PER_LSB: f32 = 0.1;

/// AXP2101 register addresses
pub mod reg {
    /// PMU status 1 (VBUS good at bit 5)
    pub const STATUS1: u8 = 0x00;
    /// PMU status 2 (battery current direction at bits 6:5)
    pub const STATUS2: u8 = 0x01;
    /// Chip identification
    pub const CHIP_ID: u8 = 0x03;
    /// ADC channel enable
    pub const ADC_ENABLE: u8 = 0x30;
    /// Battery voltage, H6L8
    pub const VBAT_H: u8 = 0x34;
    /// VBUS voltage, H6L8
    pub const VBUS_H: u8 = 0x38;
    /// System voltage, H6L8
    pub const VSYS_H: u8 = 0x3A;
    /// Die temperature, H6L8
    pub const TDIE_H: u8 = 0x3C;
    /// Fuel gauge battery percentage
    pub const BATTERY_PERCENT: u8 = 0xA4;
}

/// VBUS-good flag in [`reg::STATUS1`]
const VBUS_GOOD: u8 = 1 << 5;

/// Convert a die-temperature code to degrees Celsius
pub fn tdie_to_celsius(raw: u16) -> f32 {
    TDIE_REF_CELSIUS + (raw as f32 - TDIE_REF_CODE) * TDIE_CELSIUS_PER_LSB
}

/// AXP2101 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axp2101 {
    dev: Device,
}

impl Default for Axp2101 {
    fn default() -> Self {
        Self::new()
    }
}

impl Axp2101 {
    /// Create a driver at the default address
    pub const fn new() -> Self {
        Self::with_address(DEFAULT_ADDRESS)
    }

    /// Create a driver at a board-specific address
    pub const fn with_address(address: u8) -> Self {
        Self {
            dev: Device::new(address),
        }
    }

    /// Configured I2C address
    pub const fn address(&self) -> u8 {
        self.dev.address()
    }

    /// Whether `begin` succeeded
    pub const fn is_ready(&self) -> bool {
        self.dev.is_ready()
    }

    /// Probe the PMU and enable its voltage ADC channels
    pub fn begin<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        self.dev.probe(bus)?;
        let addr = self.dev.address();

        // Diagnostic only, does not gate initialization
        let _id = bus.read_register(addr, reg::CHIP_ID);
        #[cfg(feature = "defmt")]
        if let Ok(id) = _id {
            defmt::info!("PMU Chip ID: {=u8:#x}", id);
        }

        bus.write_register(addr, reg::ADC_ENABLE, ADC_CHANNELS)?;
        self.dev.mark_ready();
        Ok(())
    }

    /// Read the chip identification register
    pub fn chip_id<B: RegisterBus>(&self, bus: &mut B) -> Result<u8> {
        let addr = self.dev.ready_address()?;
        Ok(bus.read_register(addr, reg::CHIP_ID)?)
    }

    /// Battery voltage in millivolts
    pub fn battery_voltage<B: RegisterBus>(&self, bus: &mut B) -> Result<u16> {
        self.read_h6l8(bus, reg::VBAT_H)
    }

    /// USB input voltage in millivolts
    pub fn vbus_voltage<B: RegisterBus>(&self, bus: &mut B) -> Result<u16> {
        self.read_h6l8(bus, reg::VBUS_H)
    }

    /// System rail voltage in millivolts
    pub fn system_voltage<B: RegisterBus>(&self, bus: &mut B) -> Result<u16> {
        self.read_h6l8(bus, reg::VSYS_H)
    }

    /// Fuel-gauge state of charge, 0-100
    pub fn battery_percent<B: RegisterBus>(&self, bus: &mut B) -> Result<u8> {
        let addr = self.dev.ready_address()?;
        Ok(bus.read_register(addr, reg::BATTERY_PERCENT)? & 0x7F)
    }

    /// Battery current direction
    pub fn charge_state<B: RegisterBus>(&self, bus: &mut B) -> Result<ChargeState> {
        let addr = self.dev.ready_address()?;
        let status = bus.read_register(addr, reg::STATUS2)?;
        Ok(ChargeState::from_status(status))
    }

    /// Check if the battery is charging
    ///
    /// Only the `01` charge code counts; standby and discharge are false.
    pub fn is_charging<B: RegisterBus>(&self, bus: &mut B) -> Result<bool> {
        Ok(self.charge_state(bus)?.is_charging())
    }

    /// Check if USB power is present
    pub fn is_vbus_present<B: RegisterBus>(&self, bus: &mut B) -> Result<bool> {
        let addr = self.dev.ready_address()?;
        let status = bus.read_register(addr, reg::STATUS1)?;
        Ok(status & VBUS_GOOD != 0)
    }

    /// Die temperature in degrees Celsius (approximate)
    pub fn temperature<B: RegisterBus>(&self, bus: &mut B) -> Result<f32> {
        Ok(tdie_to_celsius(self.read_h6l8(bus, reg::TDIE_H)?))
    }

    fn read_h6l8<B: RegisterBus>(&self, bus: &mut B, high_reg: u8) -> Result<u16> {
        let addr = self.dev.ready_address()?;
        let [high, low] = bus.read_array::<2>(addr, high_reg)?;
        Ok(h6l8(high, low))
    }
}
