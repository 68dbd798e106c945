//! QMI8658 6-axis inertial measurement unit
//!
//! Accelerometer and gyroscope samples are little-endian signed 16-bit
//! words, X/Y/Z in consecutive registers. Each range enum carries both
//! the register bits `begin` programs and the full-scale value accessors
//! scale by, so the two cannot drift apart.
//!
//! `begin` configures range and rate before enabling the sensors;
//! enabling first would start sampling at the reset-default scale.

use embedded_hal::delay::DelayNs;
use minios_core::decode::{le_i16, le_i16_xyz};
use minios_core::Vector3;
use minios_hal::RegisterBus;

use crate::device::Device;
use crate::error::{DriverError, Result};

/// Default I2C address (SA0 high)
pub const DEFAULT_ADDRESS: u8 = 0x6B;

/// Expected `WHO_AM_I` value
pub const WHO_AM_I_VALUE: u8 = 0x05;

/// Soft-reset command
pub const RESET_COMMAND: u8 = 0xB0;

/// Wait after soft reset before configuring
pub const RESET_SETTLE_MS: u32 = 10;

/// Output data rate code written alongside each range
pub const ODR_CODE: u8 = 0x02;

/// Enable accelerometer and gyroscope
pub const ENABLE_ACCEL_GYRO: u8 = 0x03;

/// Temperature LSBs per degree Celsius
const TEMPERATURE_LSB_PER_C: f32 = 256.0;

/// QMI8658 register addresses
pub mod reg {
    /// Device identifier
    pub const WHO_AM_I: u8 = 0x00;
    /// Accelerometer range and output data rate
    pub const CTRL2: u8 = 0x03;
    /// Gyroscope range and output data rate
    pub const CTRL3: u8 = 0x04;
    /// Sensor enable
    pub const CTRL7: u8 = 0x08;
    /// Temperature, little-endian
    pub const TEMP_L: u8 = 0x33;
    /// Accelerometer X low byte; Y and Z follow
    pub const AX_L: u8 = 0x35;
    /// Gyroscope X low byte; Y and Z follow
    pub const GX_L: u8 = 0x3B;
    /// Soft reset
    pub const RESET: u8 = 0x60;
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl AccelRange {
    /// Range field for CTRL2 bits 6:4
    pub const fn bits(self) -> u8 {
        let code = match self {
            AccelRange::G2 => 0b000,
            AccelRange::G4 => 0b001,
            AccelRange::G8 => 0b010,
            AccelRange::G16 => 0b011,
        };
        code << 4
    }

    /// Full-scale value in g
    pub const fn full_scale(self) -> f32 {
        match self {
            AccelRange::G2 => 2.0,
            AccelRange::G4 => 4.0,
            AccelRange::G8 => 8.0,
            AccelRange::G16 => 16.0,
        }
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±16 deg/s
    Dps16,
    /// ±32 deg/s
    Dps32,
    /// ±64 deg/s
    Dps64,
    /// ±128 deg/s
    Dps128,
    /// ±256 deg/s
    Dps256,
    /// ±512 deg/s
    Dps512,
    /// ±1024 deg/s
    Dps1024,
    /// ±2048 deg/s
    Dps2048,
}

impl GyroRange {
    /// Range field for CTRL3 bits 6:4
    pub const fn bits(self) -> u8 {
        let code = match self {
            GyroRange::Dps16 => 0b000,
            GyroRange::Dps32 => 0b001,
            GyroRange::Dps64 => 0b010,
            GyroRange::Dps128 => 0b011,
            GyroRange::Dps256 => 0b100,
            GyroRange::Dps512 => 0b101,
            GyroRange::Dps1024 => 0b110,
            GyroRange::Dps2048 => 0b111,
        };
        code << 4
    }

    /// Full-scale value in degrees per second
    pub const fn full_scale(self) -> f32 {
        match self {
            GyroRange::Dps16 => 16.0,
            GyroRange::Dps32 => 32.0,
            GyroRange::Dps64 => 64.0,
            GyroRange::Dps128 => 128.0,
            GyroRange::Dps256 => 256.0,
            GyroRange::Dps512 => 512.0,
            GyroRange::Dps1024 => 1024.0,
            GyroRange::Dps2048 => 2048.0,
        }
    }
}

/// Accelerometer range programmed by `begin`
pub const ACCEL_RANGE: AccelRange = AccelRange::G8;

/// Gyroscope range programmed by `begin`
pub const GYRO_RANGE: GyroRange = GyroRange::Dps512;

/// QMI8658 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qmi8658 {
    dev: Device,
}

impl Default for Qmi8658 {
    fn default() -> Self {
        Self::new()
    }
}

impl Qmi8658 {
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

    /// Probe, verify identity, reset and configure the IMU
    ///
    /// Another chip answering at this address fails with
    /// [`DriverError::IdentityMismatch`] before anything is written.
    /// Blocks for [`RESET_SETTLE_MS`] after the soft reset.
    pub fn begin<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<()>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        self.dev.probe(bus)?;
        let addr = self.dev.address();

        let id = bus.read_register(addr, reg::WHO_AM_I)?;
        #[cfg(feature = "defmt")]
        defmt::info!("IMU WHO_AM_I: {=u8:#x}", id);
        if id != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("unexpected IMU identity at {=u8:#x}", addr);
            return Err(DriverError::IdentityMismatch {
                expected: WHO_AM_I_VALUE,
                found: id,
            });
        }

        bus.write_register(addr, reg::RESET, RESET_COMMAND)?;
        delay.delay_ms(RESET_SETTLE_MS);

        bus.write_register(addr, reg::CTRL2, ACCEL_RANGE.bits() | ODR_CODE)?;
        bus.write_register(addr, reg::CTRL3, GYRO_RANGE.bits() | ODR_CODE)?;
        bus.write_register(addr, reg::CTRL7, ENABLE_ACCEL_GYRO)?;

        self.dev.mark_ready();
        Ok(())
    }

    /// Acceleration in g
    pub fn accel<B: RegisterBus>(&self, bus: &mut B) -> Result<Vector3> {
        let raw = self.read_xyz(bus, reg::AX_L)?;
        Ok(Vector3::from_raw(raw, ACCEL_RANGE.full_scale()))
    }

    /// Angular rate in degrees per second
    pub fn gyro<B: RegisterBus>(&self, bus: &mut B) -> Result<Vector3> {
        let raw = self.read_xyz(bus, reg::GX_L)?;
        Ok(Vector3::from_raw(raw, GYRO_RANGE.full_scale()))
    }

    /// Raw accelerometer words, unscaled
    pub fn accel_raw<B: RegisterBus>(&self, bus: &mut B) -> Result<[i16; 3]> {
        self.read_xyz(bus, reg::AX_L)
    }

    /// Raw gyroscope words, unscaled
    pub fn gyro_raw<B: RegisterBus>(&self, bus: &mut B) -> Result<[i16; 3]> {
        self.read_xyz(bus, reg::GX_L)
    }

    /// Sensor temperature in degrees Celsius
    pub fn temperature<B: RegisterBus>(&self, bus: &mut B) -> Result<f32> {
        let addr = self.dev.ready_address()?;
        let [low, high] = bus.read_array::<2>(addr, reg::TEMP_L)?;
        Ok(le_i16(low, high) as f32 / TEMPERATURE_LSB_PER_C)
    }

    fn read_xyz<B: RegisterBus>(&self, bus: &mut B, first_reg: u8) -> Result<[i16; 3]> {
        let addr = self.dev.ready_address()?;
        let raw = bus.read_array::<6>(addr, first_reg)?;
        Ok(le_i16_xyz(raw))
    }
}
