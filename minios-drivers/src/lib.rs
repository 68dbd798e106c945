//! Peripheral drivers for the MiniOS handheld
//!
//! One driver per chip on the shared I2C bus:
//!
//! - I/O expander (XCA9554) gating touch/display reset and peripheral power
//! - Capacitive touch (FT3168)
//! - Power management (AXP2101)
//! - Real-time clock (PCF85063)
//! - Inertial sensor (QMI8658)
//!
//! Drivers hold only their address and whether `begin` succeeded. The bus
//! is borrowed per call, so drivers can be copied, stored, and dropped
//! freely while the boot code keeps sole ownership of the bus handle.
//!
//! [`boot::BootSequence`] probes everything in dependency order and
//! produces the [`minios_core::HardwareStatus`] record.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod device;
pub mod error;

pub mod boot;
pub mod expander;
pub mod imu;
pub mod power;
pub mod rtc;
pub mod scan;
pub mod touch;

#[cfg(test)]
pub(crate) mod testing;

pub use boot::{BootSequence, Peripherals};
pub use error::DriverError;
pub use expander::Xca9554;
pub use imu::Qmi8658;
pub use power::Axp2101;
pub use rtc::Pcf85063;
pub use touch::Ft3168;
