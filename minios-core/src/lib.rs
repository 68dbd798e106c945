//! Board-agnostic core for the MiniOS handheld HAL
//!
//! This crate contains everything about the peripherals that does not
//! touch the bus:
//!
//! - Bit-level register field decoders (BCD, packed ADC codes, signed axes)
//! - Physical value types (touch points, 3-axis vectors, clock time)
//! - The hardware status record produced by the boot probe
//! - Resolved board configuration (addresses, expander pin roles)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod decode;
pub mod status;
pub mod time;
pub mod types;

pub use status::{HardwareStatus, HardwareStatusBuilder};
pub use time::{Date, Time};
pub use types::{ChargeState, TouchPoint, Vector3};
