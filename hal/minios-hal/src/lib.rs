//! MiniOS Hardware Abstraction Layer
//!
//! This crate defines the bus-level contract every peripheral driver is
//! written against. A board support layer owns the physical I2C master and
//! hands it to drivers as a short-lived `&mut` borrow, one transaction at a
//! time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  minios-drivers (touch, pmu, rtc, imu)  │
//! └─────────────────────────────────────────┘
//!                     │  RegisterBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  minios-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │  I2cBus
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ EmbeddedHalBus│       │   SharedBus   │
//! │ (any eh-1.0   │       │ (mutex at the │
//! │  I2C master)  │       │   boundary)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Raw I2C master operations
//! - [`register::RegisterBus`] - Addressed register reads and writes

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod register;
pub mod shared;

// Re-export key traits at crate root for convenience
pub use gpio::{Level, PinMode};
pub use i2c::{BusError, EmbeddedHalBus, I2cBus};
pub use register::RegisterBus;
pub use shared::SharedBus;
