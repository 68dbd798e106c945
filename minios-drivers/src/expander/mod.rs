//! I/O expander drivers
//!
//! Only present on boards whose touch and display resets are not wired to
//! MCU GPIOs.

pub mod xca9554;

pub use xca9554::Xca9554;
