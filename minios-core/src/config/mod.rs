//! Configuration types
//!
//! Resolved board constants the drivers and boot sequence consume.
//! Choosing which variant a unit is stays with the firmware.

pub mod board;

pub use board::*;
