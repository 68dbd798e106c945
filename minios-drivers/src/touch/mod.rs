//! Capacitive touch controller drivers

pub mod ft3168;

pub use ft3168::Ft3168;
