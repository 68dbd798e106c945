//! Power-management unit drivers

pub mod axp2101;

pub use axp2101::Axp2101;
