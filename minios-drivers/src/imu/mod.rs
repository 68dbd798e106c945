//! Inertial measurement unit drivers

pub mod qmi8658;

pub use qmi8658::{AccelRange, GyroRange, Qmi8658};
