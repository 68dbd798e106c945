//! Real-time clock drivers

pub mod pcf85063;

pub use pcf85063::Pcf85063;
