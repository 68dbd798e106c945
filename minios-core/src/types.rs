//! Physical value types returned by the peripheral drivers

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A touch coordinate in panel pixels
///
/// The controller reports 12-bit values (0-4095); in practice they stay
/// within the panel resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    /// Create a new touch point
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Clamp the point to a panel of the given size
    pub fn clamp_to(self, width: u16, height: u16) -> Self {
        Self {
            x: self.x.min(width.saturating_sub(1)),
            y: self.y.min(height.saturating_sub(1)),
        }
    }
}

/// A three-axis reading in physical units (g or deg/s)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Create a new vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Scale raw signed axis words by a full-scale range
    pub fn from_raw(raw: [i16; 3], full_scale: f32) -> Self {
        use crate::decode::scale_i16;
        Self {
            x: scale_i16(raw[0], full_scale),
            y: scale_i16(raw[1], full_scale),
            z: scale_i16(raw[2], full_scale),
        }
    }
}

/// Battery current direction reported by the power-management unit
///
/// Decoded from bits 5-6 of the PMU's second status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChargeState {
    /// No current in or out of the battery (`00`)
    Standby,
    /// Battery is charging (`01`)
    Charging,
    /// Battery is supplying the system (`10`)
    Discharging,
    /// Reserved code (`11`)
    Reserved,
}

impl ChargeState {
    /// Decode from the raw status byte
    pub const fn from_status(status: u8) -> Self {
        match (status >> 5) & 0x03 {
            0b00 => ChargeState::Standby,
            0b01 => ChargeState::Charging,
            0b10 => ChargeState::Discharging,
            _ => ChargeState::Reserved,
        }
    }

    /// Check if the battery is being charged
    pub const fn is_charging(self) -> bool {
        matches!(self, ChargeState::Charging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_state_decode() {
        assert_eq!(ChargeState::from_status(0b0010_0000), ChargeState::Charging);
        assert_eq!(ChargeState::from_status(0b0100_0000), ChargeState::Discharging);
        assert_eq!(ChargeState::from_status(0b0000_0000), ChargeState::Standby);
        assert_eq!(ChargeState::from_status(0b0110_0000), ChargeState::Reserved);
        // Unrelated bits do not leak into the state
        assert_eq!(ChargeState::from_status(0b1001_1111), ChargeState::Standby);
    }

    #[test]
    fn test_only_charging_code_is_charging() {
        assert!(ChargeState::from_status(0b0010_0000).is_charging());
        assert!(!ChargeState::from_status(0b0100_0000).is_charging());
        assert!(!ChargeState::from_status(0b0000_0000).is_charging());
    }

    #[test]
    fn test_vector_from_raw() {
        let v = Vector3::from_raw([16384, -16384, 0], 8.0);
        assert!((v.x - 4.0).abs() < 1e-6);
        assert!((v.y + 4.0).abs() < 1e-6);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_touch_point_clamp() {
        let p = TouchPoint::new(4095, 100).clamp_to(368, 448);
        assert_eq!(p, TouchPoint::new(367, 100));
    }
}
