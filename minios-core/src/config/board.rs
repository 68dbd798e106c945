//! Board variant configuration
//!
//! Every supported board shares one I2C bus for all peripherals. The 1.8"
//! AMOLED board routes touch and display reset through an XCA9554 I/O
//! expander that also switches peripheral power; the other variants wire
//! resets straight to GPIOs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 7-bit I2C addresses of the on-board peripherals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusAddresses {
    /// FT3168 capacitive touch controller
    pub touch: u8,
    /// AXP2101 power-management unit
    pub pmu: u8,
    /// PCF85063 real-time clock
    pub rtc: u8,
    /// QMI8658 inertial sensor
    pub imu: u8,
    /// XCA9554 I/O expander (only probed when the board has one)
    pub expander: u8,
    /// ES8311 audio codec (owned by the audio layer)
    pub audio_codec: u8,
}

impl BusAddresses {
    /// Addresses used on every current board
    pub const DEFAULT: Self = Self {
        touch: 0x38,
        pmu: 0x34,
        rtc: 0x51,
        imu: 0x6B,
        expander: 0x20,
        audio_codec: 0x18,
    };

    /// Check that no two peripherals share an address
    pub fn is_unique(&self) -> bool {
        let all = [
            self.touch,
            self.pmu,
            self.rtc,
            self.imu,
            self.expander,
            self.audio_codec,
        ];
        all.iter()
            .enumerate()
            .all(|(i, a)| !all[i + 1..].contains(a))
    }
}

impl Default for BusAddresses {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Number of pins on the I/O expander
pub const EXPANDER_PIN_COUNT: u8 = 8;

/// Role of each XCA9554 pin on boards that have the expander
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpanderPins {
    /// Touch controller reset (output, active low)
    pub touch_reset: u8,
    /// Display reset (output, active low)
    pub display_reset: u8,
    /// Peripheral power enable (output, active high)
    pub peripheral_power: u8,
    /// Backlight sense (input)
    pub backlight_sense: u8,
    /// PMU interrupt (input)
    pub pmu_irq: u8,
}

impl ExpanderPins {
    /// Pin assignment on the 1.8" AMOLED board
    pub const AMOLED_1_8: Self = Self {
        touch_reset: 0,
        display_reset: 1,
        peripheral_power: 2,
        backlight_sense: 4,
        pmu_irq: 5,
    };

    /// Check that every role names one of the expander's 8 pins
    pub const fn is_valid(&self) -> bool {
        self.touch_reset < EXPANDER_PIN_COUNT
            && self.display_reset < EXPANDER_PIN_COUNT
            && self.peripheral_power < EXPANDER_PIN_COUNT
            && self.backlight_sense < EXPANDER_PIN_COUNT
            && self.pmu_irq < EXPANDER_PIN_COUNT
    }

    /// Direction register value: outputs cleared, everything else input
    ///
    /// `None` if any role is outside the expander's pin range.
    pub const fn direction_mask(&self) -> Option<u8> {
        if !self.is_valid() {
            return None;
        }
        let outputs =
            (1u8 << self.touch_reset) | (1u8 << self.display_reset) | (1u8 << self.peripheral_power);
        Some(!outputs)
    }
}

/// Resolved constants for one board variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Peripheral addresses
    pub addresses: BusAddresses,
    /// Expander pin roles, or `None` when resets are direct GPIOs
    pub expander: Option<ExpanderPins>,
    /// Touch interrupt GPIO
    pub touch_int: u8,
    /// Touch reset GPIO when not behind the expander
    pub touch_reset_gpio: Option<u8>,
    /// Display reset GPIO when not behind the expander
    pub display_reset_gpio: Option<u8>,
    /// I2C clock in Hz
    pub bus_frequency: u32,
    /// Panel width in pixels
    pub panel_width: u16,
    /// Panel height in pixels
    pub panel_height: u16,
}

impl BoardConfig {
    /// 1.8" AMOLED board, resets and power behind the XCA9554
    pub const AMOLED_1_8: Self = Self {
        addresses: BusAddresses::DEFAULT,
        expander: Some(ExpanderPins::AMOLED_1_8),
        touch_int: 21,
        touch_reset_gpio: None,
        display_reset_gpio: None,
        bus_frequency: 400_000,
        panel_width: 368,
        panel_height: 448,
    };

    /// 1.8" AMOLED revision with direct GPIO resets
    pub const AMOLED_1_8_DIRECT: Self = Self {
        addresses: BusAddresses::DEFAULT,
        expander: None,
        touch_int: 38,
        touch_reset_gpio: Some(9),
        display_reset_gpio: Some(8),
        bus_frequency: 400_000,
        panel_width: 368,
        panel_height: 448,
    };

    /// 2.06" AMOLED board with direct GPIO resets
    pub const AMOLED_2_06: Self = Self {
        addresses: BusAddresses::DEFAULT,
        expander: None,
        touch_int: 38,
        touch_reset_gpio: Some(9),
        display_reset_gpio: Some(8),
        bus_frequency: 400_000,
        panel_width: 410,
        panel_height: 502,
    };

    /// Check if touch and display are power-gated by the expander
    pub const fn has_expander(&self) -> bool {
        self.expander.is_some()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::AMOLED_1_8
    }
}
