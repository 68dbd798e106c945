//! Hardware status record
//!
//! One flag per peripheral kind, produced once by the boot probe and
//! handed read-only to the UI layer so it can decide which features to
//! offer. There are no setters: the only way to obtain a status is to
//! consume a [`HardwareStatusBuilder`], so every flag is written exactly
//! once per boot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which peripherals initialized successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StatusFields"))]
pub struct HardwareStatus {
    display: bool,
    bus: bool,
    expander: bool,
    touch: bool,
    pmu: bool,
    rtc: bool,
    imu: bool,
    audio: bool,
}

impl HardwareStatus {
    /// Start recording a boot's probe results
    pub const fn builder() -> HardwareStatusBuilder {
        HardwareStatusBuilder {
            status: HardwareStatus {
                display: false,
                bus: false,
                expander: false,
                touch: false,
                pmu: false,
                rtc: false,
                imu: false,
                audio: false,
            },
        }
    }

    /// Whether the display came up
    pub const fn display(&self) -> bool {
        self.display
    }

    /// Whether the I2C bus came up
    pub const fn bus(&self) -> bool {
        self.bus
    }

    /// Whether the I/O expander came up
    pub const fn expander(&self) -> bool {
        self.expander
    }

    /// Whether the touch controller came up
    pub const fn touch(&self) -> bool {
        self.touch
    }

    /// Whether the power-management unit came up
    pub const fn pmu(&self) -> bool {
        self.pmu
    }

    /// Whether the real-time clock came up
    pub const fn rtc(&self) -> bool {
        self.rtc
    }

    /// Whether the IMU came up
    pub const fn imu(&self) -> bool {
        self.imu
    }

    /// Whether the audio codec came up
    pub const fn audio(&self) -> bool {
        self.audio
    }

    /// Number of peripherals that came up
    pub const fn present_count(&self) -> u8 {
        self.display as u8
            + self.bus as u8
            + self.expander as u8
            + self.touch as u8
            + self.pmu as u8
            + self.rtc as u8
            + self.imu as u8
            + self.audio as u8
    }
}

/// Write-once builder for [`HardwareStatus`]
///
/// Each setter takes `self` by value, so a flag set during boot cannot be
/// revisited once `build` hands the record out.
#[derive(Debug)]
#[must_use]
pub struct HardwareStatusBuilder {
    status: HardwareStatus,
}

impl HardwareStatusBuilder {
    /// Record the display result
    pub const fn display(mut self, ok: bool) -> Self {
        self.status.display = ok;
        self
    }

    /// Record the I2C bus result
    pub const fn bus(mut self, ok: bool) -> Self {
        self.status.bus = ok;
        self
    }

    /// Record the I/O expander result
    pub const fn expander(mut self, ok: bool) -> Self {
        self.status.expander = ok;
        self
    }

    /// Record the touch controller result
    pub const fn touch(mut self, ok: bool) -> Self {
        self.status.touch = ok;
        self
    }

    /// Record the power-management unit result
    pub const fn pmu(mut self, ok: bool) -> Self {
        self.status.pmu = ok;
        self
    }

    /// Record the real-time clock result
    pub const fn rtc(mut self, ok: bool) -> Self {
        self.status.rtc = ok;
        self
    }

    /// Record the IMU result
    pub const fn imu(mut self, ok: bool) -> Self {
        self.status.imu = ok;
        self
    }

    /// Record the audio codec result
    pub const fn audio(mut self, ok: bool) -> Self {
        self.status.audio = ok;
        self
    }

    /// Finish recording
    pub const fn build(self) -> HardwareStatus {
        self.status
    }
}

/// Wire form of [`HardwareStatus`], replayed through the builder
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StatusFields {
    display: bool,
    bus: bool,
    expander: bool,
    touch: bool,
    pmu: bool,
    rtc: bool,
    imu: bool,
    audio: bool,
}

#[cfg(feature = "serde")]
impl From<StatusFields> for HardwareStatus {
    fn from(f: StatusFields) -> Self {
        HardwareStatus::builder()
            .display(f.display)
            .bus(f.bus)
            .expander(f.expander)
            .touch(f.touch)
            .pmu(f.pmu)
            .rtc(f.rtc)
            .imu(f.imu)
            .audio(f.audio)
            .build()
    }
}
