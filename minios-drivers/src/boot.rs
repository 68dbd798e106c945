//! Ordered boot probe
//!
//! Touch and display may sit behind the I/O expander's power and reset
//! lines, so the expander has to come up first. The sequence is a chain
//! of stage types: [`BootSequence::power_up`] is the only way to reach the
//! stage that probes the remaining peripherals, so the order is checked at
//! compile time rather than by convention.
//!
//! ```text
//! BootSequence ──power_up──▶ Powered ──probe──▶ Probed ──finish──▶ (Peripherals, HardwareStatus)
//!   (expander, resets)        (touch, pmu, rtc, imu)      (display + audio flags from outside)
//! ```
//!
//! Every peripheral is optional: a probe failure is logged and recorded
//! in the status, never fatal.

use embedded_hal::delay::DelayNs;
use minios_core::config::BoardConfig;
use minios_core::HardwareStatus;
use minios_hal::RegisterBus;

use crate::error::{DriverError, Result};
use crate::{Axp2101, Ft3168, Pcf85063, Qmi8658, Xca9554};

/// Drivers for every peripheral that initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Peripherals {
    pub expander: Option<Xca9554>,
    pub touch: Option<Ft3168>,
    pub pmu: Option<Axp2101>,
    pub rtc: Option<Pcf85063>,
    pub imu: Option<Qmi8658>,
}

/// First stage: nothing probed yet
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct BootSequence {
    config: BoardConfig,
}

/// Expander handled; gated peripherals are powered and out of reset
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct Powered {
    config: BoardConfig,
    expander: Option<Xca9554>,
}

/// All bus peripherals probed
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct Probed {
    peripherals: Peripherals,
}

impl BootSequence {
    /// Start a boot for the given board
    pub const fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// Bring up the I/O expander and release the gated peripherals
    ///
    /// On boards without an expander this touches nothing on the bus;
    /// the firmware drives the direct reset GPIOs itself.
    pub fn power_up<B, D>(self, bus: &mut B, delay: &mut D) -> Powered
    where
        B: RegisterBus,
        D: DelayNs,
    {
        let expander = match self.config.expander {
            Some(pins) => {
                let mut exp = Xca9554::with_address(self.config.addresses.expander);
                let result = match pins.direction_mask() {
                    Some(direction) => exp
                        .begin_with_direction(bus, direction)
                        .and_then(|()| exp.power_up_peripherals(bus, delay, &pins)),
                    None => Err(DriverError::InvalidArgument),
                };
                log_result("expander", result);
                result.ok().map(|()| exp)
            }
            None => None,
        };

        Powered {
            config: self.config,
            expander,
        }
    }
}

impl Powered {
    /// Probe touch, power management, clock and IMU, in that order
    pub fn probe<B, D>(self, bus: &mut B, delay: &mut D) -> Probed
    where
        B: RegisterBus,
        D: DelayNs,
    {
        let addrs = self.config.addresses;

        let mut touch = Ft3168::with_address(addrs.touch)
            .with_panel(self.config.panel_width, self.config.panel_height);
        let touch_ok = log_result("touch", touch.begin(bus));

        let mut pmu = Axp2101::with_address(addrs.pmu);
        let pmu_ok = log_result("pmu", pmu.begin(bus));

        let mut rtc = Pcf85063::with_address(addrs.rtc);
        let rtc_ok = log_result("rtc", rtc.begin(bus));

        let mut imu = Qmi8658::with_address(addrs.imu);
        let imu_ok = log_result("imu", imu.begin(bus, delay));

        Probed {
            peripherals: Peripherals {
                expander: self.expander,
                touch: touch_ok.then_some(touch),
                pmu: pmu_ok.then_some(pmu),
                rtc: rtc_ok.then_some(rtc),
                imu: imu_ok.then_some(imu),
            },
        }
    }
}

impl Probed {
    /// Peripherals found so far
    pub const fn peripherals(&self) -> &Peripherals {
        &self.peripherals
    }

    /// Record the externally initialized display and audio results and
    /// produce the boot's status record
    pub fn finish(self, display: bool, audio: bool) -> (Peripherals, HardwareStatus) {
        let p = self.peripherals;
        let status = HardwareStatus::builder()
            .bus(true)
            .display(display)
            .expander(p.expander.is_some())
            .touch(p.touch.is_some())
            .pmu(p.pmu.is_some())
            .rtc(p.rtc.is_some())
            .imu(p.imu.is_some())
            .audio(audio)
            .build();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Boot complete: {=u8}/8 peripherals ({})",
            status.present_count(),
            status
        );

        (p, status)
    }
}

fn log_result(_name: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => {
            #[cfg(feature = "defmt")]
            defmt::info!("{=str}: ok", _name);
            true
        }
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("{=str}: {}", _name, _e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBus, RecordingDelay, Transaction};
    use crate::{expander, imu, power, rtc, touch};
    use minios_core::config::ExpanderPins;

    fn full_bus() -> MockBus {
        let mut bus = MockBus::new()
            .with_device(expander::xca9554::DEFAULT_ADDRESS)
            .with_device(touch::ft3168::DEFAULT_ADDRESS)
            .with_device(power::axp2101::DEFAULT_ADDRESS)
            .with_device(rtc::pcf85063::DEFAULT_ADDRESS)
            .with_device(imu::qmi8658::DEFAULT_ADDRESS);
        bus.set(
            imu::qmi8658::DEFAULT_ADDRESS,
            imu::qmi8658::reg::WHO_AM_I,
            imu::qmi8658::WHO_AM_I_VALUE,
        );
        bus
    }

    fn probe_order(bus: &MockBus) -> std::vec::Vec<u8> {
        bus.log()
            .iter()
            .filter_map(|t| match t {
                Transaction::Probe(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_full_boot() {
        let mut bus = full_bus();
        let mut delay = RecordingDelay::default();

        let (p, status) = BootSequence::new(BoardConfig::AMOLED_1_8)
            .power_up(&mut bus, &mut delay)
            .probe(&mut bus, &mut delay)
            .finish(true, false);

        assert!(p.expander.is_some());
        assert!(p.touch.is_some_and(|t| t.is_ready()));
        assert!(p.imu.is_some_and(|i| i.is_ready()));
        assert!(status.bus());
        assert!(status.display());
        assert!(status.expander());
        assert!(status.touch());
        assert!(status.pmu());
        assert!(status.rtc());
        assert!(status.imu());
        assert!(!status.audio());
        assert_eq!(status.present_count(), 7);
    }

    #[test]
    fn test_expander_probed_before_touch() {
        let mut bus = full_bus();
        let mut delay = RecordingDelay::default();

        let _ = BootSequence::new(BoardConfig::AMOLED_1_8)
            .power_up(&mut bus, &mut delay)
            .probe(&mut bus, &mut delay)
            .finish(false, false);

        assert_eq!(probe_order(&bus), [0x20, 0x38, 0x34, 0x51, 0x6B]);
        // Peripheral power is on before the touch controller is probed
        assert_eq!(bus.get(0x20, expander::xca9554::reg::OUTPUT) & 0b111, 0b111);
    }

    #[test]
    fn test_direct_reset_board_skips_expander() {
        let mut bus = full_bus();
        let mut delay = RecordingDelay::default();

        let (p, status) = BootSequence::new(BoardConfig::AMOLED_2_06)
            .power_up(&mut bus, &mut delay)
            .probe(&mut bus, &mut delay)
            .finish(true, true);

        assert!(p.expander.is_none());
        assert!(!status.expander());
        assert!(status.touch());
        assert!(status.audio());
        assert_eq!(probe_order(&bus), [0x38, 0x34, 0x51, 0x6B]);
        assert!(bus.writes_to(0x20).is_empty());
    }

    #[test]
    fn test_empty_bus_writes_nothing() {
        let mut bus = MockBus::new();
        let mut delay = RecordingDelay::default();

        let (p, status) = BootSequence::new(BoardConfig::AMOLED_1_8)
            .power_up(&mut bus, &mut delay)
            .probe(&mut bus, &mut delay)
            .finish(false, false);

        assert_eq!(p, Peripherals::default());
        assert_eq!(bus.write_count(), 0);
        assert_eq!(delay.calls, 0);
        assert!(status.bus());
        assert_eq!(status.present_count(), 1);
    }

    #[test]
    fn test_missing_rtc_does_not_block_others() {
        let mut bus = full_bus();
        bus.set_present(rtc::pcf85063::DEFAULT_ADDRESS, false);
        let mut delay = RecordingDelay::default();

        let probed = BootSequence::new(BoardConfig::AMOLED_1_8)
            .power_up(&mut bus, &mut delay)
            .probe(&mut bus, &mut delay);

        assert!(probed.peripherals().rtc.is_none());
        assert!(probed.peripherals().imu.is_some());
        assert!(bus.writes_to(rtc::pcf85063::DEFAULT_ADDRESS).is_empty());
    }

    #[test]
    fn test_invalid_expander_pin_fails_expander_only() {
        let mut bus = full_bus();
        let mut delay = RecordingDelay::default();
        let config = BoardConfig {
            expander: Some(ExpanderPins {
                touch_reset: 8,
                ..ExpanderPins::AMOLED_1_8
            }),
            ..BoardConfig::AMOLED_1_8
        };

        let (p, status) = BootSequence::new(config)
            .power_up(&mut bus, &mut delay)
            .probe(&mut bus, &mut delay)
            .finish(true, false);

        assert!(p.expander.is_none());
        assert!(!status.expander());
        assert!(status.touch());
        assert!(status.imu());
        assert!(bus.writes_to(expander::xca9554::DEFAULT_ADDRESS).is_empty());
        // Only the IMU reset settle; no expander reset pulse
        assert_eq!(delay.total_ns, 10_000_000);
    }

    #[test]
    fn test_touch_clamped_to_panel() {
        let mut bus = full_bus();
        let mut delay = RecordingDelay::default();
        let probed = BootSequence::new(BoardConfig::AMOLED_1_8)
            .power_up(&mut bus, &mut delay)
            .probe(&mut bus, &mut delay);

        let touch = probed.peripherals().touch.unwrap();
        bus.set_block(
            touch::ft3168::DEFAULT_ADDRESS,
            touch::ft3168::reg::P1_XH,
            &[0x0F, 0xFF, 0x00, 0x64],
        );
        assert_eq!(
            touch.point(&mut bus),
            Ok(minios_core::TouchPoint::new(367, 100))
        );
    }
}
