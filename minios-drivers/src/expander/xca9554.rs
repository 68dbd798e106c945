//! XCA9554 8-bit I2C I/O expander
//!
//! Four single-byte registers: input levels, output latch, input
//! polarity, and direction (1 = input, 0 = output). Nothing is cached on
//! this side; every accessor round-trips to the chip, and pin updates are
//! read-modify-write against the whole register.

use embedded_hal::delay::DelayNs;
use minios_core::config::ExpanderPins;
use minios_hal::{Level, PinMode, RegisterBus};

use crate::device::Device;
use crate::error::{DriverError, Result};

/// Default I2C address (A2..A0 tied low)
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Number of pins on the chip
pub const PIN_COUNT: u8 = 8;

/// Direction programmed by `begin`: P0-P2 outputs, P3-P7 inputs
pub const DEFAULT_DIRECTION: u8 = 0b1111_1000;

/// Hold time for the touch/display reset pulse
pub const RESET_PULSE_MS: u32 = 20;

/// Settle time after releasing reset
pub const RESET_SETTLE_MS: u32 = 50;

/// XCA9554 register addresses
pub mod reg {
    /// Input port (read-only)
    pub const INPUT: u8 = 0x00;
    /// Output port latch
    pub const OUTPUT: u8 = 0x01;
    /// Input polarity inversion
    pub const POLARITY: u8 = 0x02;
    /// Pin direction (1 = input)
    pub const CONFIG: u8 = 0x03;
}

/// XCA9554 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xca9554 {
    dev: Device,
}

impl Default for Xca9554 {
    fn default() -> Self {
        Self::new()
    }
}

impl Xca9554 {
    /// Create a driver at the default address
    pub const fn new() -> Self {
        Self::with_address(DEFAULT_ADDRESS)
    }

    /// Create a driver at a custom address
    pub const fn with_address(address: u8) -> Self {
        Self {
            dev: Device::new(address),
        }
    }

    pub const fn address(&self) -> u8 {
        self.dev.address()
    }

    /// Check if `begin` succeeded
    pub const fn is_ready(&self) -> bool {
        self.dev.is_ready()
    }

    /// Probe the chip and program the default pin directions
    pub fn begin<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        self.begin_with_direction(bus, DEFAULT_DIRECTION)
    }

    /// Probe the chip and program a board-specific direction mask
    pub fn begin_with_direction<B: RegisterBus>(&mut self, bus: &mut B, direction: u8) -> Result<()> {
        self.dev.probe(bus)?;
        bus.write_register(self.dev.address(), reg::CONFIG, direction)?;
        self.dev.mark_ready();

        #[cfg(feature = "defmt")]
        defmt::info!("XCA9554 ready, direction {=u8:#b}", direction);

        Ok(())
    }

    /// Set one pin's direction
    pub fn set_pin_mode<B: RegisterBus>(&mut self, bus: &mut B, pin: u8, mode: PinMode) -> Result<()> {
        let mask = pin_mask(pin)?;
        let addr = self.dev.ready_address()?;
        bus.modify_register(addr, reg::CONFIG, |config| match mode {
            PinMode::Output => config & !mask,
            PinMode::Input => config | mask,
        })?;
        Ok(())
    }

    /// Read back one pin's direction
    pub fn pin_mode<B: RegisterBus>(&self, bus: &mut B, pin: u8) -> Result<PinMode> {
        let mask = pin_mask(pin)?;
        let addr = self.dev.ready_address()?;
        let config = bus.read_register(addr, reg::CONFIG)?;
        Ok(if config & mask != 0 {
            PinMode::Input
        } else {
            PinMode::Output
        })
    }

    /// Drive one output pin
    pub fn write_pin<B: RegisterBus>(&mut self, bus: &mut B, pin: u8, level: Level) -> Result<()> {
        let mask = pin_mask(pin)?;
        let addr = self.dev.ready_address()?;
        bus.modify_register(addr, reg::OUTPUT, |output| match level {
            Level::High => output | mask,
            Level::Low => output & !mask,
        })?;
        Ok(())
    }

    /// Sample one pin's input level
    pub fn read_pin<B: RegisterBus>(&self, bus: &mut B, pin: u8) -> Result<Level> {
        let mask = pin_mask(pin)?;
        let addr = self.dev.ready_address()?;
        let input = bus.read_register(addr, reg::INPUT)?;
        Ok(Level::from(input & mask != 0))
    }

    /// Power the gated peripherals and pulse their resets
    ///
    /// Raises peripheral power, holds touch and display reset low for
    /// [`RESET_PULSE_MS`], releases them, and waits [`RESET_SETTLE_MS`] so
    /// both chips are ready to be probed.
    pub fn power_up_peripherals<B, D>(&mut self, bus: &mut B, delay: &mut D, pins: &ExpanderPins) -> Result<()>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        self.write_pin(bus, pins.peripheral_power, Level::High)?;
        self.write_pin(bus, pins.touch_reset, Level::Low)?;
        self.write_pin(bus, pins.display_reset, Level::Low)?;
        delay.delay_ms(RESET_PULSE_MS);
        self.write_pin(bus, pins.touch_reset, Level::High)?;
        self.write_pin(bus, pins.display_reset, Level::High)?;
        delay.delay_ms(RESET_SETTLE_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("peripheral power on, resets released");

        Ok(())
    }
}

fn pin_mask(pin: u8) -> Result<u8> {
    if pin < PIN_COUNT {
        Ok(1 << pin)
    } else {
        Err(DriverError::InvalidArgument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBus, RecordingDelay};

    fn ready_expander() -> (Xca9554, MockBus) {
        let mut bus = MockBus::new().with_device(DEFAULT_ADDRESS);
        let mut exp = Xca9554::new();
        exp.begin(&mut bus).unwrap();
        bus.clear_log();
        (exp, bus)
    }

    #[test]
    fn test_begin_programs_direction() {
        let mut bus = MockBus::new().with_device(DEFAULT_ADDRESS);
        let mut exp = Xca9554::new();

        assert!(exp.begin(&mut bus).is_ok());
        assert!(exp.is_ready());
        assert_eq!(bus.writes_to(DEFAULT_ADDRESS), [(reg::CONFIG, 0b1111_1000)]);
    }

    #[test]
    fn test_begin_absent_writes_nothing() {
        let mut bus = MockBus::new();
        let mut exp = Xca9554::new();

        assert_eq!(exp.begin(&mut bus), Err(DriverError::NotPresent));
        assert!(!exp.is_ready());
        assert_eq!(bus.write_count(), 0);
    }

    #[test]
    fn test_set_pin_mode_read_modify_write() {
        let (mut exp, mut bus) = ready_expander();

        exp.set_pin_mode(&mut bus, 4, PinMode::Output).unwrap();
        assert_eq!(bus.get(DEFAULT_ADDRESS, reg::CONFIG), 0b1110_1000);

        exp.set_pin_mode(&mut bus, 0, PinMode::Input).unwrap();
        assert_eq!(bus.get(DEFAULT_ADDRESS, reg::CONFIG), 0b1110_1001);

        assert_eq!(exp.pin_mode(&mut bus, 4), Ok(PinMode::Output));
        assert_eq!(exp.pin_mode(&mut bus, 0), Ok(PinMode::Input));
    }

    #[test]
    fn test_write_pin_preserves_other_bits() {
        let (mut exp, mut bus) = ready_expander();
        bus.set(DEFAULT_ADDRESS, reg::OUTPUT, 0b0000_0100);

        exp.write_pin(&mut bus, 0, Level::High).unwrap();
        assert_eq!(bus.get(DEFAULT_ADDRESS, reg::OUTPUT), 0b0000_0101);

        exp.write_pin(&mut bus, 2, Level::Low).unwrap();
        assert_eq!(bus.get(DEFAULT_ADDRESS, reg::OUTPUT), 0b0000_0001);
    }

    #[test]
    fn test_read_pin_uses_input_register() {
        let (exp, mut bus) = ready_expander();
        bus.set(DEFAULT_ADDRESS, reg::INPUT, 0b0010_0000);
        bus.set(DEFAULT_ADDRESS, reg::OUTPUT, 0b0001_0000);

        assert_eq!(exp.read_pin(&mut bus, 5), Ok(Level::High));
        assert_eq!(exp.read_pin(&mut bus, 4), Ok(Level::Low));
    }

    #[test]
    fn test_invalid_pin_rejected_before_bus_traffic() {
        let (mut exp, mut bus) = ready_expander();

        assert_eq!(exp.write_pin(&mut bus, 8, Level::High), Err(DriverError::InvalidArgument));
        assert_eq!(exp.read_pin(&mut bus, 9), Err(DriverError::InvalidArgument));
        assert!(bus.log().is_empty());
    }

    #[test]
    fn test_accessor_before_begin() {
        let mut bus = MockBus::new().with_device(DEFAULT_ADDRESS);
        let exp = Xca9554::new();
        assert_eq!(exp.read_pin(&mut bus, 0), Err(DriverError::NotInitialized));
    }

    #[test]
    fn test_power_up_sequence() {
        let (mut exp, mut bus) = ready_expander();
        let mut delay = RecordingDelay::default();

        exp.power_up_peripherals(&mut bus, &mut delay, &ExpanderPins::AMOLED_1_8)
            .unwrap();

        let outputs: std::vec::Vec<u8> = bus
            .writes_to(DEFAULT_ADDRESS)
            .into_iter()
            .map(|(r, v)| {
                assert_eq!(r, reg::OUTPUT);
                v
            })
            .collect();
        // power on, touch reset low, display reset low, then release both
        assert_eq!(outputs, [0b100, 0b100, 0b100, 0b101, 0b111]);
        assert_eq!(bus.get(DEFAULT_ADDRESS, reg::OUTPUT), 0b0000_0111);
        assert_eq!(delay.total_ns, 70_000_000);
    }

    #[test]
    fn test_transient_failure_is_unavailable() {
        let (mut exp, mut bus) = ready_expander();
        bus.set_present(DEFAULT_ADDRESS, false);

        assert_eq!(
            exp.write_pin(&mut bus, 1, Level::High),
            Err(DriverError::Unavailable(minios_hal::BusError::Nack))
        );
    }
}
