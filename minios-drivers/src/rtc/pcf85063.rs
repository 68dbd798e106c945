//! PCF85063 real-time clock
//!
//! Time and date live in consecutive BCD registers starting at seconds.
//! Bit 7 of the seconds register is the oscillator-stop flag, set when
//! the clock lost power and its time cannot be trusted.
//!
//! `set_time` and `set_date` write one register at a time, so a read in
//! between can observe a partially updated value. Setting the clock is an
//! administrative operation and never on a hot path.

use minios_core::decode::{bcd_to_dec, dec_to_bcd, is_valid_bcd};
use minios_core::time::BASE_YEAR;
use minios_core::{Date, Time};
use minios_hal::RegisterBus;

use crate::device::Device;
use crate::error::{DriverError, Result};

/// Default I2C address
pub const DEFAULT_ADDRESS: u8 = 0x51;

/// PCF85063 register addresses
pub mod reg {
    /// Control 1 (bit 5 = STOP)
    pub const CONTROL_1: u8 = 0x00;
    /// Seconds, BCD (bit 7 = oscillator stopped)
    pub const SECONDS: u8 = 0x04;
    /// Minutes, BCD
    pub const MINUTES: u8 = 0x05;
    /// Hours, BCD (24h mode)
    pub const HOURS: u8 = 0x06;
    /// Day of month, BCD
    pub const DAYS: u8 = 0x07;
    /// Day of week, 0-6
    pub const WEEKDAYS: u8 = 0x08;
    /// Month, BCD
    pub const MONTHS: u8 = 0x09;
    /// Year within century, BCD
    pub const YEARS: u8 = 0x0A;
}

/// Oscillator-stop flag in [`reg::SECONDS`]
const OSCILLATOR_STOPPED: u8 = 1 << 7;

/// PCF85063 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcf85063 {
    dev: Device,
}

impl Default for Pcf85063 {
    fn default() -> Self {
        Self::new()
    }
}

impl Pcf85063 {
    /// Create a driver at the default address
    pub const fn new() -> Self {
        Self::with_address(DEFAULT_ADDRESS)
    }

    /// Create a driver at a board-specific address
    pub const fn with_address(address: u8) -> Self {
        Self {
            dev: Device::new(address),
        }
    }

    /// Configured I2C address
    pub const fn address(&self) -> u8 {
        self.dev.address()
    }

    /// Whether `begin` succeeded
    pub const fn is_ready(&self) -> bool {
        self.dev.is_ready()
    }

    /// Probe the clock and start its oscillator
    ///
    /// Clearing control 1 releases the STOP bit along with every other
    /// control option, leaving 24-hour mode.
    pub fn begin<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        self.dev.probe(bus)?;
        bus.write_register(self.dev.address(), reg::CONTROL_1, 0x00)?;
        self.dev.mark_ready();

        #[cfg(feature = "defmt")]
        defmt::info!("RTC oscillator started");

        Ok(())
    }

    /// Current time of day
    pub fn time<B: RegisterBus>(&self, bus: &mut B) -> Result<Time> {
        let addr = self.dev.ready_address()?;
        let [sec, min, hour] = bus.read_array::<3>(addr, reg::SECONDS)?;
        Time::new(
            decode_bcd(hour & 0x3F)?,
            decode_bcd(min & 0x7F)?,
            decode_bcd(sec & 0x7F)?,
        )
        .ok_or(DriverError::Corrupt)
    }

    /// Set the time of day
    ///
    /// Writes seconds, then minutes, then hours.
    pub fn set_time<B: RegisterBus>(&mut self, bus: &mut B, time: Time) -> Result<()> {
        let addr = self.dev.ready_address()?;
        bus.write_register(addr, reg::SECONDS, dec_to_bcd(time.second()))?;
        bus.write_register(addr, reg::MINUTES, dec_to_bcd(time.minute()))?;
        bus.write_register(addr, reg::HOURS, dec_to_bcd(time.hour()))?;
        Ok(())
    }

    /// Current calendar date
    pub fn date<B: RegisterBus>(&self, bus: &mut B) -> Result<Date> {
        let addr = self.dev.ready_address()?;
        let [day, weekday, month, year] = bus.read_array::<4>(addr, reg::DAYS)?;
        Date::new(
            BASE_YEAR + decode_bcd(year)? as u16,
            decode_bcd(month & 0x1F)?,
            decode_bcd(day & 0x3F)?,
            weekday & 0x07,
        )
        .ok_or(DriverError::Corrupt)
    }

    /// Set the calendar date
    ///
    /// Writes day, weekday, month, then year.
    pub fn set_date<B: RegisterBus>(&mut self, bus: &mut B, date: Date) -> Result<()> {
        let addr = self.dev.ready_address()?;
        bus.write_register(addr, reg::DAYS, dec_to_bcd(date.day()))?;
        bus.write_register(addr, reg::WEEKDAYS, date.weekday())?;
        bus.write_register(addr, reg::MONTHS, dec_to_bcd(date.month()))?;
        bus.write_register(addr, reg::YEARS, dec_to_bcd(date.year_offset()))?;
        Ok(())
    }

    /// Check if the oscillator stopped since the flag was last cleared
    ///
    /// A set flag means the time registers are not trustworthy. Writing
    /// the time with [`Pcf85063::set_time`] clears it.
    pub fn oscillator_stopped<B: RegisterBus>(&self, bus: &mut B) -> Result<bool> {
        let addr = self.dev.ready_address()?;
        Ok(bus.read_register(addr, reg::SECONDS)? & OSCILLATOR_STOPPED != 0)
    }
}

fn decode_bcd(bcd: u8) -> Result<u8> {
    if is_valid_bcd(bcd) {
        Ok(bcd_to_dec(bcd))
    } else {
        Err(DriverError::Corrupt)
    }
}
