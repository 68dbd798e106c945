//! Register-file bus double for driver tests

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use minios_hal::{BusError, I2cBus};

const MAX_DEVICES: usize = 8;
const MAX_LOG: usize = 128;

/// One recorded bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Address-only probe
    Probe(u8),
    /// Register write
    Write { address: u8, reg: u8, value: u8 },
    /// Register read of `len` bytes
    Read { address: u8, reg: u8, len: usize },
}

struct SimDevice {
    address: u8,
    present: bool,
    pointer: u8,
    regs: [u8; 256],
}

/// Simulated bus with auto-incrementing 256-byte register files
pub struct MockBus {
    devices: Vec<SimDevice, MAX_DEVICES>,
    log: Vec<Transaction, MAX_LOG>,
    writes: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            log: Vec::new(),
            writes: 0,
        }
    }

    /// Attach a device that acknowledges at `address`
    pub fn with_device(mut self, address: u8) -> Self {
        let _ = self.devices.push(SimDevice {
            address,
            present: true,
            pointer: 0,
            regs: [0; 256],
        });
        self
    }

    /// Preload a register before the driver runs
    pub fn set(&mut self, address: u8, reg: u8, value: u8) {
        self.device_mut(address).regs[reg as usize] = value;
    }

    /// Preload consecutive registers
    pub fn set_block(&mut self, address: u8, reg: u8, values: &[u8]) {
        let dev = self.device_mut(address);
        for (i, v) in values.iter().enumerate() {
            dev.regs[reg as usize + i] = *v;
        }
    }

    pub fn get(&self, address: u8, reg: u8) -> u8 {
        self.devices
            .iter()
            .find(|d| d.address == address)
            .map(|d| d.regs[reg as usize])
            .unwrap()
    }

    /// Make a device stop (or resume) acknowledging
    pub fn set_present(&mut self, address: u8, present: bool) {
        self.device_mut(address).present = present;
    }

    /// Register writes that reached a device
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn log(&self) -> &[Transaction] {
        &self.log
    }

    /// Register writes to one device, in order
    pub fn writes_to(&self, address: u8) -> std::vec::Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|t| match *t {
                Transaction::Write {
                    address: a,
                    reg,
                    value,
                } if a == address => Some((reg, value)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.writes = 0;
    }

    fn device_mut(&mut self, address: u8) -> &mut SimDevice {
        self.devices
            .iter_mut()
            .find(|d| d.address == address)
            .unwrap()
    }

    fn present_device(&mut self, address: u8) -> Result<&mut SimDevice, BusError> {
        self.devices
            .iter_mut()
            .find(|d| d.address == address && d.present)
            .ok_or(BusError::Nack)
    }

    fn record(&mut self, t: Transaction) {
        let _ = self.log.push(t);
    }
}

impl I2cBus for MockBus {
    type Error = BusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        if data.is_empty() {
            self.record(Transaction::Probe(address));
            return self.present_device(address).map(|_| ());
        }
        let dev = self.present_device(address)?;
        let reg = data[0];
        dev.pointer = reg;
        for (i, value) in data[1..].iter().enumerate() {
            dev.regs[reg.wrapping_add(i as u8) as usize] = *value;
        }
        for (i, value) in data[1..].iter().enumerate() {
            self.writes += 1;
            self.record(Transaction::Write {
                address,
                reg: reg.wrapping_add(i as u8),
                value: *value,
            });
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError> {
        let dev = self.present_device(address)?;
        let reg = dev.pointer;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = dev.regs[reg.wrapping_add(i as u8) as usize];
        }
        let len = buf.len();
        self.record(Transaction::Read { address, reg, len });
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), BusError> {
        let dev = self.present_device(address)?;
        dev.pointer = write_data[0];
        self.read(address, read_buf)
    }
}

/// Delay that only records how long it was asked to wait
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}
