//! Bus scan
//!
//! Probes every non-reserved 7-bit address once. Used at bring-up to see
//! what actually answers on a board before trusting its variant table.

use heapless::Vec;
use minios_hal::RegisterBus;

/// Most devices a scan reports
pub const SCAN_CAPACITY: usize = 16;

/// First non-reserved 7-bit address
pub const FIRST_ADDRESS: u8 = 0x08;

/// Last non-reserved 7-bit address
pub const LAST_ADDRESS: u8 = 0x77;

/// Return every address that acknowledges, in ascending order
///
/// Only absence is silent; any other bus error is treated the same way
/// so one misbehaving device cannot abort the scan. Results past
/// [`SCAN_CAPACITY`] are dropped.
pub fn scan<B: RegisterBus>(bus: &mut B) -> Vec<u8, SCAN_CAPACITY> {
    let mut found = Vec::new();
    for address in FIRST_ADDRESS..=LAST_ADDRESS {
        if bus.probe(address).is_ok() {
            #[cfg(feature = "defmt")]
            defmt::debug!("I2C device at {=u8:#x}", address);
            if found.push(address).is_err() {
                break;
            }
        }
    }
    found
}
