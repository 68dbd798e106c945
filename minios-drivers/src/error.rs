//! Driver error taxonomy

use minios_hal::BusError;

/// Errors from peripheral drivers
///
/// Every variant is recoverable; the caller decides whether a missing
/// peripheral disables a feature or blocks boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Nothing acknowledged the driver's address
    NotPresent,
    /// A device answered but its identification register is wrong
    IdentityMismatch {
        /// Value the driver requires
        expected: u8,
        /// Value the device reported
        found: u8,
    },
    /// Accessor called before a successful `begin`
    NotInitialized,
    /// A bus transaction failed after the device was found
    Unavailable(BusError),
    /// Register contents did not decode to a valid value
    Corrupt,
    /// Argument out of range (pin number, field value)
    InvalidArgument,
}

impl From<BusError> for DriverError {
    fn from(e: BusError) -> Self {
        DriverError::Unavailable(e)
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DriverError::NotPresent => f.write_str("device not present"),
            DriverError::IdentityMismatch { expected, found } => write!(
                f,
                "identity mismatch: expected {:#04x}, found {:#04x}",
                expected, found
            ),
            DriverError::NotInitialized => f.write_str("device not initialized"),
            DriverError::Unavailable(e) => write!(f, "device unavailable: {}", e),
            DriverError::Corrupt => f.write_str("register contents invalid"),
            DriverError::InvalidArgument => f.write_str("invalid argument"),
        }
    }
}

/// Result type for driver operations
pub type Result<T> = core::result::Result<T, DriverError>;
