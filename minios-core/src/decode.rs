//! Register field decoding
//!
//! Pure functions that turn raw register bytes into numbers. Each chip
//! packs its fields differently:
//!
//! - RTC time and date registers hold binary-coded decimal
//! - PMU ADC results are 14-bit codes split across a high byte with six
//!   significant bits and a full low byte ("H6L8")
//! - Touch coordinates are 12-bit values split across a nibble and a byte
//! - IMU axes are little-endian two's-complement 16-bit words

/// Full-scale divisor for a signed 16-bit sensor word
pub const I16_FULL_SCALE: f32 = 32768.0;

/// Convert a packed BCD byte to its decimal value
///
/// Both nibbles are expected to be 0-9; the caller masks off flag bits
/// first.
pub const fn bcd_to_dec(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Convert a decimal value (0-99) to packed BCD
pub const fn dec_to_bcd(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}

/// Check that both nibbles of a byte are decimal digits
pub const fn is_valid_bcd(bcd: u8) -> bool {
    (bcd >> 4) <= 9 && (bcd & 0x0F) <= 9
}

/// Combine an H6L8 register pair into a 14-bit code
///
/// The high byte is masked to its six significant bits.
pub const fn h6l8(high: u8, low: u8) -> u16 {
    (((high & 0x3F) as u16) << 8) | low as u16
}

/// Combine a nibble-and-byte pair into a 12-bit value
///
/// Upper bits of `high` carry event flags and are discarded.
pub const fn nibble12(high: u8, low: u8) -> u16 {
    (((high & 0x0F) as u16) << 8) | low as u16
}

/// Decode a little-endian signed 16-bit word
pub const fn le_i16(low: u8, high: u8) -> i16 {
    i16::from_le_bytes([low, high])
}

/// Decode three consecutive little-endian signed words (X, Y, Z)
pub const fn le_i16_xyz(raw: [u8; 6]) -> [i16; 3] {
    [
        le_i16(raw[0], raw[1]),
        le_i16(raw[2], raw[3]),
        le_i16(raw[4], raw[5]),
    ]
}

/// Scale a signed 16-bit reading by its configured full-scale range
///
/// `full_scale` is the physical value at raw `±32768` (e.g. 8.0 for ±8g).
pub fn scale_i16(raw: i16, full_scale: f32) -> f32 {
    raw as f32 * (full_scale / I16_FULL_SCALE)
}
