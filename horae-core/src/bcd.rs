//! Binary-coded-decimal conversion
//!
//! Each nibble holds one decimal digit. Nibbles above 9 are not rejected;
//! they decode to whatever the arithmetic yields.

/// Decode a packed BCD byte (0x59 -> 59)
#[inline]
pub const fn decode(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Encode a value in 0..=99 as packed BCD (59 -> 0x59)
#[inline]
pub const fn encode(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
