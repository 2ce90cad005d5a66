//! DS3231 register layout and register block codecs
//!
//! # Register Map
//!
//! ```text
//! 0x00 seconds   BCD 00-59
//! 0x01 minutes   BCD 00-59
//! 0x02 hours     bit6 = 12h mode, bit5 = PM (12h) / 20h (24h)
//! 0x03 weekday   1-7
//! 0x04 date      BCD 01-31
//! 0x05 month     bit7 = century, BCD 01-12
//! 0x06 year      BCD 00-99
//! 0x07 status    alarm 1 seconds, repurposed as a 1-byte flag
//! 0x11 temp MSB  sign bit + integer part
//! 0x12 temp LSB  bits 7:6 = quarter degrees
//! ```
//!
//! The codecs here are pure; the driver feeds them the bytes it read
//! and writes back the bytes they produce.

use crate::bcd;
use crate::calendar::{self, CalendarTime};

/// Register addresses
pub mod reg {
    /// Seconds
    pub const SECONDS: u8 = 0x00;
    /// Minutes
    pub const MINUTES: u8 = 0x01;
    /// Hours
    pub const HOURS: u8 = 0x02;
    /// Day of week
    pub const WEEKDAY: u8 = 0x03;
    /// Day of month
    pub const DATE: u8 = 0x04;
    /// Month and century flag
    pub const MONTH: u8 = 0x05;
    /// Two-digit year
    pub const YEAR: u8 = 0x06;
    /// Application status byte (alarm 1 seconds register)
    pub const STATUS: u8 = 0x07;
    /// Temperature, integer part
    pub const TEMP_MSB: u8 = 0x11;
    /// Temperature, fractional part
    pub const TEMP_LSB: u8 = 0x12;
}

/// Bit masks within registers
pub mod bits {
    /// Hours register: 12-hour mode select
    pub const HOUR_12H: u8 = 0x40;
    /// Hours register: PM flag in 12-hour mode
    pub const HOUR_PM: u8 = 0x20;
    /// Hours register: BCD hour in 12-hour mode
    pub const HOUR_12H_VALUE: u8 = 0x1F;
    /// Month register: century flag
    pub const CENTURY: u8 = 0x80;
    /// Month register: BCD month
    pub const MONTH_VALUE: u8 = 0x1F;
    /// Temperature MSB: sign
    pub const TEMP_SIGN: u8 = 0x80;
    /// Temperature LSB: quarter degrees
    pub const TEMP_FRACTION: u8 = 0xC0;
}

/// Registers 0x00-0x06
pub const TIME_LEN: usize = 7;

/// Registers 0x00-0x02
pub const CLOCK_LEN: usize = 3;

/// Registers 0x11-0x12
pub const TEMP_LEN: usize = 2;

/// Lowest value the status accessor stores
pub const STATUS_MIN: u8 = 1;

/// Highest value the status accessor stores
pub const STATUS_MAX: u8 = 2;

/// Temperature resolution in degrees Celsius
pub const TEMP_RESOLUTION: f32 = 0.25;

/// Decode the hours register to 0-23
///
/// In 12-hour mode the low five bits hold the hour and 12 is added when
/// the PM flag is set. In 24-hour mode the whole byte is BCD.
pub const fn decode_hour(raw: u8) -> u8 {
    if raw & bits::HOUR_12H != 0 {
        let hour = bcd::decode(raw & bits::HOUR_12H_VALUE);
        if raw & bits::HOUR_PM != 0 {
            hour + 12
        } else {
            hour
        }
    } else {
        bcd::decode(raw)
    }
}

/// Decode registers 0x00-0x06 into a calendar value
pub fn decode_time(raw: &[u8; TIME_LEN]) -> CalendarTime {
    let year = calendar::join_century(raw[5] & bits::CENTURY != 0, bcd::decode(raw[6]));
    let month = bcd::decode(raw[5] & bits::MONTH_VALUE);
    let day = bcd::decode(raw[4]);

    CalendarTime {
        year,
        month,
        day,
        hour: decode_hour(raw[2]),
        minute: bcd::decode(raw[1]),
        second: bcd::decode(raw[0]),
        weekday: raw[3].wrapping_sub(1),
        yearday: calendar::day_of_year(year, month, day),
    }
}

/// Encode a calendar value into registers 0x00-0x06
///
/// Hours are always written in 24-hour mode. The weekday is shifted back
/// to 1-7 and the century flag follows the year.
pub fn encode_time(time: &CalendarTime) -> [u8; TIME_LEN] {
    let (century, year) = calendar::split_century(time.year);
    let mut month = bcd::encode(time.month);
    if century {
        month |= bits::CENTURY;
    }

    [
        bcd::encode(time.second),
        bcd::encode(time.minute),
        bcd::encode(time.hour),
        bcd::encode(time.weekday.wrapping_add(1)),
        bcd::encode(time.day),
        month,
        bcd::encode(year),
    ]
}

/// Apply signed deltas to registers 0x00-0x02
///
/// Each field saturates at its own bounds; nothing carries into the
/// neighbouring field. The hours byte is read as plain 24-hour BCD.
pub fn adjust_clock(
    raw: &[u8; CLOCK_LEN],
    hour_delta: i16,
    minute_delta: i16,
    second_delta: i16,
) -> [u8; CLOCK_LEN] {
    [
        bcd::encode(nudge(bcd::decode(raw[0]), second_delta, 59)),
        bcd::encode(nudge(bcd::decode(raw[1]), minute_delta, 59)),
        bcd::encode(nudge(bcd::decode(raw[2]), hour_delta, 23)),
    ]
}

/// Add a delta and clamp to `0..=max`
pub fn nudge(value: u8, delta: i16, max: u8) -> u8 {
    (i16::from(value).saturating_add(delta)).clamp(0, i16::from(max)) as u8
}

/// Clamp a requested status value to the stored range
pub fn clamp_status(value: i16) -> u8 {
    value.clamp(i16::from(STATUS_MIN), i16::from(STATUS_MAX)) as u8
}

/// Decode the temperature registers to degrees Celsius
///
/// The magnitude is the whole MSB (sign bit included) plus the quarter
/// degrees from the LSB; the sign bit then negates the result.
pub fn decode_temperature(raw: &[u8; TEMP_LEN]) -> f32 {
    let quarters = (raw[1] & bits::TEMP_FRACTION) >> 6;
    let magnitude = f32::from(raw[0]) + f32::from(quarters) * TEMP_RESOLUTION;
    if raw[0] & bits::TEMP_SIGN != 0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_24h_hour() {
        assert_eq!(decode_hour(0x00), 0);
        assert_eq!(decode_hour(0x09), 9);
        assert_eq!(decode_hour(0x23), 23);
    }

    #[test]
    fn test_decode_12h_hour() {
        // 12h mode, PM, BCD 3
        assert_eq!(decode_hour(bits::HOUR_12H | bits::HOUR_PM | 0x03), 15);
        // 12h mode, AM, BCD 11
        assert_eq!(decode_hour(bits::HOUR_12H | 0x11), 11);
    }

    #[test]
    fn test_decode_time() {
        // 2024-02-29 13:45:30, Thursday (stored as 5)
        let raw = [0x30, 0x45, 0x13, 0x05, 0x29, 0x82, 0x24];
        let t = decode_time(&raw);
        assert_eq!(t.year, 2024);
        assert_eq!(t.month, 2);
        assert_eq!(t.day, 29);
        assert_eq!(t.hour, 13);
        assert_eq!(t.minute, 45);
        assert_eq!(t.second, 30);
        assert_eq!(t.weekday, 4);
        assert_eq!(t.yearday, 60);
    }

    #[test]
    fn test_decode_time_last_century() {
        let raw = [0x00, 0x00, 0x00, 0x01, 0x01, 0x03, 0x00];
        let t = decode_time(&raw);
        assert_eq!(t.year, 1900);
        assert_eq!(t.month, 3);
        assert_eq!(t.yearday, 60);
        assert_eq!(t.weekday, 0);
    }

    #[test]
    fn test_encode_time() {
        let t = CalendarTime::new(2024, 12, 31, 23, 59, 58, 1);
        assert_eq!(encode_time(&t), [0x58, 0x59, 0x23, 0x02, 0x31, 0x92, 0x24]);

        let t = CalendarTime::new(1999, 12, 31, 0, 0, 0, 6);
        assert_eq!(encode_time(&t), [0x00, 0x00, 0x00, 0x07, 0x31, 0x12, 0x99]);
    }

    #[test]
    fn test_adjust_clamps_seconds() {
        // 10:30:58 + 5s stays in the same minute
        let out = adjust_clock(&[0x58, 0x30, 0x10], 0, 0, 5);
        assert_eq!(out, [0x59, 0x30, 0x10]);
    }

    #[test]
    fn test_adjust_clamps_low() {
        let out = adjust_clock(&[0x02, 0x00, 0x00], -1, -1, -5);
        assert_eq!(out, [0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_adjust_hour_for_dst() {
        let out = adjust_clock(&[0x00, 0x00, 0x02], 1, 0, 0);
        assert_eq!(out, [0x00, 0x00, 0x03]);

        let out = adjust_clock(&[0x00, 0x00, 0x23], 1, 0, 0);
        assert_eq!(out[2], 0x23);
    }

    #[test]
    fn test_nudge_extreme_delta() {
        assert_eq!(nudge(30, i16::MAX, 59), 59);
        assert_eq!(nudge(30, i16::MIN, 59), 0);
    }

    #[test]
    fn test_clamp_status() {
        assert_eq!(clamp_status(0), 1);
        assert_eq!(clamp_status(-7), 1);
        assert_eq!(clamp_status(1), 1);
        assert_eq!(clamp_status(2), 2);
        assert_eq!(clamp_status(5), 2);
    }

    #[test]
    fn test_temperature() {
        assert_eq!(decode_temperature(&[0x19, 0x40]), 25.25);
        assert_eq!(decode_temperature(&[0x19, 0xC0]), 25.75);
        assert_eq!(decode_temperature(&[0x00, 0x00]), 0.0);

        let negative = decode_temperature(&[0x9C, 0x00]);
        assert!(negative < 0.0);
        assert_eq!(negative, -156.0);
    }

    proptest! {
        #[test]
        fn prop_date_round_trip(year in 1900u16..=2099, month in 1u8..=12, day in 1u8..=31) {
            let t = CalendarTime::new(year, month, day, 0, 0, 0, 0);
            let back = decode_time(&encode_time(&t));
            prop_assert_eq!(back.year, year);
            prop_assert_eq!(back.month, month);
            prop_assert_eq!(back.day, day);
        }

        #[test]
        fn prop_time_round_trip(hour in 0u8..=23, minute in 0u8..=59, second in 0u8..=59, weekday in 0u8..=6) {
            let t = CalendarTime::new(2024, 6, 15, hour, minute, second, weekday);
            prop_assert_eq!(decode_time(&encode_time(&t)), t);
        }

        #[test]
        fn prop_adjust_stays_in_range(s in 0u8..=59, m in 0u8..=59, h in 0u8..=23,
                                      ds in -200i16..200, dm in -200i16..200, dh in -50i16..50) {
            let raw = [bcd::encode(s), bcd::encode(m), bcd::encode(h)];
            let out = adjust_clock(&raw, dh, dm, ds);
            prop_assert!(bcd::decode(out[0]) <= 59);
            prop_assert!(bcd::decode(out[1]) <= 59);
            prop_assert!(bcd::decode(out[2]) <= 23);
        }
    }
}
