//! Calendar values and day-of-year arithmetic
//!
//! The device covers two centuries, 1900-2099, selected by a single flag
//! bit. Day-of-month is never cross-checked against the month length.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First year representable on the device
pub const MIN_YEAR: u16 = 1900;

/// Last year representable on the device
pub const MAX_YEAR: u16 = 2099;

/// Base year when the century flag is set
const CENTURY_BASE_SET: u16 = 2000;

/// Base year when the century flag is clear
const CENTURY_BASE_CLEAR: u16 = 1900;

/// Days per month, index 1 = January. Index 0 anchors the running sum.
const DAYS_PER_MONTH: [u16; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A wall-clock reading as seen at the driver boundary
///
/// Hours are always 24-hour. `weekday` is 0-based (the device stores
/// 1-7). `yearday` is derived and never stored on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarTime {
    /// Year, 1900-2099
    pub year: u16,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub day: u8,
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
    /// Day of week, 0-6
    pub weekday: u8,
    /// Day of year, 1-366
    pub yearday: u16,
}

impl CalendarTime {
    /// Build a calendar value, deriving the day of year
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8, weekday: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday,
            yearday: day_of_year(year, month, day),
        }
    }

    /// Check if this value falls in a leap year
    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }
}

/// Gregorian leap-year rule
pub const fn is_leap_year(year: u16) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Number of days in February for the given year
pub const fn days_in_february(year: u16) -> u16 {
    if is_leap_year(year) {
        29
    } else {
        28
    }
}

/// Cumulative days table for a year
///
/// Entry `n` is the number of days in months 1..=n, so entry `month - 1`
/// is the offset of the first day of `month`.
pub fn cumulative_days(year: u16) -> [u16; 13] {
    let mut days = DAYS_PER_MONTH;
    if is_leap_year(year) {
        days[2] += 1;
    }
    for i in 1..days.len() {
        days[i] += days[i - 1];
    }
    days
}

/// Ordinal day of the year, 1-based
///
/// Month values outside 1-12 (possible when a register holds garbage)
/// are pinned to the nearest table entry instead of panicking.
pub fn day_of_year(year: u16, month: u8, day: u8) -> u16 {
    let table = cumulative_days(year);
    let index = usize::from(month.saturating_sub(1)).min(table.len() - 1);
    table[index] + u16::from(day)
}

/// Split a year into the century flag and the two-digit year
///
/// Years from 2000 set the flag; anything earlier counts from 1900.
pub const fn split_century(year: u16) -> (bool, u8) {
    if year >= CENTURY_BASE_SET {
        (true, (year - CENTURY_BASE_SET) as u8)
    } else {
        (false, year.saturating_sub(CENTURY_BASE_CLEAR) as u8)
    }
}

/// Rebuild a full year from the century flag and two-digit year
pub const fn join_century(century: bool, year_in_century: u8) -> u16 {
    let base = if century {
        CENTURY_BASE_SET
    } else {
        CENTURY_BASE_CLEAR
    };
    base + year_in_century as u16
}
