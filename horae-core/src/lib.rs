//! Board-agnostic core logic for the Horae real-time-clock driver
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Binary-coded-decimal conversion
//! - Calendar values, leap years and day-of-year tables
//! - The DS3231 register layout and register block codecs
//! - Traits for clock drivers and the host clock that seeds them

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bcd;
pub mod calendar;
pub mod registers;
pub mod traits;

pub use calendar::CalendarTime;
