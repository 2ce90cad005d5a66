//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in horae-core:
//!
//! - Real-time clocks (DS3231 over I2C)

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod rtc;
