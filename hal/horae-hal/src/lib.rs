//! Horae Hardware Abstraction Layer
//!
//! This crate defines the bus abstraction the clock driver is written
//! against. Any blocking `embedded-hal` I2C master can be plugged in
//! through [`i2c::HalBus`], and test doubles implement [`i2c::I2cBus`]
//! directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (owns the bus and clock)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  horae-drivers (Ds3231 register driver) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  horae-hal (this crate - bus traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal I2C master (platform HAL) │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{HalBus, I2cBus, I2cBusError, I2cConfig, ScanResult};
