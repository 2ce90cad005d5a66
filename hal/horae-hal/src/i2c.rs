//! I2C bus abstractions
//!
//! Provides the register-addressed bus contract consumed by the clock
//! driver, and an adapter for blocking `embedded-hal` I2C masters.

use embedded_hal::i2c::{Error as _, ErrorKind};

/// First non-reserved 7-bit address
pub const FIRST_ADDRESS: u8 = 0x08;

/// Last non-reserved 7-bit address
pub const LAST_ADDRESS: u8 = 0x77;

/// Number of addresses a scan can report
pub const SCAN_CAPACITY: usize = (LAST_ADDRESS - FIRST_ADDRESS + 1) as usize;

/// Addresses that acknowledged during a bus scan, in ascending order
pub type ScanResult = heapless::Vec<u8, SCAN_CAPACITY>;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Register helpers are provided on top of the three
/// primitive transfers.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges its address
    ///
    /// Issues an empty write. Any failure counts as "absent".
    fn probe(&mut self, address: u8) -> bool {
        self.write(address, &[]).is_ok()
    }

    /// Probe every non-reserved 7-bit address
    fn scan(&mut self) -> ScanResult {
        let mut found = ScanResult::new();
        for address in FIRST_ADDRESS..=LAST_ADDRESS {
            if self.probe(address) {
                // Capacity covers the whole address range.
                let _ = found.push(address);
            }
        }
        found
    }

    /// Block read of `buf.len()` bytes starting at register `reg`
    fn read_registers(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.write_read(address, &[reg], buf)
    }

    /// Single-byte register write
    fn write_register(&mut self, address: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[reg, value])
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).write_read(address, write_data, read_buf)
    }

    fn probe(&mut self, address: u8) -> bool {
        (**self).probe(address)
    }

    fn scan(&mut self) -> ScanResult {
        (**self).scan()
    }

    fn read_registers(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_registers(address, reg, buf)
    }

    fn write_register(&mut self, address: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_register(address, reg, value)
    }
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Overrun
    Overrun,
    /// Other error (including timeouts reported by the platform)
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl core::fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            I2cBusError::Bus => "bus error",
            I2cBusError::ArbitrationLost => "arbitration lost",
            I2cBusError::Nack => "no acknowledge",
            I2cBusError::Overrun => "overrun",
            I2cBusError::Other => "i2c error",
        };
        f.write_str(msg)
    }
}

/// Adapter for blocking `embedded-hal` 1.0 I2C masters
///
/// Platform errors are reduced to [`I2cBusError`] through their
/// `ErrorKind`.
pub struct HalBus<I2C> {
    i2c: I2C,
}

impl<I2C> HalBus<I2C> {
    /// Wrap an I2C master
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the wrapped master back
    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

impl<I2C> I2cBus for HalBus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c
            .read(address, buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
