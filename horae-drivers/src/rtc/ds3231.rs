//! DS3231 real-time clock (I2C)
//!
//! The DS3231 is a temperature-compensated RTC with a battery-backed
//! register file. Beyond the calendar registers this driver uses two
//! auxiliary registers:
//!
//! - Alarm 1 seconds (0x07) as a persistent application status byte.
//!   The alarm function itself is never armed.
//! - The TCXO temperature registers (0x11-0x12) as a coarse thermometer
//!   with 0.25°C resolution.
//!
//! # Bus Usage
//!
//! Reads are burst reads from a register pointer. Writes are one
//! register per transaction, so setting the clock takes seven writes and
//! a reader racing that sequence can see a mix of old and new fields.
//! Callers that need atomic snapshots must serialize access themselves.
//!
//! The driver keeps no calendar state; every read goes to the device.

use horae_core::calendar::CalendarTime;
use horae_core::registers::{self, reg, CLOCK_LEN, TEMP_LEN, TIME_LEN};
use horae_core::traits::RealTimeClock;
use horae_hal::{HalBus, I2cBus, I2cBusError, I2cConfig};

/// Fixed 7-bit bus address of the DS3231
pub const DS3231_ADDRESS: u8 = 0x68;

/// Build tag callers compare against to check driver compatibility
pub const DRIVER_IDENTIFIER: &str = "ds3231_radmo3";

/// DS3231 driver errors
///
/// `E` is the bus error type; transport failures are passed through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError<E> {
    /// Nothing answered at [`DS3231_ADDRESS`] during construction
    DeviceNotFound,
    /// Bus transfer failed
    Transport(E),
}

impl<E: core::fmt::Display> core::fmt::Display for RtcError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RtcError::DeviceNotFound => {
                write!(f, "DS3231 not found on I2C bus at {}", DS3231_ADDRESS)
            }
            RtcError::Transport(e) => write!(f, "I2C transfer failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug + core::fmt::Display> std::error::Error for RtcError<E> {}

/// DS3231 driver
///
/// Owns the bus handle plus two scratch buffers sized for the calendar
/// burst read and the time-of-day read.
pub struct Ds3231<BUS> {
    bus: BUS,
    time_buf: [u8; TIME_LEN],
    clock_buf: [u8; CLOCK_LEN],
}

impl<I2C> Ds3231<HalBus<I2C>>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Create a driver directly on an `embedded-hal` I2C master
    pub fn from_i2c(i2c: I2C) -> Result<Self, RtcError<I2cBusError>> {
        Self::new(HalBus::new(i2c))
    }
}

impl<BUS: I2cBus> Ds3231<BUS> {
    /// Bus speed to configure on the master (the device tops out at 400 kHz)
    pub const BUS_CONFIG: I2cConfig = I2cConfig::FAST;

    /// Create a new driver
    ///
    /// Scans the bus and fails with [`RtcError::DeviceNotFound`] if the
    /// device does not answer. No registers are touched.
    pub fn new(mut bus: BUS) -> Result<Self, RtcError<BUS::Error>> {
        if !bus.scan().contains(&DS3231_ADDRESS) {
            #[cfg(feature = "defmt")]
            defmt::warn!("DS3231 not found on I2C bus at {=u8:#x}", DS3231_ADDRESS);
            return Err(RtcError::DeviceNotFound);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("DS3231 present at {=u8:#x}", DS3231_ADDRESS);

        Ok(Self {
            bus,
            time_buf: [0; TIME_LEN],
            clock_buf: [0; CLOCK_LEN],
        })
    }

    /// Give the bus back
    pub fn release(self) -> BUS {
        self.bus
    }

    /// Read the calendar registers and decode them
    ///
    /// 12-hour register contents are normalized to 24-hour, the weekday
    /// is returned 0-based and the day of year is computed.
    pub fn read_time(&mut self) -> Result<CalendarTime, RtcError<BUS::Error>> {
        self.bus
            .read_registers(DS3231_ADDRESS, reg::SECONDS, &mut self.time_buf)
            .map_err(RtcError::Transport)?;
        Ok(registers::decode_time(&self.time_buf))
    }

    /// Write a calendar value, one register at a time
    pub fn write_time(&mut self, time: &CalendarTime) -> Result<(), RtcError<BUS::Error>> {
        let encoded = registers::encode_time(time);

        #[cfg(feature = "defmt")]
        defmt::debug!("DS3231 set to {}", time);

        for (offset, value) in (reg::SECONDS..).zip(encoded) {
            self.write_register(offset, value)?;
        }
        Ok(())
    }

    /// Nudge the time of day by signed deltas
    ///
    /// Seconds and minutes saturate at 0..=59 and hours at 0..=23. A
    /// field that would overflow does not carry into its neighbour.
    pub fn adjust_time(
        &mut self,
        hour_delta: i16,
        minute_delta: i16,
        second_delta: i16,
    ) -> Result<(), RtcError<BUS::Error>> {
        self.bus
            .read_registers(DS3231_ADDRESS, reg::SECONDS, &mut self.clock_buf)
            .map_err(RtcError::Transport)?;

        let adjusted =
            registers::adjust_clock(&self.clock_buf, hour_delta, minute_delta, second_delta);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "DS3231 adjust {}h {}m {}s",
            hour_delta,
            minute_delta,
            second_delta
        );

        for (offset, value) in (reg::SECONDS..).zip(adjusted) {
            self.write_register(offset, value)?;
        }
        Ok(())
    }

    /// Store the application status flag
    ///
    /// The value is clamped to 1..=2 before writing; the stored value is
    /// returned.
    pub fn set_status(&mut self, value: i16) -> Result<u8, RtcError<BUS::Error>> {
        let stored = registers::clamp_status(value);

        #[cfg(feature = "defmt")]
        defmt::trace!("status {} stored as {}", value, stored);

        self.write_register(reg::STATUS, stored)?;
        Ok(stored)
    }

    /// Read the raw status byte
    ///
    /// Not checked against 1..=2; a reset register or another writer can
    /// leave any value here.
    pub fn get_status(&mut self) -> Result<u8, RtcError<BUS::Error>> {
        let mut buf = [0u8; 1];
        self.bus
            .read_registers(DS3231_ADDRESS, reg::STATUS, &mut buf)
            .map_err(RtcError::Transport)?;
        Ok(buf[0])
    }

    /// Read the TCXO temperature in degrees Celsius
    pub fn get_temperature(&mut self) -> Result<f32, RtcError<BUS::Error>> {
        let mut buf = [0u8; TEMP_LEN];
        self.bus
            .read_registers(DS3231_ADDRESS, reg::TEMP_MSB, &mut buf)
            .map_err(RtcError::Transport)?;
        Ok(registers::decode_temperature(&buf))
    }

    /// Driver build tag, see [`DRIVER_IDENTIFIER`]
    pub fn get_identifier(&self) -> &'static str {
        DRIVER_IDENTIFIER
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RtcError<BUS::Error>> {
        self.bus
            .write_register(DS3231_ADDRESS, register, value)
            .map_err(RtcError::Transport)
    }
}

impl<BUS: I2cBus> RealTimeClock for Ds3231<BUS> {
    type Error = RtcError<BUS::Error>;

    fn read_time(&mut self) -> Result<CalendarTime, Self::Error> {
        Ds3231::read_time(self)
    }

    fn write_time(&mut self, time: &CalendarTime) -> Result<(), Self::Error> {
        Ds3231::write_time(self, time)
    }

    fn adjust_time(
        &mut self,
        hour_delta: i16,
        minute_delta: i16,
        second_delta: i16,
    ) -> Result<(), Self::Error> {
        Ds3231::adjust_time(self, hour_delta, minute_delta, second_delta)
    }
}

/// Register-file stand-in for a DS3231 on a bus
#[cfg(test)]
pub struct MockBus {
    /// Register contents, 0x00-0x12
    pub regs: [u8; 0x13],
    /// Addresses reported by a scan
    pub present: &'static [u8],
    /// Every register write, in order
    pub writes: heapless::Vec<(u8, u8), 32>,
    /// Number of burst reads
    pub reads: usize,
    /// Fail every transfer with this error
    pub fail: Option<I2cBusError>,
}

#[cfg(test)]
impl MockBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 0x13],
            present: &[DS3231_ADDRESS],
            writes: heapless::Vec::new(),
            reads: 0,
            fail: None,
        }
    }

    fn check(&self, address: u8) -> Result<(), I2cBusError> {
        if let Some(e) = self.fail {
            return Err(e);
        }
        if address != DS3231_ADDRESS {
            return Err(I2cBusError::Nack);
        }
        Ok(())
    }
}

#[cfg(test)]
impl I2cBus for MockBus {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.check(address)?;
        if let Some((&pointer, payload)) = data.split_first() {
            for (i, &value) in payload.iter().enumerate() {
                let register = pointer + i as u8;
                self.regs[register as usize] = value;
                self.writes.push((register, value)).unwrap();
            }
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.write_read(address, &[0], buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.check(address)?;
        self.reads += 1;
        let start = write_data[0] as usize;
        read_buf.copy_from_slice(&self.regs[start..start + read_buf.len()]);
        Ok(())
    }

    fn scan(&mut self) -> horae_hal::ScanResult {
        self.present.iter().copied().collect()
    }
}
