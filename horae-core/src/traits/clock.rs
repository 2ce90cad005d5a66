//! Real-time clock and host clock traits

use crate::calendar::CalendarTime;

/// Source of the host's current local time
///
/// Implemented by the platform (an NTP-synced system clock, a GPS fix,
/// a value typed in by the user). Only used to seed the device.
pub trait HostClock {
    /// Current local calendar time, weekday 0-based
    fn now(&self) -> CalendarTime;
}

impl<T: HostClock + ?Sized> HostClock for &T {
    fn now(&self) -> CalendarTime {
        (**self).now()
    }
}

/// Trait for battery-backed calendar clocks
///
/// Every call goes to the device; implementations keep no cached time.
pub trait RealTimeClock {
    /// Error type for clock operations
    type Error;

    /// Read the current calendar time from the device
    fn read_time(&mut self) -> Result<CalendarTime, Self::Error>;

    /// Write a calendar time to the device
    ///
    /// Fields may be written one register at a time, so a concurrent
    /// reader can observe a torn value.
    fn write_time(&mut self, time: &CalendarTime) -> Result<(), Self::Error>;

    /// Copy the host's current time into the device
    fn write_from_host_clock<C: HostClock + ?Sized>(&mut self, clock: &C) -> Result<(), Self::Error> {
        let now = clock.now();
        self.write_time(&now)
    }

    /// Nudge hours, minutes and seconds by signed deltas
    ///
    /// Each field saturates at its own bounds instead of carrying.
    fn adjust_time(
        &mut self,
        hour_delta: i16,
        minute_delta: i16,
        second_delta: i16,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(CalendarTime);

    impl HostClock for FixedClock {
        fn now(&self) -> CalendarTime {
            self.0
        }
    }

    /// Clock that only remembers the last written value
    #[derive(Default)]
    struct MemoryClock {
        written: Option<CalendarTime>,
    }

    impl RealTimeClock for MemoryClock {
        type Error = ();

        fn read_time(&mut self) -> Result<CalendarTime, ()> {
            self.written.ok_or(())
        }

        fn write_time(&mut self, time: &CalendarTime) -> Result<(), ()> {
            self.written = Some(*time);
            Ok(())
        }

        fn adjust_time(&mut self, _: i16, _: i16, _: i16) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_from_host_clock_uses_now() {
        let host = FixedClock(CalendarTime::new(2025, 10, 26, 3, 0, 0, 6));
        let mut rtc = MemoryClock::default();

        rtc.write_from_host_clock(&host).unwrap();
        assert_eq!(rtc.read_time().unwrap(), host.0);
    }
}
