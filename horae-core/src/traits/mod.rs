//! Clock abstraction traits
//!
//! These traits define the interface between the application and the
//! clock hardware, and between the driver and the host's own clock.

pub mod clock;

pub use clock::{HostClock, RealTimeClock};
