//! Calendar abstraction for deterministic testing.
//!
//! Decouples the daily call count from the system clock so day boundaries
//! can be crossed on demand in simulation.

use chrono::{Local, NaiveDate};

/// Source of the current local calendar day.
///
/// Implementations MUST NOT go backwards within one run; the call counter
/// treats any change of day as a rollover.
pub trait Clock: Send + 'static {
    /// Today's date in local time.
    fn today(&self) -> NaiveDate;
}

/// Production clock reading the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
