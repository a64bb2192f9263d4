//! Manually driven calendar.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Days, NaiveDate};
use wfc_core::Clock;

/// Clock whose day only changes when a test says so.
///
/// Clones share the same day, so a test keeps one handle while the
/// [`wfc_core::Monitor`] owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    /// Clock stopped at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Arc::new(Mutex::new(today)) }
    }

    /// Jump to `day`. Callers must not move backwards.
    pub fn set(&self, day: NaiveDate) {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner) = day;
    }

    /// Advance by `days` calendar days and return the new day.
    pub fn advance_days(&self, days: u64) -> NaiveDate {
        let mut today = self.today.lock().unwrap_or_else(PoisonError::into_inner);
        *today = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        *today
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
