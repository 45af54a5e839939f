//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Instant used by fixtures that need a stable "now": 2024-09-02 08:30 UTC.
///
/// # Panics
/// Never in practice; the literal date is valid.
pub fn fixture_instant() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 9, 2, 8, 30, 0).single() {
        Some(instant) => instant,
        None => panic!("fixture instant must be a valid UTC timestamp"),
    }
}

/// Clock whose time only moves when a test says so.
///
/// # Examples
/// ```
/// use mockable::Clock;
/// use school_backend::test_support::{MutableClock, fixture_instant};
///
/// let clock = MutableClock::new(fixture_instant());
/// clock.advance_days(1);
/// assert_eq!(clock.utc() - fixture_instant(), chrono::TimeDelta::days(1));
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Shared clock starting at [`fixture_instant`].
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new(fixture_instant()))
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
