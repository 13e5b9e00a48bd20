//! Time source for snapshot names
//!
//! Snapshot filenames have second resolution, so tests that create more than
//! one snapshot need to control the clock. Production code uses `SystemClock`.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::Mutex;

/// Supplies the wall-clock time used to name snapshots
pub trait Clock: Send + Sync {
    /// Current local time
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to
///
/// # Example
/// ```
/// use docvault_store::clock::{Clock, ManualClock};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let clock = ManualClock::new(start);
/// clock.advance_secs(5);
/// assert_eq!(clock.now(), start + chrono::Duration::seconds(5));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += Duration::seconds(secs);
    }

    pub fn set(&self, at: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}
