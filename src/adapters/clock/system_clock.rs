use chrono::{DateTime, Utc};

use crate::core::traits::clock::Clock;

/// Wall-clock time in UTC.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
