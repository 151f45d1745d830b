use chrono::{DateTime, Utc};

/// Port for the current time, so report names are reproducible in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
