use std::fmt::Debug;

use chrono::{DateTime, Duration, Utc};

/// Source of "now" for token-lifetime decisions.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub fn to_chrono(duration: std::time::Duration) -> Duration {
    Duration::from_std(duration).unwrap_or(Duration::MAX)
}

pub fn format_hms(date_time: &DateTime<Utc>) -> String {
    date_time.format("%H:%M:%S").to_string()
}
