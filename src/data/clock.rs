//! Wall-clock sampling for synthesized events.

use std::fmt::Debug;

use chrono::{DateTime, Utc};

/// Display format for event timestamps (UTC, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of "now" for the dashboard reducers.
pub trait Clock: Send + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant. Useful for deterministic tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_has_second_precision() {
        let at = Utc.with_ymd_and_hms(2026, 1, 19, 18, 45, 3).unwrap();
        let clock = FixedClock(at + chrono::Duration::milliseconds(750));
        assert_eq!(format_timestamp(clock.now()), "2026-01-19 18:45:03");
    }

    #[test]
    fn test_system_clock_format_length() {
        assert_eq!(format_timestamp(SystemClock.now()).len(), 19);
    }
}
