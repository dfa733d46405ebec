use chrono::{DateTime, Local, NaiveDate};

/// Source of wall-clock time.
///
/// Everything that stamps dates or measures elapsed work goes through this so
/// tests can pin and advance time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Today's calendar day as "YYYY-MM-DD" in local time
    fn today(&self) -> String {
        format_day(self.now().date_naive())
    }
}

/// The real local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Format a calendar day the way completion stamps are stored
pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format whole seconds as "Hh Mm Ss" (e.g. "0h 3m 0s", "12h 0m 5s")
pub fn format_hms(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{}h {}m {}s", h, m, s)
}

#[cfg(test)]
pub use manual::ManualClock;
