use std::time::{Duration, Instant};

/// How long the event loop waits for input when nothing is scheduled
pub const IDLE_POLL_MS: u64 = 5_000;

/// Get idle poll duration
pub fn idle_duration() -> Duration {
    Duration::from_millis(IDLE_POLL_MS)
}

/// A repeating display refresh that can be armed and canceled.
///
/// The schedule only decides *when* to redraw; it never touches timer state.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RefreshSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm (or re-arm) the schedule; the first refresh is one interval away
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// How long the event loop may block before the next refresh is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => idle_duration(),
        }
    }

    /// Returns true when a refresh is due and schedules the following one
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                // Skip missed slots instead of bursting after a stall
                let mut next = due + self.interval;
                while next <= now {
                    next += self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}
