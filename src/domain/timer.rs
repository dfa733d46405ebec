use serde::{Deserialize, Serialize};

/// Persisted stopwatch state.
///
/// `start_at` is epoch milliseconds and is set exactly while `running`.
/// Elapsed time is always derived from wall-clock deltas so a suspended
/// process or a slow refresh never loses seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    #[serde(default)]
    pub start_at: Option<i64>,
    #[serde(default)]
    pub elapsed: u64,
    #[serde(default)]
    pub running: bool,
}

impl TimerState {
    /// Repair a loaded state that breaks the running/start_at pairing
    pub fn normalized(self) -> Self {
        match (self.running, self.start_at) {
            (true, None) => Self {
                running: false,
                ..self
            },
            (false, Some(_)) => Self {
                start_at: None,
                ..self
            },
            _ => self,
        }
    }

    /// Start counting from `now_millis`; unchanged when already running
    pub fn started(self, now_millis: i64) -> Self {
        if self.running {
            return self;
        }
        Self {
            start_at: Some(now_millis),
            elapsed: self.elapsed,
            running: true,
        }
    }

    /// Fold the running segment into `elapsed`; unchanged when not running
    pub fn stopped(self, now_millis: i64) -> Self {
        if !self.running {
            return self;
        }
        let segment = self
            .start_at
            .map(|start| whole_seconds_between(start, now_millis))
            .unwrap_or(0);
        Self {
            start_at: None,
            elapsed: self.elapsed.saturating_add(segment),
            running: false,
        }
    }

    /// Total seconds shown on the display at `now_millis`
    pub fn current_seconds(&self, now_millis: i64) -> u64 {
        match (self.running, self.start_at) {
            (true, Some(start)) => self
                .elapsed
                .saturating_add(whole_seconds_between(start, now_millis)),
            _ => self.elapsed,
        }
    }
}

/// Whole seconds from `start` to `end`, clamped at zero for clock skew.
/// Saturates so a corrupt stored `startAt` can't overflow.
fn whole_seconds_between(start: i64, end: i64) -> u64 {
    (end.saturating_sub(start).max(0) / 1000) as u64
}
