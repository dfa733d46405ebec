use serde::{Deserialize, Serialize};

/// A single todo record, shared by the daily and stock lists.
///
/// Field names on disk are camelCase (`completedAt`, `workTime`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque, time-derived id, unique within its list
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub done: bool,
    /// Calendar day ("YYYY-MM-DD") the task was marked done from the stock list
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Timer reading in seconds at the moment the task was marked done
    #[serde(default)]
    pub work_time: Option<u64>,
}

impl Task {
    /// Create a fresh, undone task
    pub fn new(id: String, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            done: false,
            completed_at: None,
            work_time: None,
        }
    }

    /// Whether completion metadata is attached
    pub fn is_stamped(&self) -> bool {
        self.completed_at.is_some() || self.work_time.is_some()
    }

    /// Mark done and stamp the completion day and measured work time
    pub fn complete(&mut self, today: &str, work_seconds: u64) {
        self.done = true;
        self.completed_at = Some(today.to_string());
        self.work_time = Some(work_seconds);
    }

    /// Back to undone; completion metadata is dropped with it
    pub fn reopen(&mut self) {
        self.done = false;
        self.completed_at = None;
        self.work_time = None;
    }

    /// Whether the task counts towards the completion log of `day`
    pub fn completed_on(&self, day: &str) -> bool {
        self.done && self.completed_at.as_deref() == Some(day)
    }
}

/// Prefix for tasks created in the daily list
pub const DAILY_ID_PREFIX: &str = "t";
/// Prefix for tasks moved into the stock list
pub const STOCK_ID_PREFIX: &str = "s";

/// Build an id of the form `<prefix>-<millis>[-<origin>]`.
///
/// The millisecond part is bumped until the id does not collide with any
/// task in `existing`.
pub fn next_id(prefix: &str, now_millis: i64, origin: Option<&str>, existing: &[Task]) -> String {
    let mut millis = now_millis;
    loop {
        let candidate = match origin {
            Some(origin) => format!("{}-{}-{}", prefix, millis, origin),
            None => format!("{}-{}", prefix, millis),
        };
        if !existing.iter().any(|t| t.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
