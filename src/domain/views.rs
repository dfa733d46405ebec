use super::clock::format_hms;
use super::task::Task;

/// One completed task in the completion log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub label: String,
    pub work_time: Option<u64>,
}

impl LogEntry {
    /// Formatted duration, omitted when nothing was measured
    pub fn duration_text(&self) -> Option<String> {
        match self.work_time {
            Some(secs) if secs > 0 => Some(format_hms(secs)),
            _ => None,
        }
    }
}

/// Completed tasks of one day across both lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSummary {
    pub entries: Vec<LogEntry>,
    pub total_seconds: u64,
}

impl CompletionSummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_text(&self) -> String {
        format_hms(self.total_seconds)
    }
}

/// Collect tasks completed on `day`, daily list first, then stock
pub fn summarize_completions(daily: &[Task], stock: &[Task], day: &str) -> CompletionSummary {
    let entries: Vec<LogEntry> = daily
        .iter()
        .chain(stock.iter())
        .filter(|t| t.completed_on(day))
        .map(|t| LogEntry {
            label: t.label.clone(),
            work_time: t.work_time,
        })
        .collect();

    let total_seconds = entries.iter().map(|e| e.work_time.unwrap_or(0)).sum();

    CompletionSummary {
        entries,
        total_seconds,
    }
}

/// Checkbox glyph for a list row
pub fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}
