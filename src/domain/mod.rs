pub mod clock;
pub mod enums;
pub mod task;
pub mod timer;
pub mod transitions;
pub mod views;

pub use clock::{format_day, format_hms, Clock, SystemClock};
pub use enums::{Change, Focus, UiMode};
pub use task::Task;
pub use timer::TimerState;
pub use views::{checkbox, summarize_completions, CompletionSummary, LogEntry};

#[cfg(test)]
pub use clock::ManualClock;
