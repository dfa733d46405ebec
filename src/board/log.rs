use crate::domain::{summarize_completions, Clock, CompletionSummary};
use crate::persistence::{load_tasks, KeyValueStore, StorageKeys};
use crate::sync::Subscriber;

/// Summary of tasks completed on `day`, read straight from both lists
pub fn load_completions(store: &dyn KeyValueStore, keys: &StorageKeys, day: &str) -> CompletionSummary {
    let daily = load_tasks(store, &keys.daily);
    let stock = load_tasks(store, &keys.stock);
    summarize_completions(&daily, &stock, day)
}

/// Today's completion log. Holds no persisted state of its own.
#[derive(Debug, Clone)]
pub struct CompletionLog {
    keys: StorageKeys,
    day: String,
    summary: CompletionSummary,
}

impl CompletionLog {
    pub fn init(store: &dyn KeyValueStore, keys: &StorageKeys, clock: &dyn Clock) -> Self {
        let mut log = Self {
            keys: keys.clone(),
            day: clock.today(),
            summary: CompletionSummary::default(),
        };
        log.reload(store, clock);
        log
    }

    pub fn reload(&mut self, store: &dyn KeyValueStore, clock: &dyn Clock) {
        self.day = clock.today();
        self.summary = load_completions(store, &self.keys, &self.day);
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn summary(&self) -> &CompletionSummary {
        &self.summary
    }

    /// True once the calendar day has moved past the one last summarized
    pub fn is_stale(&self, clock: &dyn Clock) -> bool {
        clock.today() != self.day
    }
}

impl Subscriber for CompletionLog {
    fn on_tasks_changed(&mut self, store: &dyn KeyValueStore, clock: &dyn Clock) {
        self.reload(store, clock);
    }
}
