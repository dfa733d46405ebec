use super::timer::WorkTimer;
use crate::domain::transitions::{
    return_to_daily, with_completion, with_completion_cleared, without_completed,
};
use crate::domain::{Change, Clock, Task};
use crate::persistence::{load_tasks, save_tasks, KeyValueStore, StorageKeys, StoreError};
use crate::sync::Subscriber;
use tracing::{debug, info};

/// Backlog of tasks deferred from the daily list
#[derive(Debug, Clone)]
pub struct StockList {
    key: String,
    daily_key: String,
    tasks: Vec<Task>,
}

impl StockList {
    pub fn init(store: &dyn KeyValueStore, keys: &StorageKeys) -> Self {
        let tasks = load_tasks(store, &keys.stock);
        debug!(count = tasks.len(), "stock list loaded");
        Self {
            key: keys.stock.clone(),
            daily_key: keys.daily.clone(),
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether "clear completed" has anything to do
    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|t| t.done)
    }

    /// Check or uncheck a task.
    ///
    /// Checking stamps today's date and the current timer reading, then resets
    /// the timer. Unchecking clears the stamp and leaves the timer alone.
    pub fn set_done(
        &mut self,
        store: &mut dyn KeyValueStore,
        clock: &dyn Clock,
        timer: &mut WorkTimer,
        id: &str,
        done: bool,
    ) -> Result<Change, StoreError> {
        if done {
            let work_seconds = timer.current_seconds(clock);
            let Some(next) = with_completion(&self.tasks, id, &clock.today(), work_seconds) else {
                return Ok(Change::Unchanged);
            };
            self.tasks = next;
            self.save(store)?;
            timer.reset(store)?;
            info!(id, work_seconds, "stock task completed");
        } else {
            let Some(next) = with_completion_cleared(&self.tasks, id) else {
                return Ok(Change::Unchanged);
            };
            self.tasks = next;
            self.save(store)?;
            info!(id, "stock task reopened");
        }
        Ok(Change::Shared)
    }

    /// Append the task to the daily list as a fresh undone record and drop it
    /// from stock. Done tasks stay put.
    pub fn return_to_daily(
        &mut self,
        store: &mut dyn KeyValueStore,
        clock: &dyn Clock,
        id: &str,
    ) -> Result<Change, StoreError> {
        let daily = load_tasks(store, &self.daily_key);
        let Some(transfer) = return_to_daily(&self.tasks, &daily, id, clock.now_millis()) else {
            return Ok(Change::Unchanged);
        };

        save_tasks(store, &self.daily_key, &transfer.target)?;
        self.tasks = transfer.source;
        self.save(store)?;
        info!(id, "stock task returned to daily");
        Ok(Change::Shared)
    }

    /// Remove every done task once `confirm` agrees.
    ///
    /// `confirm` is only asked when there is something to clear.
    pub fn clear_completed<F>(&mut self, store: &mut dyn KeyValueStore, confirm: F) -> Result<Change, StoreError>
    where
        F: FnOnce() -> bool,
    {
        let Some(next) = without_completed(&self.tasks) else {
            return Ok(Change::Unchanged);
        };
        if !confirm() {
            debug!("clear completed canceled");
            return Ok(Change::Unchanged);
        }

        let removed = self.tasks.len() - next.len();
        self.tasks = next;
        self.save(store)?;
        info!(removed, "completed stock tasks cleared");
        Ok(Change::Shared)
    }

    fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save_tasks(store, &self.key, &self.tasks)
    }
}

impl Subscriber for StockList {
    fn on_tasks_changed(&mut self, store: &dyn KeyValueStore, _clock: &dyn Clock) {
        self.tasks = load_tasks(store, &self.key);
    }

    fn owns_key(&self, key: &str) -> bool {
        self.key == key
    }
}
