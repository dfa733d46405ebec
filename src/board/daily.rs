use crate::domain::transitions::{move_unfinished, with_done_set, with_task_added};
use crate::domain::{Change, Clock, Task};
use crate::persistence::{load_tasks, save_tasks, KeyValueStore, StorageKeys, StoreError};
use crate::sync::Subscriber;
use tracing::{debug, info};

/// Today's task list
#[derive(Debug, Clone)]
pub struct DailyList {
    key: String,
    stock_key: String,
    tasks: Vec<Task>,
}

impl DailyList {
    pub fn init(store: &dyn KeyValueStore, keys: &StorageKeys) -> Self {
        let tasks = load_tasks(store, &keys.daily);
        debug!(count = tasks.len(), "daily list loaded");
        Self {
            key: keys.daily.clone(),
            stock_key: keys.stock.clone(),
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn has_unfinished(&self) -> bool {
        self.tasks.iter().any(|t| !t.done)
    }

    /// Append a task from user input; blank input is ignored
    pub fn add(&mut self, store: &mut dyn KeyValueStore, clock: &dyn Clock, text: &str) -> Result<Change, StoreError> {
        let Some(next) = with_task_added(&self.tasks, text, clock.now_millis()) else {
            return Ok(Change::Unchanged);
        };
        self.tasks = next;
        self.save(store)?;
        Ok(Change::Local)
    }

    /// Match the task's checkbox state
    pub fn set_done(&mut self, store: &mut dyn KeyValueStore, id: &str, done: bool) -> Result<Change, StoreError> {
        let was_stamped = self.tasks.iter().any(|t| t.id == id && t.is_stamped());
        let Some(next) = with_done_set(&self.tasks, id, done) else {
            return Ok(Change::Unchanged);
        };
        self.tasks = next;
        self.save(store)?;
        // Dropping a completion stamp changes what the log shows
        Ok(if was_stamped { Change::Shared } else { Change::Local })
    }

    /// Empty the whole list
    pub fn clear(&mut self, store: &mut dyn KeyValueStore) -> Result<Change, StoreError> {
        if self.tasks.is_empty() {
            return Ok(Change::Unchanged);
        }
        let had_stamped = self.tasks.iter().any(Task::is_stamped);
        self.tasks.clear();
        info!("daily list cleared");
        self.save(store)?;
        Ok(if had_stamped { Change::Shared } else { Change::Local })
    }

    /// Send every unfinished task to the end of the stock list.
    ///
    /// The stock list is re-read from the store so a stale copy held by the
    /// stock controller is never written back.
    pub fn move_unfinished_to_stock(
        &mut self,
        store: &mut dyn KeyValueStore,
        clock: &dyn Clock,
    ) -> Result<Change, StoreError> {
        let stock = load_tasks(store, &self.stock_key);
        let Some(transfer) = move_unfinished(&self.tasks, &stock, clock.now_millis()) else {
            return Ok(Change::Unchanged);
        };

        let moved = transfer.target.len() - stock.len();
        save_tasks(store, &self.stock_key, &transfer.target)?;
        self.tasks = transfer.source;
        self.save(store)?;
        info!(moved, "unfinished tasks moved to stock");
        Ok(Change::Shared)
    }

    fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save_tasks(store, &self.key, &self.tasks)
    }
}

impl Subscriber for DailyList {
    fn on_tasks_changed(&mut self, store: &dyn KeyValueStore, _clock: &dyn Clock) {
        self.tasks = load_tasks(store, &self.key);
    }

    fn owns_key(&self, key: &str) -> bool {
        self.key == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManualClock;
    use crate::persistence::MemoryStore;
    use pretty_assertions::assert_eq;

    fn setup() -> (MemoryStore, ManualClock, DailyList) {
        let store = MemoryStore::new();
        let clock = ManualClock::at(2024, 1, 1, 9, 0, 0);
        let daily = DailyList::init(&store, &StorageKeys::default());
        (store, clock, daily)
    }

    fn persisted(store: &MemoryStore, key: &str) -> Vec<Task> {
        load_tasks(store, key)
    }

    #[test]
    fn test_every_operation_round_trips_through_storage() {
        let (mut store, clock, mut daily) = setup();

        daily.add(&mut store, &clock, "Write report").unwrap();
        assert_eq!(persisted(&store, "daily-todo"), daily.tasks());

        clock.advance_millis(1);
        daily.add(&mut store, &clock, "Email Sam").unwrap();
        assert_eq!(persisted(&store, "daily-todo"), daily.tasks());

        let id = daily.tasks()[0].id.clone();
        daily.set_done(&mut store, &id, true).unwrap();
        assert_eq!(persisted(&store, "daily-todo"), daily.tasks());

        daily.set_done(&mut store, &id, false).unwrap();
        assert_eq!(persisted(&store, "daily-todo"), daily.tasks());

        daily.clear(&mut store).unwrap();
        assert_eq!(persisted(&store, "daily-todo"), Vec::<Task>::new());
    }

    #[test]
    fn test_add_ignores_blank_input() {
        let (mut store, clock, mut daily) = setup();
        assert_eq!(daily.add(&mut store, &clock, "   ").unwrap(), Change::Unchanged);
        assert!(daily.tasks().is_empty());
        assert_eq!(store.get("daily-todo").unwrap(), None);
    }

    #[test]
    fn test_toggle_has_no_log_side_effect() {
        let (mut store, clock, mut daily) = setup();
        daily.add(&mut store, &clock, "a").unwrap();
        let id = daily.tasks()[0].id.clone();

        assert_eq!(daily.set_done(&mut store, &id, true).unwrap(), Change::Local);
        assert!(daily.tasks()[0].done);
        assert_eq!(daily.tasks()[0].completed_at, None);
        assert_eq!(daily.tasks()[0].work_time, None);
    }

    #[test]
    fn test_move_unfinished_to_stock() {
        let (mut store, clock, mut daily) = setup();
        for label in ["one", "two", "three"] {
            daily.add(&mut store, &clock, label).unwrap();
            clock.advance_millis(1);
        }
        let done_id = daily.tasks()[1].id.clone();
        daily.set_done(&mut store, &done_id, true).unwrap();
        save_tasks(&mut store, "stock-todo", &[Task::new("s-1-t-0".to_string(), "old")]).unwrap();

        let change = daily.move_unfinished_to_stock(&mut store, &clock).unwrap();

        assert_eq!(change, Change::Shared);
        assert_eq!(daily.tasks().len(), 1);
        assert_eq!(daily.tasks()[0].label, "two");
        assert_eq!(persisted(&store, "daily-todo"), daily.tasks());

        let stock = persisted(&store, "stock-todo");
        let labels: Vec<&str> = stock.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["old", "one", "three"]);
        assert!(stock[1].id.starts_with("s-"));
        assert!(stock.iter().all(|t| !t.done));
    }

    #[test]
    fn test_move_with_nothing_unfinished_is_noop() {
        let (mut store, clock, mut daily) = setup();
        daily.add(&mut store, &clock, "a").unwrap();
        let id = daily.tasks()[0].id.clone();
        daily.set_done(&mut store, &id, true).unwrap();
        let before = store.clone();

        let change = daily.move_unfinished_to_stock(&mut store, &clock).unwrap();

        assert_eq!(change, Change::Unchanged);
        assert_eq!(store.get("stock-todo").unwrap(), before.get("stock-todo").unwrap());
        assert_eq!(store.get("daily-todo").unwrap(), before.get("daily-todo").unwrap());
    }

    #[test]
    fn test_clear_of_stamped_task_is_shared() {
        let (mut store, _clock, _) = setup();
        let mut stamped = Task::new("t-1".to_string(), "a");
        stamped.complete("2024-01-01", 10);
        save_tasks(&mut store, "daily-todo", &[stamped]).unwrap();
        let mut daily = DailyList::init(&store, &StorageKeys::default());

        assert_eq!(daily.clear(&mut store).unwrap(), Change::Shared);
        assert_eq!(daily.clear(&mut store).unwrap(), Change::Unchanged);
    }

    #[test]
    fn test_reload_on_notification() {
        let (mut store, clock, mut daily) = setup();
        save_tasks(&mut store, "daily-todo", &[Task::new("t-7".to_string(), "from stock")]).unwrap();
        daily.on_tasks_changed(&store, &clock);
        assert_eq!(daily.tasks().len(), 1);
        assert_eq!(daily.tasks()[0].label, "from stock");
    }
}
