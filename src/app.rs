use crate::board::{CompletionLog, DailyList, StockList, WorkTimer};
use crate::domain::{Change, Clock, Focus, UiMode};
use crate::persistence::{AppConfig, KeyValueStore, StoreError};
use crate::sync::{Subscriber, SyncBus};
use std::time::Instant;
use tracing::error;

/// Main application state
pub struct AppState {
    pub store: Box<dyn KeyValueStore>,
    pub clock: Box<dyn Clock>,
    pub config: AppConfig,

    pub daily: DailyList,
    pub stock: StockList,
    pub timer: WorkTimer,
    pub log: CompletionLog,
    pub sync: SyncBus,

    pub focus: Focus,
    pub daily_selected: usize,
    pub stock_selected: usize,
    pub ui_mode: UiMode,
    pub input: String,
    /// Last error shown in the status line
    pub status: Option<String>,
}

impl AppState {
    pub fn new(store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>, config: AppConfig) -> Self {
        let keys = &config.keys;
        let daily = DailyList::init(store.as_ref(), keys);
        let stock = StockList::init(store.as_ref(), keys);
        let timer = WorkTimer::init(store.as_ref(), &keys.timer, config.refresh_interval());
        let log = CompletionLog::init(store.as_ref(), keys, clock.as_ref());

        Self {
            store,
            clock,
            config,
            daily,
            stock,
            timer,
            log,
            sync: SyncBus::new(),
            focus: Focus::Daily,
            daily_selected: 0,
            stock_selected: 0,
            ui_mode: UiMode::Normal,
            input: String::new(),
            status: None,
        }
    }

    /// Broadcast "task data changed" to every list-backed view
    fn notify(&mut self) {
        let mut subscribers: [&mut dyn Subscriber; 3] =
            [&mut self.daily, &mut self.stock, &mut self.log];
        self.sync
            .broadcast(self.store.as_ref(), self.clock.as_ref(), &mut subscribers);
        self.clamp_selection();
    }

    /// Reload every view except the writer of `failed_key`.
    ///
    /// A cross-list action may have landed its first write before the second
    /// one failed; the failing list keeps its in-memory change for its next
    /// save.
    fn resync_after_failure(&mut self, failed_key: &str) {
        let subscribers: [&mut dyn Subscriber; 3] =
            [&mut self.daily, &mut self.stock, &mut self.log];
        let mut affected: Vec<&mut dyn Subscriber> = subscribers
            .into_iter()
            .filter(|s| !s.owns_key(failed_key))
            .collect();
        self.sync
            .broadcast(self.store.as_ref(), self.clock.as_ref(), &mut affected);
    }

    /// Settle a controller result: broadcast shared changes, surface errors
    fn apply(&mut self, result: Result<Change, StoreError>) {
        match result {
            Ok(change) => {
                self.status = None;
                if change.needs_broadcast() {
                    self.notify();
                }
            }
            Err(e) => {
                error!(error = %e, key = e.key(), "failed to persist change");
                self.status = Some(format!("Save failed: {}", e));
                self.resync_after_failure(e.key());
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.daily_selected = clamp(self.daily_selected, self.daily.tasks().len());
        self.stock_selected = clamp(self.stock_selected, self.stock.tasks().len());
    }

    /// Switch keyboard focus between the two lists
    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
    }

    pub fn move_selection_up(&mut self) {
        let selected = self.selected_mut();
        *selected = selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = match self.focus {
            Focus::Daily => self.daily.tasks().len(),
            Focus::Stock => self.stock.tasks().len(),
        };
        let selected = self.selected_mut();
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Daily => &mut self.daily_selected,
            Focus::Stock => &mut self.stock_selected,
        }
    }

    /// Id and done flag of the selected row in the focused list
    fn selected_task(&self) -> Option<(String, bool)> {
        let (tasks, index) = match self.focus {
            Focus::Daily => (self.daily.tasks(), self.daily_selected),
            Focus::Stock => (self.stock.tasks(), self.stock_selected),
        };
        tasks.get(index).map(|t| (t.id.clone(), t.done))
    }

    /// Open the add-task input form
    pub fn start_add_task(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Submit the input form to the daily list
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        let result = self.daily.add(self.store.as_mut(), self.clock.as_ref(), &text);
        self.apply(result);
        self.ui_mode = UiMode::Normal;
    }

    /// Flip the checkbox of the selected row in the focused list
    pub fn toggle_selected_done(&mut self) {
        let Some((id, done)) = self.selected_task() else {
            return;
        };
        let result = match self.focus {
            Focus::Daily => self.daily.set_done(self.store.as_mut(), &id, !done),
            Focus::Stock => self.stock.set_done(
                self.store.as_mut(),
                self.clock.as_ref(),
                &mut self.timer,
                &id,
                !done,
            ),
        };
        self.apply(result);
    }

    /// Empty the daily list
    pub fn clear_daily(&mut self) {
        let result = self.daily.clear(self.store.as_mut());
        self.apply(result);
    }

    pub fn move_unfinished_to_stock(&mut self) {
        let result = self
            .daily
            .move_unfinished_to_stock(self.store.as_mut(), self.clock.as_ref());
        self.apply(result);
    }

    /// Send the selected stock task back to today
    pub fn return_selected_to_daily(&mut self) {
        if self.focus != Focus::Stock {
            return;
        }
        let Some((id, _)) = self.selected_task() else {
            return;
        };
        let result = self
            .stock
            .return_to_daily(self.store.as_mut(), self.clock.as_ref(), &id);
        self.apply(result);
    }

    /// Ask for confirmation before clearing completed stock tasks.
    /// Nothing happens when there is nothing to clear.
    pub fn request_clear_completed(&mut self) {
        if self.stock.has_completed() {
            self.ui_mode = UiMode::ConfirmClearCompleted;
        }
    }

    /// Answer the clear-completed confirmation
    pub fn confirm_clear_completed(&mut self, confirmed: bool) {
        let result = self.stock.clear_completed(self.store.as_mut(), || confirmed);
        self.apply(result);
        self.ui_mode = UiMode::Normal;
    }

    pub fn start_timer(&mut self) {
        let result = self.timer.start(self.store.as_mut(), self.clock.as_ref());
        self.apply(result);
    }

    pub fn stop_timer(&mut self) {
        let result = self.timer.stop(self.store.as_mut(), self.clock.as_ref());
        self.apply(result);
    }

    pub fn reset_timer(&mut self) {
        let result = self.timer.reset(self.store.as_mut());
        self.apply(result);
    }

    /// Current timer reading formatted for display
    pub fn timer_display(&self) -> String {
        self.timer.display(self.clock.as_ref())
    }

    /// Once-per-loop housekeeping; returns true when a redraw is due.
    ///
    /// Fires the timer refresh schedule and re-summarizes the completion log
    /// after midnight.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut redraw = self.timer.schedule_mut().fire_if_due(now);
        if self.log.is_stale(self.clock.as_ref()) {
            self.log.reload(self.store.as_ref(), self.clock.as_ref());
            redraw = true;
        }
        redraw
    }
}

fn clamp(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManualClock, Task, TimerState};
    use crate::persistence::{load_tasks, load_timer, save_tasks, MemoryStore};
    use std::time::Duration;

    /// Store whose writes to one key always fail
    struct FailingKeyStore {
        inner: MemoryStore,
        failing: &'static str,
    }

    impl KeyValueStore for FailingKeyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.failing {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.inner.set(key, value)
        }
    }

    fn app_failing_on(inner: MemoryStore, failing: &'static str) -> (AppState, ManualClock) {
        let clock = ManualClock::at(2024, 1, 1, 9, 0, 0);
        let app = AppState::new(
            Box::new(FailingKeyStore { inner, failing }),
            Box::new(clock.clone()),
            AppConfig::default(),
        );
        (app, clock)
    }

    fn labels(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.label.as_str()).collect()
    }

    fn create_test_app() -> (AppState, ManualClock) {
        let clock = ManualClock::at(2024, 1, 1, 9, 0, 0);
        let app = AppState::new(
            Box::new(MemoryStore::new()),
            Box::new(clock.clone()),
            AppConfig::default(),
        );
        (app, clock)
    }

    fn add(app: &mut AppState, clock: &ManualClock, label: &str) {
        app.start_add_task();
        for c in label.chars() {
            app.input_add_char(c);
        }
        app.submit_input();
        clock.advance_millis(1);
    }

    #[test]
    fn test_app_state_new() {
        let (app, _) = create_test_app();
        assert!(app.daily.tasks().is_empty());
        assert!(app.stock.tasks().is_empty());
        assert_eq!(app.focus, Focus::Daily);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.timer_display(), "0h 0m 0s");
    }

    #[test]
    fn test_add_task_clears_input() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "  Write tests ");
        assert_eq!(app.daily.tasks().len(), 1);
        assert_eq!(app.daily.tasks()[0].label, "Write tests");
        assert!(app.input.is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_move_notifies_stock() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "a");
        add(&mut app, &clock, "b");
        app.toggle_selected_done();

        app.move_unfinished_to_stock();

        assert_eq!(app.sync.broadcasts(), 1);
        assert_eq!(app.daily.tasks().len(), 1);
        assert_eq!(app.daily.tasks()[0].label, "a");
        assert_eq!(app.stock.tasks().len(), 1);
        assert_eq!(app.stock.tasks()[0].label, "b");
    }

    #[test]
    fn test_move_without_unfinished_does_not_notify() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "a");
        app.toggle_selected_done();

        app.move_unfinished_to_stock();

        assert_eq!(app.sync.broadcasts(), 0);
        assert!(app.stock.tasks().is_empty());
    }

    #[test]
    fn test_full_cycle_through_stock_and_log() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "Deep work");
        app.move_unfinished_to_stock();
        app.toggle_focus();

        app.start_timer();
        clock.advance_secs(180);
        app.toggle_selected_done();

        assert!(app.stock.tasks()[0].done);
        assert_eq!(app.stock.tasks()[0].work_time, Some(180));
        assert_eq!(app.timer.state(), TimerState::default());
        assert_eq!(app.log.summary().entries.len(), 1);
        assert_eq!(app.log.summary().total_text(), "0h 3m 0s");

        app.toggle_selected_done();
        assert!(app.log.summary().is_empty());
    }

    #[test]
    fn test_return_selected_to_daily() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "a");
        add(&mut app, &clock, "b");
        app.move_unfinished_to_stock();
        assert!(app.daily.tasks().is_empty());

        app.toggle_focus();
        app.move_selection_down();
        app.return_selected_to_daily();

        assert_eq!(app.daily.tasks().len(), 1);
        assert_eq!(app.daily.tasks()[0].label, "b");
        assert_eq!(app.stock.tasks().len(), 1);
        assert_eq!(app.stock.tasks()[0].label, "a");
        assert_eq!(app.stock_selected, 0);
    }

    #[test]
    fn test_return_requires_stock_focus() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "a");
        app.move_unfinished_to_stock();
        app.return_selected_to_daily();
        assert_eq!(app.stock.tasks().len(), 1);
    }

    #[test]
    fn test_clear_completed_flow() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "a");
        add(&mut app, &clock, "b");
        app.move_unfinished_to_stock();
        app.toggle_focus();

        app.request_clear_completed();
        assert_eq!(app.ui_mode, UiMode::Normal);

        app.toggle_selected_done();
        app.request_clear_completed();
        assert_eq!(app.ui_mode, UiMode::ConfirmClearCompleted);
        app.confirm_clear_completed(false);
        assert_eq!(app.stock.tasks().len(), 2);
        assert_eq!(app.ui_mode, UiMode::Normal);

        app.request_clear_completed();
        app.confirm_clear_completed(true);
        assert_eq!(app.stock.tasks().len(), 1);
        assert_eq!(app.stock.tasks()[0].label, "b");
    }

    #[test]
    fn test_timer_controls_persist() {
        let (mut app, clock) = create_test_app();
        app.start_timer();
        assert!(app.timer.schedule().is_armed());
        clock.advance_secs(7);
        app.stop_timer();
        assert_eq!(load_timer(app.store.as_ref(), "work-timer").elapsed, 7);
        assert_eq!(app.timer_display(), "0h 0m 7s");

        app.reset_timer();
        assert_eq!(load_timer(app.store.as_ref(), "work-timer"), TimerState::default());
    }

    #[test]
    fn test_tick_fires_refresh_only_while_running() {
        let (mut app, _clock) = create_test_app();
        let later = Instant::now() + Duration::from_secs(5);
        assert!(!app.tick(later));

        app.start_timer();
        assert!(app.tick(Instant::now() + Duration::from_secs(5)));
    }

    #[test]
    fn test_tick_reloads_log_after_midnight() {
        let clock = ManualClock::at(2024, 1, 1, 23, 59, 0);
        let mut store = MemoryStore::new();
        let mut done = Task::new("s-1".to_string(), "late");
        done.complete("2024-01-02", 30);
        save_tasks(&mut store, "stock-todo", &[done]).unwrap();
        let mut app = AppState::new(Box::new(store), Box::new(clock.clone()), AppConfig::default());
        assert!(app.log.summary().is_empty());

        clock.advance_secs(120);
        assert!(app.tick(Instant::now()));
        assert_eq!(app.log.summary().entries.len(), 1);
    }

    #[test]
    fn test_selection_clamped_after_clear() {
        let (mut app, clock) = create_test_app();
        add(&mut app, &clock, "a");
        add(&mut app, &clock, "b");
        app.move_selection_down();
        assert_eq!(app.daily_selected, 1);

        app.clear_daily();
        assert_eq!(app.daily_selected, 0);
        assert!(load_tasks(app.store.as_ref(), "daily-todo").is_empty());
    }

    #[test]
    fn test_failed_daily_save_after_move_keeps_stock_in_sync() {
        let mut inner = MemoryStore::new();
        let mut done = Task::new("t-1".to_string(), "done-one");
        done.done = true;
        save_tasks(&mut inner, "daily-todo", &[done, Task::new("t-2".to_string(), "carry")]).unwrap();
        let (mut app, _clock) = app_failing_on(inner, "daily-todo");

        app.move_unfinished_to_stock();

        assert!(app.status.is_some());
        assert_eq!(labels(app.daily.tasks()), vec!["done-one"]);
        assert_eq!(labels(app.stock.tasks()), vec!["carry"]);

        // A later stock write must not drop the moved task
        app.toggle_focus();
        app.toggle_selected_done();
        let stock = load_tasks(app.store.as_ref(), "stock-todo");
        assert_eq!(labels(&stock), vec!["carry"]);
        assert!(stock[0].done);
    }

    #[test]
    fn test_failed_stock_save_after_return_keeps_daily_in_sync() {
        let mut inner = MemoryStore::new();
        save_tasks(&mut inner, "stock-todo", &[Task::new("s-1-t-1".to_string(), "back")]).unwrap();
        let (mut app, _clock) = app_failing_on(inner, "stock-todo");

        app.toggle_focus();
        app.return_selected_to_daily();

        assert!(app.status.is_some());
        assert!(app.stock.tasks().is_empty());
        assert_eq!(labels(app.daily.tasks()), vec!["back"]);
        assert_eq!(labels(&load_tasks(app.store.as_ref(), "daily-todo")), vec!["back"]);
    }
}
