use crate::domain::{format_hms, Change, Clock, TimerState};
use crate::persistence::{load_timer, save_timer, KeyValueStore, StoreError};
use crate::ticker::RefreshSchedule;
use std::time::{Duration, Instant};
use tracing::info;

/// The persisted work stopwatch and its display refresh schedule
#[derive(Debug, Clone)]
pub struct WorkTimer {
    key: String,
    state: TimerState,
    schedule: RefreshSchedule,
}

impl WorkTimer {
    /// Load the timer; a timer that was running when last saved keeps running
    /// and gets its refresh schedule re-armed
    pub fn init(store: &dyn KeyValueStore, key: &str, refresh: Duration) -> Self {
        let state = load_timer(store, key);
        let mut schedule = RefreshSchedule::new(refresh);
        if state.running {
            schedule.arm(Instant::now());
        }
        Self {
            key: key.to_string(),
            state,
            schedule,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn schedule(&self) -> &RefreshSchedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut RefreshSchedule {
        &mut self.schedule
    }

    pub fn start(&mut self, store: &mut dyn KeyValueStore, clock: &dyn Clock) -> Result<Change, StoreError> {
        if self.state.running {
            return Ok(Change::Unchanged);
        }
        self.state = self.state.started(clock.now_millis());
        self.schedule.arm(Instant::now());
        info!(elapsed = self.state.elapsed, "timer started");
        self.save(store)?;
        Ok(Change::Local)
    }

    pub fn stop(&mut self, store: &mut dyn KeyValueStore, clock: &dyn Clock) -> Result<Change, StoreError> {
        if !self.state.running {
            return Ok(Change::Unchanged);
        }
        self.state = self.state.stopped(clock.now_millis());
        self.schedule.cancel();
        info!(elapsed = self.state.elapsed, "timer stopped");
        self.save(store)?;
        Ok(Change::Local)
    }

    /// Zero the timer regardless of its state.
    ///
    /// Also the external entry point used when a stock task is completed.
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) -> Result<Change, StoreError> {
        self.state = TimerState::default();
        self.schedule.cancel();
        info!("timer reset");
        self.save(store)?;
        Ok(Change::Local)
    }

    /// Seconds measured so far, including the running segment
    pub fn current_seconds(&self, clock: &dyn Clock) -> u64 {
        self.state.current_seconds(clock.now_millis())
    }

    pub fn display(&self, clock: &dyn Clock) -> String {
        format_hms(self.current_seconds(clock))
    }

    fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save_timer(store, &self.key, &self.state)
    }
}
