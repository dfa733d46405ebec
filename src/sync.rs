use crate::domain::Clock;
use crate::persistence::KeyValueStore;
use tracing::debug;

/// Anything that renders from persisted task data and must reload when
/// another controller changes it
pub trait Subscriber {
    fn on_tasks_changed(&mut self, store: &dyn KeyValueStore, clock: &dyn Clock);

    /// Whether this subscriber is the writer of `key`
    fn owns_key(&self, _key: &str) -> bool {
        false
    }
}

/// Synchronous "task data changed" broadcast.
///
/// Every subscriber has reloaded before `broadcast` returns. The counter lets
/// callers and tests see whether a notification actually fired.
#[derive(Debug, Default)]
pub struct SyncBus {
    broadcasts: u64,
}

impl SyncBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcast(
        &mut self,
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        subscribers: &mut [&mut dyn Subscriber],
    ) {
        self.broadcasts += 1;
        debug!(count = self.broadcasts, subscribers = subscribers.len(), "task data changed");
        for subscriber in subscribers.iter_mut() {
            subscriber.on_tasks_changed(store, clock);
        }
    }

    /// Number of notifications sent so far
    pub fn broadcasts(&self) -> u64 {
        self.broadcasts
    }
}
