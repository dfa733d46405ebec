// Typed records on top of the key-value store. Reads never fail: an absent
// or malformed entry falls back to the empty list or a stopped timer.

use super::store::{KeyValueStore, StoreError};
use crate::domain::{Task, TimerState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(key, error = %e, "storage read failed, using default");
            return T::default();
        }
    };

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            warn!(key, error = %e, "malformed stored value, using default");
            T::default()
        }
    }
}

fn save_json<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Load a task list; empty when absent or unreadable
pub fn load_tasks(store: &dyn KeyValueStore, key: &str) -> Vec<Task> {
    load_or_default(store, key)
}

/// Replace a task list
pub fn save_tasks(store: &mut dyn KeyValueStore, key: &str, tasks: &[Task]) -> Result<(), StoreError> {
    save_json(store, key, tasks)
}

/// Load the timer; stopped at zero when absent or unreadable
pub fn load_timer(store: &dyn KeyValueStore, key: &str) -> TimerState {
    load_or_default::<TimerState>(store, key).normalized()
}

/// Replace the timer state
pub fn save_timer(store: &mut dyn KeyValueStore, key: &str, state: &TimerState) -> Result<(), StoreError> {
    save_json(store, key, state)
}
