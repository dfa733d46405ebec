pub mod config;
pub mod files;
pub mod records;
pub mod store;

pub use config::{load_config, save_config, AppConfig, StorageKeys};
pub use files::{
    atomic_write, config_file, ensure_data_dir, init_local_data_dir, log_file, read_file,
};
pub use records::{load_tasks, load_timer, save_tasks, save_timer};
pub use store::{FileStore, KeyValueStore, StoreError};

#[cfg(test)]
pub use store::MemoryStore;
