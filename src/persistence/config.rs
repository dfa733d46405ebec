use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Names of the three persisted entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub daily: String,
    pub stock: String,
    pub timer: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            daily: "daily-todo".to_string(),
            stock: "stock-todo".to_string(),
            timer: "work-timer".to_string(),
        }
    }
}

/// App configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub keys: StorageKeys,
    /// Timer display refresh interval while running
    pub refresh_ms: u64,
    pub daily_title: String,
    /// Placeholder row for an empty stock list
    pub stock_empty_text: String,
    /// Placeholder row for an empty completion log
    pub log_empty_text: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            refresh_ms: 1000,
            daily_title: "Today".to_string(),
            stock_empty_text: "No tasks in stock".to_string(),
            log_empty_text: "Nothing completed yet today".to_string(),
        }
    }
}

impl AppConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms.max(1))
    }
}

/// Load config from config.json; defaults when the file doesn't exist
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    let content = match super::read_file(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?
    {
        Some(content) => content,
        None => return Ok(AppConfig::default()),
    };

    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Malformed config: {}", path.display()))?;
    Ok(config)
}

/// Save config to config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(config)?;
    super::atomic_write(path, &json)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
