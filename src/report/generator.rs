use crate::domain::summarize_completions;
use crate::persistence::{atomic_write, load_tasks, KeyValueStore, StorageKeys};
use anyhow::{Context, Result};
use std::path::Path;

/// Build a markdown completion report for `day` from both lists
pub fn generate_report(store: &dyn KeyValueStore, keys: &StorageKeys, day: &str) -> String {
    let daily = load_tasks(store, &keys.daily);
    let stock = load_tasks(store, &keys.stock);
    let summary = summarize_completions(&daily, &stock, day);

    let mut report = String::new();
    report.push_str(&format!("# Completion Log - {}\n\n", day));

    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Completed:** {} tasks\n", summary.entries.len()));
    report.push_str(&format!("- **Work Time:** {}\n", summary.total_text()));

    let open_daily = daily.iter().filter(|t| !t.done).count();
    let open_stock = stock.iter().filter(|t| !t.done).count();
    report.push_str(&format!(
        "- **Still Open:** {} today, {} in stock\n\n",
        open_daily, open_stock
    ));

    report.push_str("## Done\n\n");
    if summary.is_empty() {
        report.push_str("_Nothing completed._\n");
    }
    for entry in &summary.entries {
        match entry.duration_text() {
            Some(duration) => report.push_str(&format!("- [x] {} ({})\n", entry.label, duration)),
            None => report.push_str(&format!("- [x] {}\n", entry.label)),
        }
    }

    report
}

/// Write a generated report to `path`
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    atomic_write(path, report)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}
