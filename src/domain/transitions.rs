// Pure list transitions: each returns the new list values, or `None` when the
// action does not apply. Nothing here touches storage.

use super::task::{next_id, Task, DAILY_ID_PREFIX, STOCK_ID_PREFIX};

/// New contents of two lists after a task crossed between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub source: Vec<Task>,
    pub target: Vec<Task>,
}

/// Append a fresh undone task labeled with the trimmed `text`
pub fn with_task_added(list: &[Task], text: &str, now_millis: i64) -> Option<Vec<Task>> {
    let label = text.trim();
    if label.is_empty() {
        return None;
    }
    let mut next = list.to_vec();
    let id = next_id(DAILY_ID_PREFIX, now_millis, None, &next);
    next.push(Task::new(id, label));
    Some(next)
}

/// Set the daily checkbox state of one task.
///
/// Checking only flips `done`. Unchecking also drops completion metadata so a
/// reopened task never keeps a stale stamp.
pub fn with_done_set(list: &[Task], id: &str, done: bool) -> Option<Vec<Task>> {
    let index = list.iter().position(|t| t.id == id)?;
    let current = &list[index];
    if current.done == done && (done || !current.is_stamped()) {
        return None;
    }
    let mut next = list.to_vec();
    if done {
        next[index].done = true;
    } else {
        next[index].reopen();
    }
    Some(next)
}

/// Move every undone daily task to the end of the stock list.
///
/// Moved tasks become fresh undone records whose ids embed the original id;
/// daily keeps only its done tasks in their original order.
pub fn move_unfinished(daily: &[Task], stock: &[Task], now_millis: i64) -> Option<Transfer> {
    let (kept, unfinished): (Vec<Task>, Vec<Task>) =
        daily.iter().cloned().partition(|t| t.done);
    if unfinished.is_empty() {
        return None;
    }

    let mut target = stock.to_vec();
    for task in unfinished {
        let id = next_id(STOCK_ID_PREFIX, now_millis, Some(&task.id), &target);
        target.push(Task::new(id, task.label));
    }

    Some(Transfer {
        source: kept,
        target,
    })
}

/// Send one undone stock task back to daily as a fresh record
pub fn return_to_daily(stock: &[Task], daily: &[Task], id: &str, now_millis: i64) -> Option<Transfer> {
    let task = stock.iter().find(|t| t.id == id)?;
    if task.done {
        return None;
    }

    let mut target = daily.to_vec();
    let new_id = next_id(DAILY_ID_PREFIX, now_millis, None, &target);
    target.push(Task::new(new_id, task.label.clone()));

    let source = stock.iter().filter(|t| t.id != id).cloned().collect();
    Some(Transfer { source, target })
}

/// Check a stock task, stamping `today` and the measured work seconds
pub fn with_completion(list: &[Task], id: &str, today: &str, work_seconds: u64) -> Option<Vec<Task>> {
    let index = list.iter().position(|t| t.id == id && !t.done)?;
    let mut next = list.to_vec();
    next[index].complete(today, work_seconds);
    Some(next)
}

/// Uncheck a stock task and drop its completion metadata
pub fn with_completion_cleared(list: &[Task], id: &str) -> Option<Vec<Task>> {
    let index = list.iter().position(|t| t.id == id && t.done)?;
    let mut next = list.to_vec();
    next[index].reopen();
    Some(next)
}

/// Drop every done task
pub fn without_completed(list: &[Task]) -> Option<Vec<Task>> {
    if !list.iter().any(|t| t.done) {
        return None;
    }
    Some(list.iter().filter(|t| !t.done).cloned().collect())
}
