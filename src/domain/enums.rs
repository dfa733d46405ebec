/// Which list pane receives list keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Daily,
    Stock,
}

impl Focus {
    /// Switch to the other list pane
    pub fn toggled(self) -> Self {
        match self {
            Focus::Daily => Focus::Stock,
            Focus::Stock => Focus::Daily,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    ConfirmClearCompleted,
}

/// Outcome of a controller action.
///
/// `Shared` means the other list (or the completion log) may be stale and the
/// dashboard has to broadcast a sync notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    Local,
    Shared,
}

impl Change {
    pub fn needs_broadcast(self) -> bool {
        self == Change::Shared
    }
}
