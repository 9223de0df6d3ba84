//! Transient user notifications.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Error,
    Info,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Info => "info",
        })
    }
}

/// Fire-and-forget message sink (a toast, a status line).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: Level);
}

/// Notifier that keeps every message; used by headless hosts and tests.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<(Level, String)>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<(Level, String)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Messages at `level`, oldest first.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, message: &str, level: Level) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_order_and_levels() {
        let log = NotificationLog::new();
        log.notify("saved", Level::Success);
        log.notify("boom", Level::Error);

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.last(), Some((Level::Error, "boom".to_string())));
        assert_eq!(log.messages(Level::Success), vec!["saved".to_string()]);

        log.clear();
        assert!(log.entries().is_empty());
    }
}
