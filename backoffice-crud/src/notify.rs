//! Toast notifications.
//!
//! The engine only ever fires notifications; it never waits on them.

use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success | Severity::Info => info!(?severity, "{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Error => error!("{message}"),
        }
    }
}

/// Keeps every notification in order. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    log: Arc<Mutex<Vec<(String, Severity)>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.log.lock().ok().and_then(|log| log.last().cloned())
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<(String, Severity)> {
        self.log
            .lock()
            .map(|mut log| std::mem::take(&mut *log))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut log) = self.log.lock() {
            log.push((message.to_string(), severity));
        }
    }
}
