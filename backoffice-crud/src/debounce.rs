use std::time::Duration;
use tokio::time::Instant;

/// Trailing-edge debouncer for search input.
///
/// Every push restarts the delay; only the latest term is released.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn push(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now + self.delay));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending term once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if *at <= now => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }

    /// Sleeps until the pending term is due and releases it.
    pub async fn settle(&mut self) -> Option<String> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.poll(Instant::now())
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
