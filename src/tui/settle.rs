use std::time::{Duration, Instant};

/// Debounce window for live edits.
///
/// Every change restarts the window; once it elapses without a newer change
/// the burst is settled and reported once. Times are passed in so callers
/// control the clock.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    window: Duration,
    last_change: Option<Instant>,
}

impl SettleTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_change: None,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub fn cancel(&mut self) {
        self.last_change = None;
    }

    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    /// Returns true exactly once per burst, when the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(at) if now.saturating_duration_since(at) >= self.window => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }

    /// How long the event loop may block before the next settle is due.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.last_change
            .map(|at| (at + self.window).saturating_duration_since(now))
    }
}
