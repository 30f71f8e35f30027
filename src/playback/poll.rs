use std::time::{Duration, Instant};

/// Cooperative repeating timer for the position poll.
///
/// The event loop asks `fire` whether a tick is due and uses `time_until_due`
/// as its input-wait timeout. A suspended timer never fires.
#[derive(Debug, Clone)]
pub struct PollTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl PollTimer {
    /// A suspended timer with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start ticking; the first tick is due immediately. No-op when already running.
    pub fn resume(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now);
        }
    }

    pub fn suspend(&mut self) {
        self.next_due = None;
    }

    /// Returns true when a tick is due at `now` and schedules the next one.
    /// Missed periods are skipped, not replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }

    /// How long until the next tick; `None` while suspended.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
