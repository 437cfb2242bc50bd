use std::time::{Duration, Instant};

/// Repeating tick source for the dealer's draws. Only live while armed;
/// a disarmed timer never fires, so a late tick cannot reach a finished round.
#[derive(Debug, Clone)]
pub struct DealerTimer {
    interval: Duration,
    next: Option<Instant>,
}

impl DealerTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fires at most once per call, then schedules the next tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if due <= now => {
                self.next = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
