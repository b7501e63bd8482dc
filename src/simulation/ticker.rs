//! Fixed-period tick scheduling.
//!
//! The next deadline is only set once the current tick has finished, so
//! ticks never overlap and a slow tick pushes the following one back
//! instead of queueing a burst.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// When the next tick is due, if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Schedules the first tick one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.period);
    }

    /// Cancels the pending tick.
    pub fn stop(&mut self) {
        self.next_deadline = None;
    }

    /// Whether a tick is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Schedules the next tick after one that completed at `now`.
    ///
    /// Does nothing if the ticker was stopped during the tick.
    pub fn reschedule(&mut self, now: Instant) {
        if self.is_running() {
            self.next_deadline = Some(now + self.period);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_ticker_is_never_due() {
        let ticker = Ticker::new(Duration::from_millis(16));
        let now = Instant::now();
        assert!(!ticker.is_running());
        assert!(!ticker.is_due(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_due_after_one_period() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(16));
        ticker.start(start);

        assert!(!ticker.is_due(start + Duration::from_millis(15)));
        assert!(ticker.is_due(start + Duration::from_millis(16)));
        assert_eq!(ticker.next_deadline(), Some(start + Duration::from_millis(16)));
    }

    #[test]
    fn test_reschedule_counts_from_completion() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(16));
        ticker.start(start);

        // A slow tick finishing at 40 ms pushes the next one to 56 ms
        ticker.reschedule(start + Duration::from_millis(40));
        assert!(!ticker.is_due(start + Duration::from_millis(50)));
        assert!(ticker.is_due(start + Duration::from_millis(56)));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(16));
        ticker.start(start);
        ticker.stop();
        ticker.reschedule(start + Duration::from_millis(16));

        assert!(!ticker.is_running());
        assert!(!ticker.is_due(start + Duration::from_secs(1)));
    }
}
