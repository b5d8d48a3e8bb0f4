//! Cancellable rebuild alarm.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Quiet period after the last trigger before a rebuild runs.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// A single re-armable alarm.
///
/// Each [`trigger`](Self::trigger) cancels any pending alarm and arms a new
/// one `window` from now, so a burst of triggers fires exactly once, after
/// the burst settles.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the alarm.
    pub fn trigger(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolve when the armed alarm goes off, disarming it.
    ///
    /// Pending forever while disarmed. Cancel-safe: dropping the future
    /// leaves the alarm armed.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_after_settling() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        for _ in 0..5 {
            debouncer.trigger();
            advance(Duration::from_millis(20)).await;
        }

        debouncer.fired().await;
        // Last trigger at 80ms, so the alarm goes off at 180ms.
        assert!(start.elapsed() >= Duration::from_millis(180));
        assert!(!debouncer.is_armed());

        assert!(timeout(Duration::from_secs(1), debouncer.fired()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_fire_before_window() {
        let mut debouncer = Debouncer::default();
        debouncer.trigger();

        let early = timeout(Duration::from_millis(99), debouncer.fired()).await;
        assert!(early.is_err());
        assert!(debouncer.is_armed());

        debouncer.fired().await;
        assert!(!debouncer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms() {
        let mut debouncer = Debouncer::default();
        debouncer.trigger();
        debouncer.cancel();

        assert!(timeout(Duration::from_secs(1), debouncer.fired()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        let mut fired = 0;

        debouncer.trigger();
        debouncer.fired().await;
        fired += 1;

        advance(Duration::from_millis(500)).await;
        debouncer.trigger();
        debouncer.trigger();
        debouncer.fired().await;
        fired += 1;

        assert_eq!(fired, 2);
    }
}
