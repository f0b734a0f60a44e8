//! Repeating match clock.
//!
//! [`MatchTimer`] runs a callback on a fixed interval until it is stopped.
//! Stopping is idempotent and also happens on drop, so the timer is released
//! exactly once whether the match completes or the loop unwinds first.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Interval between live match updates.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct MatchTimer {
    handle: Option<JoinHandle<()>>,
}

impl MatchTimer {
    /// Starts calling `on_tick` every `interval`, first after one interval.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                on_tick();
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Stops the timer. Returns `false` if it was already stopped.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for MatchTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_timer() -> (MatchTimer, Arc<AtomicU32>) {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let timer = MatchTimer::start(TICK_INTERVAL, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (timer, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_interval() {
        let (_timer, ticks) = counting_timer();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_halts_ticks() {
        let (mut timer, ticks) = counting_timer();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_the_timer() {
        let (timer, ticks) = counting_timer();
        drop(timer);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
