//! Gravity timer.
//!
//! A repeating interval that can be re-armed with a new period or stopped.
//! While stopped, [`GravityTimer::tick`] never completes, so it can sit in a
//! `select!` without a guard.

use std::future;
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Default)]
pub struct GravityTimer {
    interval: Option<Interval>,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart with `period`; the first tick fires one full period from now
    pub fn arm(&mut self, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        let mut interval = time::interval_at(Instant::now() + period, period);
        // A late tick must not be followed by a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}
