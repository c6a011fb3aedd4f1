//! One-second clock driver for the timer engine.
//!
//! The engine is tick-driven and never reads the wall clock; this driver
//! supplies the ticks. While the engine is running it delivers `tick()`
//! once per second, stopping as soon as the engine reports not-running.
//! Missed intervals are delivered in a burst, so the total tick count for
//! a completed session equals the session duration even under scheduler
//! jitter.

use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::events::Event;
use crate::timer::TimerEngine;

pub struct ClockDriver {
    period: Duration,
}

impl ClockDriver {
    pub fn new() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }

    /// Driver with a custom period, for tests and simulations.
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }

    /// Drive the engine until the current session completes or the engine
    /// stops running. `on_tick` is invoked after every delivered tick so a
    /// caller can render the countdown.
    ///
    /// Returns the completion event, or `None` if the engine was (or went)
    /// idle.
    pub async fn run<F>(&self, engine: &mut TimerEngine, mut on_tick: F) -> Option<Event>
    where
        F: FnMut(&TimerEngine),
    {
        if !engine.is_running() {
            return None;
        }
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        // The first interval tick completes immediately; consume it so the
        // first engine tick lands one full period after start.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let completed = engine.tick();
            on_tick(engine);
            if completed.is_some() {
                return completed;
            }
            if !engine.is_running() {
                return None;
            }
        }
    }
}

impl Default for ClockDriver {
    fn default() -> Self {
        Self::new()
    }
}
