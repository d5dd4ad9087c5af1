//! Repeat timer for a held direction
//!
//! Wraps a [`tokio::time::Interval`] whose first boundary lies one period after
//! the press. Tick 0 is emitted by the controller itself at press time, so the
//! interval only ever yields the repeat boundaries (100ms, 200ms, ...).
//!
//! Cancelling the timer is dropping it. The timer is a plain value owned by the
//! controller, so once it is dropped no further tick can be observed.

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use super::direction::Direction;

/// Fixed repeat cadence while a zone is held
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct RepeatTimer {
    direction: Direction,
    interval: Interval,
    ticks: u64,
}

impl RepeatTimer {
    // Start a timer that repeats `direction` from one period after now
    pub fn start(direction: Direction) -> Self {
        let period = REPEAT_INTERVAL;
        let mut interval = interval_at(Instant::now() + period, period);
        // Keep boundaries aligned to the press instant even if the loop stalls
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        debug!(
            "Repeat timer started for {} every {}ms",
            direction,
            period.as_millis()
        );
        Self {
            direction,
            interval,
            ticks: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of repeat boundaries yielded so far (tick 0 not included)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Waits for the next repeat boundary.
    ///
    /// Cancel safe: dropping the future before it completes does not consume
    /// a boundary.
    pub async fn tick(&mut self) -> Direction {
        self.interval.tick().await;
        self.ticks += 1;
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_boundary_is_one_period_after_start() {
        let start = Instant::now();
        let mut timer = RepeatTimer::start(Direction::Up);

        assert_eq!(timer.tick().await, Direction::Up);
        assert_eq!(start.elapsed(), REPEAT_INTERVAL);

        timer.tick().await;
        assert_eq!(start.elapsed(), REPEAT_INTERVAL * 2);
        assert_eq!(timer.ticks(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_tick_future_does_not_consume_a_boundary() {
        let start = Instant::now();
        let mut timer = RepeatTimer::start(Direction::Left);

        let early = tokio::time::timeout(Duration::from_millis(50), timer.tick()).await;
        assert!(early.is_err());
        assert_eq!(timer.ticks(), 0);

        timer.tick().await;
        assert_eq!(start.elapsed(), REPEAT_INTERVAL);
        assert_eq!(timer.ticks(), 1);
    }
}
