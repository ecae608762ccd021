//! Frame-driven interval timers
//!
//! Timers accumulate frame time and fire once per elapsed period, the same
//! fixed-step accumulator the render loop uses. The spawner and the road
//! scroller start and stop together.

use crate::consts::{MAX_CATCHUP, MAX_FRAME_DT_MS};
use crate::tuning::Tuning;

/// A repeating timer with a period in milliseconds
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: f64,
    accumulator: f64,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            accumulator: 0.0,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Change the period and start counting from zero
    pub fn reset(&mut self, period_ms: f64) {
        self.period_ms = period_ms.max(1.0);
        self.accumulator = 0.0;
    }

    /// Feed elapsed time; returns how many times the timer fired
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.accumulator += dt_ms.max(0.0);

        let mut fired = 0;
        while self.accumulator >= self.period_ms && fired < MAX_CATCHUP {
            self.accumulator -= self.period_ms;
            fired += 1;
        }
        // Drop backlog we refused to replay
        if fired == MAX_CATCHUP {
            self.accumulator = self.accumulator.min(self.period_ms);
        }
        fired
    }
}

/// Firings produced by one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Firings {
    pub spawns: u32,
    pub road_scrolls: u32,
}

/// The run's timers, started and stopped as a unit
#[derive(Debug, Clone)]
pub struct Schedule {
    pub spawner: Interval,
    pub road: Interval,
    running: bool,
}

impl Schedule {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawner: Interval::new(tuning.spawn_interval_ms(1)),
            road: Interval::new(tuning.road_scroll_interval_ms),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance both timers by a frame delta (clamped)
    pub fn advance(&mut self, dt_ms: f64) -> Firings {
        if !self.running {
            return Firings::default();
        }
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);
        Firings {
            road_scrolls: self.road.advance(dt_ms),
            spawns: self.spawner.advance(dt_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_once_per_period() {
        let mut timer = Interval::new(20.0);
        assert_eq!(timer.advance(10.0), 0);
        assert_eq!(timer.advance(10.0), 1);
        assert_eq!(timer.advance(45.0), 2);
        assert_eq!(timer.advance(15.0), 1);
    }

    #[test]
    fn test_interval_caps_catch_up() {
        let mut timer = Interval::new(1.0);
        assert_eq!(timer.advance(1000.0), MAX_CATCHUP);
        assert_eq!(timer.advance(0.0), 1);
        assert_eq!(timer.advance(0.0), 0);
    }

    #[test]
    fn test_reset_restarts_count() {
        let mut timer = Interval::new(2000.0);
        timer.advance(1500.0);
        timer.reset(1000.0);
        assert_eq!(timer.period_ms(), 1000.0);
        assert_eq!(timer.advance(999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
    }

    #[test]
    fn test_schedule_clamps_frame_delta() {
        let mut schedule = Schedule::new(&Tuning::default());
        // A 10s stall counts as one 100ms frame
        let firings = schedule.advance(10_000.0);
        assert_eq!(firings.road_scrolls, 5);
        assert_eq!(firings.spawns, 0);
    }

    #[test]
    fn test_stopped_schedule_never_fires() {
        let mut schedule = Schedule::new(&Tuning::default());
        schedule.stop();
        assert!(!schedule.is_running());
        for _ in 0..100 {
            assert_eq!(schedule.advance(100.0), Firings::default());
        }
    }
}
