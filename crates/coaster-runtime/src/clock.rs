//! Game clock with fixed-timestep accumulator

use std::time::{Duration, Instant};

/// Longest frame gap fed into the accumulator, so a stalled window does not
/// fire a burst of catch-up ticks.
const MAX_FRAME_GAP: Duration = Duration::from_millis(250);

/// Tracks elapsed time and hands out fixed animation steps
pub struct GameClock {
    /// Total elapsed time
    pub total_time: Duration,
    /// Time since the previous `tick`
    pub delta_time: Duration,
    /// Fixed interval between animation steps
    pub fixed_timestep: Duration,
    /// Accumulated time not yet consumed by steps
    accumulator: Duration,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(33))
    }
}

impl GameClock {
    pub fn new(fixed_timestep: Duration) -> Self {
        Self {
            total_time: Duration::ZERO,
            delta_time: Duration::ZERO,
            fixed_timestep,
            accumulator: Duration::ZERO,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }

    /// Advance the clock to now. Call once per loop iteration.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) {
        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = Duration::ZERO;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_instant);
        self.last_instant = now;

        if elapsed > MAX_FRAME_GAP {
            tracing::debug!(?elapsed, "frame gap clamped");
        }
        self.delta_time = elapsed.min(MAX_FRAME_GAP);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a fixed step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator = self.accumulator.saturating_sub(self.fixed_timestep);
    }

    /// When the next fixed step becomes due, for `ControlFlow::WaitUntil`
    pub fn next_deadline(&self) -> Instant {
        self.last_instant + self.fixed_timestep.saturating_sub(self.accumulator)
    }
}
