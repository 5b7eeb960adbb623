//! Fixed-timestep tick source.
//!
//! Wall-clock deltas accumulate in milliseconds and convert to whole ticks at
//! the effective interval for the current speed. The accumulator keeps the
//! partial remainder, so changing speed mid-interval neither loses nor
//! duplicates ticks. Pausing discards accumulated time instead of replaying
//! it as a burst on resume.

use crate::constants::{BASE_TICK_INTERVAL_MS, MAX_TICKS_PER_ADVANCE};
use crate::numbers::{floor_f64_to_u32, u32_to_f64};
use crate::state::{GameSpeed, GameState};

/// Runtime tick accumulator. Not serialized; a fresh clock starts counting
/// from the first `advance` after construction.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    accumulator_ms: f64,
    last_now_ms: Option<f64>,
}

/// Milliseconds of wall time per tick at the given speed.
#[must_use]
pub fn effective_interval_ms(speed: GameSpeed) -> f64 {
    BASE_TICK_INTERVAL_MS / speed.multiplier()
}

impl Clock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any accumulated partial progress and re-anchor at `now_ms`.
    /// Called on resume so time spent paused never converts into ticks.
    pub fn reset(&mut self, now_ms: f64) {
        self.accumulator_ms = 0.0;
        self.last_now_ms = Some(now_ms);
    }

    /// Convert elapsed wall time into whole simulation ticks.
    ///
    /// Returns zero while the state is paused. A long absence (backgrounded
    /// tab) is bounded by the catch-up cap; time beyond the cap is discarded.
    pub fn advance(&mut self, state: &GameState, now_ms: f64) -> u32 {
        if state.paused || state.is_over() {
            // Keep the anchor moving so resume sees no backlog.
            self.reset(now_ms);
            return 0;
        }

        let delta = match self.last_now_ms {
            Some(last) if now_ms > last => now_ms - last,
            _ => 0.0,
        };
        self.last_now_ms = Some(now_ms);
        if !delta.is_finite() {
            return 0;
        }
        self.accumulator_ms += delta;

        let interval = effective_interval_ms(state.speed);
        if interval <= 0.0 || !interval.is_finite() {
            return 0;
        }

        let raw_ticks = floor_f64_to_u32(self.accumulator_ms / interval);
        if raw_ticks == 0 {
            return 0;
        }
        if raw_ticks > MAX_TICKS_PER_ADVANCE {
            // Catch-up cap hit: emit the cap and discard the remainder.
            self.accumulator_ms = 0.0;
            return MAX_TICKS_PER_ADVANCE;
        }
        self.accumulator_ms -= u32_to_f64(raw_ticks) * interval;
        raw_ticks
    }

    /// Partial progress toward the next tick, in milliseconds.
    #[must_use]
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulator_ms
    }
}
