//! Fixed timestep accumulator
//!
//! Decouples the simulation rate from the host frame rate. Frame time is
//! clamped, the accumulator is capped, at most `MAX_SUBSTEPS` ticks run per
//! frame, and whatever backlog remains after catching up is dropped.

use std::time::Duration;

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_STEP};

#[derive(Debug, Clone)]
pub struct SimulationClock {
    step: Duration,
    max_frame: Duration,
    max_ticks: u32,
    accumulator: Duration,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(SIM_STEP)
    }
}

impl SimulationClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            max_frame: MAX_FRAME_TIME,
            max_ticks: MAX_SUBSTEPS,
            accumulator: Duration::ZERO,
        }
    }

    /// Time banked toward the next tick
    #[inline]
    pub fn backlog(&self) -> Duration {
        self.accumulator
    }

    /// Drop any banked time (after pause/resume or a long stall)
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Account for one host frame and return how many ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let elapsed = elapsed.min(self.max_frame);
        self.accumulator = (self.accumulator + elapsed).min(self.step * self.max_ticks);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks {
            self.accumulator -= self.step;
            ticks += 1;
        }

        // Still behind: give up on the backlog rather than carry it forward
        if self.accumulator > self.step {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_frame_is_capped_at_five_ticks() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(Duration::from_millis(230)), 5);
        assert_eq!(clock.backlog(), Duration::ZERO);
        // Nothing carried into the next frame
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_partial_steps_accumulate() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.backlog(), Duration::from_millis(20) - SIM_STEP);
    }

    #[test]
    fn test_steady_sixty_hz() {
        let mut clock = SimulationClock::default();
        let total: u32 = (0..600).map(|_| clock.advance(SIM_STEP)).sum();
        assert_eq!(total, 600);
    }

    #[test]
    fn test_two_steps_in_one_frame() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(SIM_STEP * 2 + Duration::from_millis(1)), 2);
        assert_eq!(clock.backlog(), Duration::from_millis(1));
    }
}
