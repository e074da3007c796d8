//! Fixed timestep accumulator

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Converts variable host frame times into a whole number of ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(FRAME_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add `elapsed` seconds and return how many ticks to run now
    ///
    /// Long stalls (tab switch, debugger) are clamped so the simulation never
    /// tries to catch up more than `max_substeps` ticks in one frame.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let elapsed = if elapsed.is_finite() { elapsed.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= self.step;
        }
        ticks
    }

    /// Forget any partial tick (after pause or reset)
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }
}
