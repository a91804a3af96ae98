//! Fixed-timestep accumulator
//!
//! Display frames hand in variable wall-clock deltas; physics only ever
//! advances in whole steps of `step` seconds, carrying the remainder.

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f64,
    accumulator: f64,
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self { step, accumulator: 0.0 }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time banked towards the next step
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    /// Bank a frame delta; negative or non-finite deltas are ignored
    pub fn accumulate(&mut self, frame_dt: f64) {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
    }

    /// Pop one step if enough time is banked
    pub fn pop_step(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Drop banked time, e.g. once ticking has stopped for good
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }
}
