//! Score-driven difficulty helpers

use serde::{Deserialize, Serialize};

/// Checkpointed step trigger: fires once for each score that is a multiple of
/// `every`, and never twice for the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub every: u32,
    /// Last score at which a step was applied
    pub last: u32,
}

impl Checkpoint {
    pub fn new(every: u32) -> Self {
        Self { every, last: 0 }
    }

    /// Returns true (and records the score) if a step is due at `score`
    pub fn reached(&mut self, score: u32) -> bool {
        if self.every == 0 || score <= self.last || score % self.every != 0 {
            return false;
        }
        self.last = score;
        true
    }
}

/// Raise a speed magnitude by `increment`, never past `max`
#[inline]
pub fn ramp(current: f32, increment: f32, max: f32) -> f32 {
    (current + increment).min(max)
}
