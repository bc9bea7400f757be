//! Simulated sensor reading.
//!
//! There is no sensor hardware. The value performs a bounded random walk:
//! every step adds an integer in `-10..=10` scaled by 0.1 and clamps the
//! result to [`MIN_VALUE`, `MAX_VALUE`].

use rand::Rng;

pub const MIN_VALUE: f32 = 0.0;
pub const MAX_VALUE: f32 = 100.0;

/// Largest step, in tenths.
const MAX_STEP_TENTHS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedSensor {
    value: f32,
}

impl SimulatedSensor {
    pub fn new(initial: f32) -> Self {
        Self {
            value: clamp(initial),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Apply one random-walk step and return the new value.
    pub fn step(&mut self, rng: &mut impl Rng) -> f32 {
        let tenths = rng.gen_range(-MAX_STEP_TENTHS..=MAX_STEP_TENTHS);
        self.apply_delta(tenths as f32 / 10.0)
    }

    /// Add `delta` and clamp. Split out so boundary behaviour is testable
    /// without an RNG.
    pub fn apply_delta(&mut self, delta: f32) -> f32 {
        self.value = clamp(self.value + delta);
        self.value
    }

    /// Value with one decimal place, as shown on the status page.
    pub fn formatted(&self) -> String {
        format!("{:.1}", self.value)
    }
}

fn clamp(v: f32) -> f32 {
    if v.is_nan() {
        return MIN_VALUE;
    }
    v.clamp(MIN_VALUE, MAX_VALUE)
}
