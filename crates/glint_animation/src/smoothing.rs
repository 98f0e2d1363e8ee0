//! Jitter filters for high-frequency inputs such as pointer position

use crate::spring::{SpringConfig, SpringVec2};
use glint_core::Vec2;
use serde::{Deserialize, Serialize};

/// How a raw input is smoothed before it drives a transform
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    /// Damped spring; carries velocity across retargets
    Spring(SpringConfig),
    /// First-order low-pass with the given time constant (seconds)
    Exponential { time_constant: f32 },
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Spring(SpringConfig::parallax())
    }
}

/// First-order exponential approach toward a target.
///
/// After `time_constant` seconds the remaining distance has shrunk to ~37%;
/// the value never overshoots.
#[derive(Clone, Debug)]
pub struct ExponentialSmoother {
    value: Vec2,
    target: Vec2,
    time_constant: f32,
}

impl ExponentialSmoother {
    pub fn new(time_constant: f32, initial: Vec2) -> Self {
        let time_constant = if time_constant.is_finite() && time_constant > 0.0 {
            time_constant
        } else {
            0.1
        };
        Self {
            value: initial,
            target: initial,
            time_constant,
        }
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn snap_to(&mut self, value: Vec2) {
        self.value = value;
        self.target = value;
    }

    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let alpha = 1.0 - (-dt / self.time_constant).exp();
        self.value = self.value + (self.target - self.value) * alpha;
        if self.is_settled() {
            self.value = self.target;
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.target - self.value).length() <= 0.001
    }
}

/// A 2D value filtered by either smoothing model
#[derive(Clone, Debug)]
pub enum SmoothedVec2 {
    Spring(SpringVec2),
    Exponential(ExponentialSmoother),
}

impl SmoothedVec2 {
    pub fn new(smoothing: Smoothing, initial: Vec2) -> Self {
        match smoothing {
            Smoothing::Spring(config) => SmoothedVec2::Spring(SpringVec2::new(config, initial)),
            Smoothing::Exponential { time_constant } => {
                SmoothedVec2::Exponential(ExponentialSmoother::new(time_constant, initial))
            }
        }
    }

    pub fn value(&self) -> Vec2 {
        match self {
            SmoothedVec2::Spring(s) => s.value(),
            SmoothedVec2::Exponential(s) => s.value(),
        }
    }

    pub fn target(&self) -> Vec2 {
        match self {
            SmoothedVec2::Spring(s) => s.target(),
            SmoothedVec2::Exponential(s) => s.target(),
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        match self {
            SmoothedVec2::Spring(s) => s.set_target(target),
            SmoothedVec2::Exponential(s) => s.set_target(target),
        }
    }

    pub fn snap_to(&mut self, value: Vec2) {
        match self {
            SmoothedVec2::Spring(s) => s.snap_to(value),
            SmoothedVec2::Exponential(s) => s.snap_to(value),
        }
    }

    pub fn step(&mut self, dt: f32) {
        match self {
            SmoothedVec2::Spring(s) => s.step(dt),
            SmoothedVec2::Exponential(s) => s.step(dt),
        }
    }

    pub fn is_settled(&self) -> bool {
        match self {
            SmoothedVec2::Spring(s) => s.is_settled(),
            SmoothedVec2::Exponential(s) => s.is_settled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_time_constant_meaning() {
        let mut s = ExponentialSmoother::new(0.5, Vec2::new(100.0, 0.0));
        s.set_target(Vec2::ZERO);
        for _ in 0..30 {
            s.step(1.0 / 60.0);
        }
        // One time constant elapsed: e^-1 of the distance remains
        assert!((s.value().x - 100.0 * (-1.0f32).exp()).abs() < 0.1);
    }

    #[test]
    fn test_invalid_time_constant_falls_back() {
        let mut s = ExponentialSmoother::new(0.0, Vec2::ZERO);
        s.set_target(Vec2::ONE);
        s.step(1.0);
        assert!(s.value().x.is_finite());
    }

    proptest! {
        #[test]
        fn exponential_decay_is_monotonic(
            start_x in -500.0f32..500.0,
            start_y in -500.0f32..500.0,
            tau in 0.02f32..1.0,
            dt in 0.001f32..0.1,
        ) {
            let mut s = SmoothedVec2::new(
                Smoothing::Exponential { time_constant: tau },
                Vec2::new(start_x, start_y),
            );
            s.set_target(Vec2::ZERO);
            let mut last = s.value().length();
            for _ in 0..200 {
                s.step(dt);
                let now = s.value().length();
                prop_assert!(now <= last + 1e-4);
                last = now;
            }
        }
    }
}
