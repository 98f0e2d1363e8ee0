//! Damped harmonic oscillator springs
//!
//! A spring pulls `value` toward `target` with acceleration
//! `(-stiffness * (value - target) - damping * velocity) / mass`, integrated
//! with fixed-size RK4 sub-steps so large frame gaps stay stable.

use glint_core::Vec2;
use serde::{Deserialize, Serialize};

/// Largest integration sub-step, in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Spring physics parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Fast and firm, for small UI feedback
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    pub const fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Shared by every viewport reveal so sections feel consistent
    pub const fn reveal() -> Self {
        Self::new(300.0, 30.0, 0.5)
    }

    /// Pointer-follow smoothing for parallax layers
    pub const fn parallax() -> Self {
        Self::new(100.0, 25.0, 1.0)
    }

    /// Hover emphasis (scale / lift / rotate / glow)
    pub const fn hover() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Config with damping set to exactly the critical value
    pub fn critically_damped(stiffness: f32, mass: f32) -> Self {
        let mass = mass.max(f32::EPSILON);
        Self::new(stiffness, 2.0 * (stiffness * mass).sqrt(), mass)
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; >= 1.0 never overshoots
    pub fn damping_ratio(&self) -> f32 {
        let critical = 2.0 * (self.stiffness * self.mass).sqrt();
        if critical <= 0.0 {
            return f32::INFINITY;
        }
        self.damping / critical
    }

    pub fn overshoots(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    /// Replace non-finite or non-positive parameters with the reveal preset's
    pub fn sanitized(self) -> Self {
        let fallback = Self::reveal();
        let pick = |v: f32, d: f32| if v.is_finite() && v > 0.0 { v } else { d };
        let sanitized = Self {
            stiffness: pick(self.stiffness, fallback.stiffness),
            damping: if self.damping.is_finite() && self.damping >= 0.0 {
                self.damping
            } else {
                fallback.damping
            },
            mass: pick(self.mass, fallback.mass),
        };
        if sanitized != self {
            tracing::warn!(?self, ?sanitized, "invalid spring parameters replaced");
        }
        sanitized
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::reveal()
    }
}

/// A single animated scalar
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    /// Displacement and speed below which the spring snaps to rest
    rest_epsilon: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config: config.sanitized(),
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_epsilon: 0.001,
        }
    }

    pub fn with_rest_epsilon(mut self, epsilon: f32) -> Self {
        self.rest_epsilon = epsilon.abs().max(f32::EPSILON);
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config.sanitized();
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring. The current value and velocity are kept, so an
    /// interrupted animation continues smoothly from where it is.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop (used on mount, never mid-animation)
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() <= self.rest_epsilon
            && self.velocity.abs() <= self.rest_epsilon
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integrate(dt);
    }

    /// Runs RK4 sub-steps until `dt` is consumed or the spring comes to rest,
    /// so a long frame gap costs no more than the time it takes to settle.
    /// Returns the number of sub-steps taken.
    fn integrate(&mut self, dt: f32) -> u32 {
        let mut taken = 0;
        if dt.is_finite() && dt > 0.0 {
            let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
            let h = dt / steps as f32;
            while taken < steps && !self.is_settled() {
                self.rk4(h);
                taken += 1;
            }
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        taken
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

/// A pair of springs animating a 2D vector with shared physics
#[derive(Clone, Debug)]
pub struct SpringVec2 {
    x: Spring,
    y: Spring,
}

impl SpringVec2 {
    pub fn new(config: SpringConfig, initial: Vec2) -> Self {
        Self {
            x: Spring::new(config, initial.x),
            y: Spring::new(config, initial.y),
        }
    }

    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.x.velocity(), self.y.velocity())
    }

    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn snap_to(&mut self, value: Vec2) {
        self.x.snap_to(value.x);
        self.y.snap_to(value.y);
    }

    pub fn step(&mut self, dt: f32) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::reveal(), 0.0);
        spring.set_target(1.0);
        assert!(!spring.is_settled());

        run(&mut spring, 2.0);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 1.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_overdamped_presets_never_overshoot() {
        for config in [SpringConfig::reveal(), SpringConfig::parallax()] {
            assert!(!config.overshoots(), "{config:?}");

            let mut spring = Spring::new(config, 70.0);
            spring.set_target(0.0);
            let mut last = spring.value();
            for _ in 0..240 {
                spring.step(1.0 / 60.0);
                assert!(spring.value() >= 0.0, "overshot with {config:?}");
                assert!(spring.value() <= last + 1e-4, "not monotonic with {config:?}");
                last = spring.value();
            }
        }
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::hover(), 1.0);
        spring.set_target(1.05);
        for _ in 0..3 {
            spring.step(1.0 / 60.0);
        }
        let value = spring.value();
        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        // Reversal mid-flight starts from the live value
        spring.set_target(1.0);
        assert_eq!(spring.value(), value);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        spring.step(5.0);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_long_gap_stops_once_settled() {
        let mut spring = Spring::new(SpringConfig::reveal(), 0.0);
        spring.set_target(1.0);

        let taken = spring.integrate(3600.0);
        assert_eq!(spring.value(), 1.0);
        assert!(spring.is_settled());
        // An hour is ~864k sub-steps; settling takes a couple of seconds
        assert!(taken < 2_000, "took {taken} sub-steps");

        assert_eq!(spring.integrate(3600.0), 0);
    }

    #[test]
    fn test_invalid_config_is_sanitized() {
        let spring = Spring::new(SpringConfig::new(f32::NAN, -1.0, 0.0), 0.0);
        assert_eq!(spring.config(), SpringConfig::reveal());
    }

    #[test]
    fn test_critically_damped_ratio() {
        let config = SpringConfig::critically_damped(300.0, 0.5);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spring_vec2() {
        let mut v = SpringVec2::new(SpringConfig::parallax(), Vec2::new(15.0, -15.0));
        v.set_target(Vec2::ZERO);
        for _ in 0..300 {
            v.step(1.0 / 60.0);
        }
        assert!(v.is_settled());
        assert_eq!(v.value(), Vec2::ZERO);
    }
}
