//! Viewport reveal animator
//!
//! Moves a subtree from its hidden pose to the visible pose the first time
//! (or, with `once = false`, every time) enough of it scrolls into view.
//!
//! With staggering enabled the wrapper itself stays put and each direct child
//! owns an independent track whose start is offset by
//! `delay + stagger.delay_for_index(i)`.
//!
//! ```rust
//! use glint_motion::{RevealAnimator, RevealConfig, RevealDirection};
//!
//! let mut reveal = RevealAnimator::new(
//!     RevealConfig::default()
//!         .direction(RevealDirection::Left)
//!         .delay(0.3),
//! );
//! assert_eq!(reveal.pose().opacity, 0.0);
//!
//! reveal.on_intersection(0.5);
//! for _ in 0..120 {
//!     reveal.tick(1.0 / 60.0);
//! }
//! assert_eq!(reveal.pose().opacity, 1.0);
//! ```

use crate::pose::{Pose, RevealDirection, RevealPose, DEFAULT_REVEAL_DISTANCE};
use crate::stagger::StaggerConfig;
use glint_animation::{Spring, SpringConfig, SpringVec2};
use glint_core::{event_types, Rect, StateTransitions, Transform};
use smallvec::SmallVec;

/// Default fraction of the element that must be visible to trigger
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Reveal wrapper inputs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    pub direction: RevealDirection,
    /// Seconds between trigger and motion start
    pub delay: f32,
    /// Suppress replays after the first reveal
    pub once: bool,
    /// Visible fraction (0.0 to 1.0) required to trigger
    pub threshold: f32,
    /// Hidden-pose travel in pixels
    pub distance: f32,
    pub spring: SpringConfig,
    pub stagger: Option<StaggerConfig>,
    pub hidden_scale: Option<f32>,
    pub hidden_rotate: Option<f32>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            direction: RevealDirection::Up,
            delay: 0.0,
            once: true,
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_REVEAL_DISTANCE,
            spring: SpringConfig::reveal(),
            stagger: None,
            hidden_scale: None,
            hidden_rotate: None,
        }
    }
}

impl RevealConfig {
    pub fn direction(mut self, direction: RevealDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Stagger direct children by `step` seconds each
    pub fn stagger_children(mut self, step: f32) -> Self {
        self.stagger = Some(StaggerConfig::new(step));
        self
    }

    pub fn stagger(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn hidden_scale(mut self, scale: f32) -> Self {
        self.hidden_scale = Some(scale);
        self
    }

    pub fn hidden_rotate(mut self, degrees: f32) -> Self {
        self.hidden_rotate = Some(degrees);
        self
    }

    /// Clamp inputs into their valid ranges
    fn sanitized(mut self) -> Self {
        self.threshold = if self.threshold.is_finite() {
            self.threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_THRESHOLD
        };
        self.delay = if self.delay.is_finite() {
            self.delay.max(0.0)
        } else {
            0.0
        };
        if !self.distance.is_finite() {
            self.distance = DEFAULT_REVEAL_DISTANCE;
        }
        self
    }

    fn pose(&self) -> RevealPose {
        let mut pose = RevealPose::new(self.direction, self.distance);
        if let Some(scale) = self.hidden_scale {
            pose = pose.with_hidden_scale(scale);
        }
        if let Some(rotate) = self.hidden_rotate {
            pose = pose.with_hidden_rotate(rotate);
        }
        pose
    }
}

/// Whether the wrapper is showing its content
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl StateTransitions for RevealState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (RevealState::Hidden, VIEWPORT_ENTER) => Some(RevealState::Revealed),
            (RevealState::Revealed, VIEWPORT_LEAVE) => Some(RevealState::Hidden),
            _ => None,
        }
    }
}

/// Target waiting for its delay to elapse
#[derive(Clone, Copy, Debug)]
struct Pending {
    target: Pose,
    remaining: f32,
}

/// Springs for one animated node
#[derive(Clone, Debug)]
struct Track {
    delay: f32,
    opacity: Spring,
    translate: SpringVec2,
    rotate: Spring,
    scale: Spring,
    pending: Option<Pending>,
}

impl Track {
    fn at(spring: SpringConfig, pose: Pose, delay: f32) -> Self {
        Self {
            delay,
            opacity: Spring::new(spring, pose.opacity),
            translate: SpringVec2::new(spring, pose.translate),
            rotate: Spring::new(spring, pose.rotate),
            scale: Spring::new(spring, pose.scale),
            pending: None,
        }
    }

    fn retarget(&mut self, target: Pose) {
        self.opacity.set_target(target.opacity);
        self.translate.set_target(target.translate);
        self.rotate.set_target(target.rotate);
        self.scale.set_target(target.scale);
    }

    /// Start toward `target`, honoring this track's delay when `delayed`
    fn animate_to(&mut self, target: Pose, delayed: bool) {
        if delayed && self.delay > 0.0 {
            self.pending = Some(Pending {
                target,
                remaining: self.delay,
            });
        } else {
            self.pending = None;
            self.retarget(target);
        }
    }

    fn tick(&mut self, dt: f32) {
        let mut dt = dt;
        if let Some(pending) = self.pending.as_mut() {
            pending.remaining -= dt;
            if pending.remaining > 0.0 {
                return;
            }
            // Spend whatever is left of this frame on the motion itself
            dt = -pending.remaining;
            let target = pending.target;
            self.pending = None;
            self.retarget(target);
        }

        self.opacity.step(dt);
        self.translate.step(dt);
        self.rotate.step(dt);
        self.scale.step(dt);
    }

    fn pose(&self) -> Pose {
        Pose {
            opacity: self.opacity.value().clamp(0.0, 1.0),
            translate: self.translate.value(),
            rotate: self.rotate.value(),
            scale: self.scale.value(),
        }
    }

    fn is_settled(&self) -> bool {
        self.pending.is_none()
            && self.opacity.is_settled()
            && self.translate.is_settled()
            && self.rotate.is_settled()
            && self.scale.is_settled()
    }
}

/// Viewport-triggered reveal wrapper
#[derive(Clone, Debug)]
pub struct RevealAnimator {
    config: RevealConfig,
    pose: RevealPose,
    state: RevealState,
    reveal_count: u32,
    bounds: Option<Rect>,
    /// Present when the wrapper animates itself (no stagger)
    own: Option<Track>,
    children: SmallVec<[Track; 4]>,
}

impl RevealAnimator {
    /// Reveal that animates the wrapper as one unit
    pub fn new(config: RevealConfig) -> Self {
        Self::with_children(config, 0)
    }

    /// Reveal over `child_count` direct children. Staggering applies only
    /// when the config has a stagger and there is at least one child.
    pub fn with_children(config: RevealConfig, child_count: usize) -> Self {
        let config = config.sanitized();
        let pose = config.pose();
        let hidden = pose.hidden();

        let (own, children) = match config.stagger {
            Some(stagger) if child_count > 0 => {
                let children: SmallVec<[Track; 4]> = (0..child_count)
                    .map(|i| {
                        let delay = config.delay + stagger.delay_for_index(i, child_count);
                        Track::at(config.spring, hidden, delay)
                    })
                    .collect();
                (None, children)
            }
            _ => (Some(Track::at(config.spring, hidden, config.delay)), SmallVec::new()),
        };

        Self {
            config,
            pose,
            state: RevealState::Hidden,
            reveal_count: 0,
            bounds: None,
            own,
            children,
        }
    }

    /// Set the element's layout bounds (page coordinates)
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn reveal_pose(&self) -> RevealPose {
        self.pose
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// Number of hidden → revealed transitions since mount
    pub fn reveal_count(&self) -> u32 {
        self.reveal_count
    }

    pub fn is_staggered(&self) -> bool {
        self.own.is_none()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Start delay of each staggered child, in seconds
    pub fn child_delays(&self) -> Vec<f32> {
        self.children.iter().map(|t| t.delay).collect()
    }

    /// Feed the element's current visible fraction. Returns true when the
    /// reveal state changed.
    pub fn on_intersection(&mut self, ratio: f32) -> bool {
        let intersecting = if self.config.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.config.threshold
        };

        let event = match (self.state, intersecting) {
            (RevealState::Hidden, true) => {
                if self.config.once && self.reveal_count > 0 {
                    return false;
                }
                event_types::VIEWPORT_ENTER
            }
            (RevealState::Revealed, false) if !self.config.once => event_types::VIEWPORT_LEAVE,
            _ => return false,
        };

        if !self.state.apply(event) {
            return false;
        }

        match self.state {
            RevealState::Revealed => {
                self.reveal_count += 1;
                tracing::trace!(count = self.reveal_count, ratio, "reveal triggered");
                self.animate_all(Pose::VISIBLE, true);
            }
            RevealState::Hidden => {
                tracing::trace!(ratio, "reveal reset");
                self.animate_all(self.pose.hidden(), false);
            }
        }
        true
    }

    fn animate_all(&mut self, target: Pose, delayed: bool) {
        if let Some(own) = self.own.as_mut() {
            own.animate_to(target, delayed);
        }
        for child in self.children.iter_mut() {
            child.animate_to(target, delayed);
        }
    }

    /// Advance all tracks. Returns true while anything is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(own) = self.own.as_mut() {
            own.tick(dt);
        }
        for child in self.children.iter_mut() {
            child.tick(dt);
        }
        !self.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        self.own.as_ref().map_or(true, Track::is_settled)
            && self.children.iter().all(Track::is_settled)
    }

    /// Current pose of the wrapper. When staggered the wrapper never moves.
    pub fn pose(&self) -> Pose {
        self.own.as_ref().map_or(Pose::VISIBLE, Track::pose)
    }

    pub fn transform(&self) -> Transform {
        self.pose().to_transform()
    }

    /// Current pose of a staggered child
    pub fn child_pose(&self, index: usize) -> Option<Pose> {
        self.children.get(index).map(Track::pose)
    }

    pub fn child_transforms(&self) -> Vec<Transform> {
        self.children.iter().map(|t| t.pose().to_transform()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Vec2;

    fn settle(reveal: &mut RevealAnimator, seconds: f32) {
        let frames = (seconds * 60.0).round() as usize;
        for _ in 0..frames {
            reveal.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_left_with_delay() {
        let mut reveal = RevealAnimator::new(
            RevealConfig::default()
                .direction(RevealDirection::Left)
                .delay(0.3),
        );

        let start = reveal.pose();
        assert_eq!(start.translate, Vec2::new(70.0, 0.0));
        assert_eq!(start.opacity, 0.0);

        // Below threshold
        assert!(!reveal.on_intersection(0.19));
        settle(&mut reveal, 1.0);
        assert_eq!(reveal.pose(), start);

        assert!(reveal.on_intersection(0.2));

        // Still waiting out the delay
        settle(&mut reveal, 0.25);
        assert_eq!(reveal.pose().translate, Vec2::new(70.0, 0.0));

        settle(&mut reveal, 2.0);
        assert_eq!(reveal.pose(), Pose::VISIBLE);
        assert!(reveal.is_settled());
    }

    #[test]
    fn test_once_reveals_at_most_once() {
        let mut reveal = RevealAnimator::new(RevealConfig::default());
        for _ in 0..5 {
            reveal.on_intersection(1.0);
            settle(&mut reveal, 0.1);
            reveal.on_intersection(0.0);
            settle(&mut reveal, 0.1);
        }
        assert_eq!(reveal.reveal_count(), 1);
        assert!(reveal.is_revealed());
    }

    #[test]
    fn test_replay_when_not_once() {
        let mut reveal = RevealAnimator::new(RevealConfig::default().once(false));

        reveal.on_intersection(1.0);
        settle(&mut reveal, 2.0);
        assert_eq!(reveal.pose().opacity, 1.0);

        assert!(reveal.on_intersection(0.0));
        settle(&mut reveal, 2.0);
        assert_eq!(reveal.pose().opacity, 0.0);
        assert_eq!(reveal.pose().translate, Vec2::new(0.0, 70.0));

        assert!(reveal.on_intersection(0.5));
        settle(&mut reveal, 2.0);
        assert_eq!(reveal.pose(), Pose::VISIBLE);
        assert_eq!(reveal.reveal_count(), 2);
    }

    #[test]
    fn test_staggered_children_own_the_pose() {
        let config = RevealConfig::default()
            .delay(0.2)
            .stagger_children(0.1);
        let mut reveal = RevealAnimator::with_children(config, 3);

        assert!(reveal.is_staggered());
        assert_eq!(reveal.pose(), Pose::VISIBLE);
        let delays = reveal.child_delays();
        assert!((delays[0] - 0.2).abs() < 1e-6);
        assert!((delays[1] - 0.3).abs() < 1e-6);
        assert!((delays[2] - 0.4).abs() < 1e-6);

        reveal.on_intersection(1.0);
        // 0.25s in: first child is moving, last still waiting
        settle(&mut reveal, 0.25);
        assert!(reveal.child_pose(0).unwrap().opacity > 0.0);
        assert_eq!(reveal.child_pose(2).unwrap().opacity, 0.0);

        settle(&mut reveal, 2.0);
        for i in 0..3 {
            assert_eq!(reveal.child_pose(i), Some(Pose::VISIBLE));
        }
        assert_eq!(reveal.pose(), Pose::VISIBLE);
    }

    #[test]
    fn test_stagger_without_children_animates_wrapper() {
        let reveal = RevealAnimator::with_children(RevealConfig::default().stagger_children(0.1), 0);
        assert!(!reveal.is_staggered());
        assert_eq!(reveal.pose().opacity, 0.0);
    }

    #[test]
    fn test_zero_threshold_needs_some_overlap() {
        let mut reveal = RevealAnimator::new(RevealConfig::default().threshold(0.0));
        assert!(!reveal.on_intersection(0.0));
        assert!(reveal.on_intersection(0.01));
    }

    #[test]
    fn test_invalid_inputs_are_sanitized() {
        let reveal = RevealAnimator::new(
            RevealConfig::default()
                .threshold(f32::NAN)
                .delay(-3.0)
                .distance(f32::INFINITY),
        );
        assert_eq!(reveal.config().threshold, DEFAULT_THRESHOLD);
        assert_eq!(reveal.config().delay, 0.0);
        assert_eq!(reveal.pose().translate, Vec2::new(0.0, DEFAULT_REVEAL_DISTANCE));
    }
}
