//! Pointer parallax animator
//!
//! Tracks the pointer relative to a reference rectangle's center. The raw
//! offset is normalized to `[-1, 1]` on each axis (a pointer on the right edge
//! reads `x = 1`), smoothed, and mapped linearly into the configured
//! translation / rotation ranges.

use glint_animation::{SmoothedVec2, Smoothing, SpringConfig};
use glint_core::{Point, Rect, Transform, Vec2};
use serde::{Deserialize, Serialize};

/// What the pointer offset is measured against
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallaxReference {
    /// A measured element, usually the enclosing section
    #[default]
    Element,
    /// The whole viewport; the scheduler keeps the reference in sync on scroll
    Viewport,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Maximum translation in pixels at the reference edge
    pub translate_range: Vec2,
    /// Maximum rotation in degrees at the reference edge
    pub rotate_range: f32,
    pub smoothing: Smoothing,
    /// Multiplier for layered parallax (background layers < 1)
    pub depth: f32,
    pub reference: ParallaxReference,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            translate_range: Vec2::splat(15.0),
            rotate_range: 2.0,
            smoothing: Smoothing::Spring(SpringConfig::parallax()),
            depth: 1.0,
            reference: ParallaxReference::Element,
        }
    }
}

impl ParallaxConfig {
    /// Full-window tracking used by the landing hero
    pub fn hero() -> Self {
        Self {
            translate_range: Vec2::new(30.0, 20.0),
            rotate_range: 4.0,
            reference: ParallaxReference::Viewport,
            ..Self::default()
        }
    }

    pub fn translate_range(mut self, x: f32, y: f32) -> Self {
        self.translate_range = Vec2::new(x, y);
        self
    }

    pub fn rotate_range(mut self, degrees: f32) -> Self {
        self.rotate_range = degrees;
        self
    }

    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }
}

/// Pointer-following wrapper with its own smoothing state
#[derive(Clone, Debug)]
pub struct ParallaxAnimator {
    config: ParallaxConfig,
    reference: Option<Rect>,
    offset: SmoothedVec2,
}

impl ParallaxAnimator {
    pub fn new(config: ParallaxConfig) -> Self {
        let offset = SmoothedVec2::new(config.smoothing, Vec2::ZERO);
        Self {
            config,
            reference: None,
            offset,
        }
    }

    pub fn with_reference(mut self, reference: Rect) -> Self {
        self.set_reference(reference);
        self
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    /// Update the measured reference bounds. Empty rects count as unmeasured.
    pub fn set_reference(&mut self, reference: Rect) {
        self.reference = (!reference.is_empty()).then_some(reference);
    }

    pub fn clear_reference(&mut self) {
        self.reference = None;
        self.offset.set_target(Vec2::ZERO);
    }

    pub fn reference(&self) -> Option<Rect> {
        self.reference
    }

    /// Feed a pointer position (page coordinates). Returns true when the move
    /// retargeted the offset; moves are ignored until a reference is measured.
    pub fn on_pointer_move(&mut self, pointer: Point) -> bool {
        let Some(reference) = self.reference else {
            return false;
        };

        if !reference.contains(pointer) {
            self.on_pointer_leave();
            return false;
        }

        let center = reference.center();
        let half = Vec2::new(reference.width() / 2.0, reference.height() / 2.0);
        let raw = pointer - center;
        let normalized = Vec2::new(raw.x / half.x, raw.y / half.y).clamp_abs(Vec2::ONE);

        self.offset.set_target(normalized);
        true
    }

    /// Relax back toward rest through the smoothing filter
    pub fn on_pointer_leave(&mut self) {
        self.offset.set_target(Vec2::ZERO);
    }

    /// Returns true while the offset is still moving
    pub fn tick(&mut self, dt: f32) -> bool {
        self.offset.step(dt);
        !self.offset.is_settled()
    }

    /// Smoothed normalized offset
    pub fn pointer_offset(&self) -> Vec2 {
        self.offset.value()
    }

    pub fn transform(&self) -> Transform {
        let offset = self.offset.value();
        let depth = self.config.depth;
        let translate = offset.scale(self.config.translate_range) * depth;
        Transform {
            translate,
            rotate: offset.x * self.config.rotate_range * depth,
            ..Transform::IDENTITY
        }
    }

    /// Offset has reached its target, wherever the pointer is
    pub fn is_settled(&self) -> bool {
        self.offset.is_settled()
    }

    /// Settled back at the centered, untransformed position
    pub fn is_at_rest(&self) -> bool {
        self.is_settled() && self.offset.target() == Vec2::ZERO
    }
}
