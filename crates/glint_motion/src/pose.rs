//! Reveal poses and directions

use glint_core::{Transform, Vec2};
use serde::{Deserialize, Serialize};

/// Default hidden-pose travel distance, in pixels
pub const DEFAULT_REVEAL_DISTANCE: f32 = 70.0;

/// Which way the content travels as it appears.
///
/// `Up` starts below its final position and rises into place, `Left` starts
/// to the right and slides left, and so on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RevealDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl RevealDirection {
    /// Parse a direction name. Unknown names fall back to `Up` rather than
    /// failing the render.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "up" => RevealDirection::Up,
            "down" => RevealDirection::Down,
            "left" => RevealDirection::Left,
            "right" => RevealDirection::Right,
            other => {
                tracing::debug!(direction = other, "unknown reveal direction, using up");
                RevealDirection::Up
            }
        }
    }

    /// Translation of the hidden pose
    pub fn hidden_offset(self, distance: f32) -> Vec2 {
        match self {
            RevealDirection::Up => Vec2::new(0.0, distance),
            RevealDirection::Down => Vec2::new(0.0, -distance),
            RevealDirection::Left => Vec2::new(distance, 0.0),
            RevealDirection::Right => Vec2::new(-distance, 0.0),
        }
    }
}

impl From<String> for RevealDirection {
    fn from(value: String) -> Self {
        RevealDirection::parse(&value)
    }
}

/// One interpolation endpoint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub translate: Vec2,
    pub rotate: f32,
    pub scale: f32,
}

impl Pose {
    pub const VISIBLE: Pose = Pose {
        opacity: 1.0,
        translate: Vec2::ZERO,
        rotate: 0.0,
        scale: 1.0,
    };

    pub fn to_transform(&self) -> Transform {
        Transform {
            translate: self.translate,
            rotate: self.rotate,
            scale: self.scale,
            opacity: self.opacity,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Hidden / visible endpoints of a reveal. The visible pose is always the
/// identity: no translation, full opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPose {
    hidden: Pose,
}

impl RevealPose {
    pub fn new(direction: RevealDirection, distance: f32) -> Self {
        Self {
            hidden: Pose {
                opacity: 0.0,
                translate: direction.hidden_offset(distance),
                rotate: 0.0,
                scale: 1.0,
            },
        }
    }

    pub fn with_hidden_scale(mut self, scale: f32) -> Self {
        self.hidden.scale = scale;
        self
    }

    pub fn with_hidden_rotate(mut self, degrees: f32) -> Self {
        self.hidden.rotate = degrees;
        self
    }

    pub fn hidden(&self) -> Pose {
        self.hidden
    }

    pub fn visible(&self) -> Pose {
        Pose::VISIBLE
    }
}
