//! Visual transform produced by animators and applied to a subtree

use crate::geometry::Vec2;

/// Translate / rotate / scale / opacity applied to an element's subtree.
///
/// Rotation is in degrees. Scale is uniform and applied around the element
/// center by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub rotate: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: Vec2::ZERO,
        rotate: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate: Vec2::new(x, y),
            ..Self::IDENTITY
        }
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_identity(&self) -> bool {
        const EPS: f32 = 0.001;
        self.translate.x.abs() < EPS
            && self.translate.y.abs() < EPS
            && self.rotate.abs() < EPS
            && (self.scale - 1.0).abs() < EPS
            && (self.opacity - 1.0).abs() < EPS
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
