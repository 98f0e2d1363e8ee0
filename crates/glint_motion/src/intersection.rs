//! Viewport intersection capability
//!
//! Reveals don't measure anything themselves. The host injects an
//! [`IntersectionObserver`] into the [`crate::MotionScheduler`], which asks it
//! how much of each tracked element is visible whenever the viewport moves.

use glint_core::Rect;

/// Reports the visible fraction (0.0 to 1.0) of `target` within `viewport`
pub trait IntersectionObserver {
    fn intersection_ratio(&self, target: Rect, viewport: Rect) -> f32;
}

/// Pure geometric observer: overlap area divided by target area
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometricObserver {
    /// Grow the viewport by this many pixels on every side before measuring
    pub root_margin: f32,
}

impl GeometricObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_margin(root_margin: f32) -> Self {
        Self { root_margin }
    }
}

impl IntersectionObserver for GeometricObserver {
    fn intersection_ratio(&self, target: Rect, viewport: Rect) -> f32 {
        let m = self.root_margin;
        let root = Rect::new(
            viewport.x() - m,
            viewport.y() - m,
            (viewport.width() + 2.0 * m).max(0.0),
            (viewport.height() + 2.0 * m).max(0.0),
        );
        target.visible_fraction(&root)
    }
}

impl<F> IntersectionObserver for F
where
    F: Fn(Rect, Rect) -> f32,
{
    fn intersection_ratio(&self, target: Rect, viewport: Rect) -> f32 {
        self(target, viewport)
    }
}
