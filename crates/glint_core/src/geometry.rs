//! Core geometry types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// True when the rect has no area (unmeasured layout)
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Overlapping region of two rects, or `None` when they don't overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x().max(other.x());
        let top = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Fraction of this rect's area that lies inside `viewport` (0.0 to 1.0).
    ///
    /// Degenerate (zero-area) rects report 1.0 when their origin is inside the
    /// viewport and 0.0 otherwise, matching how browsers treat empty targets.
    pub fn visible_fraction(&self, viewport: &Rect) -> f32 {
        let area = self.size.area();
        if area <= 0.0 {
            return if viewport.contains(self.origin) { 1.0 } else { 0.0 };
        }

        self.intersection(viewport)
            .map(|overlap| (overlap.size.area() / area).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    /// Component-wise clamp into `[-limit, limit]`
    pub fn clamp_abs(&self, limit: Vec2) -> Self {
        Self::new(
            self.x.clamp(-limit.x.abs(), limit.x.abs()),
            self.y.clamp(-limit.y.abs(), limit.y.abs()),
        )
    }

    /// Component-wise product
    pub fn scale(&self, by: Vec2) -> Self {
        Self::new(self.x * by.x, self.y * by.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_fraction_full_partial_none() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        let inside = Rect::new(100.0, 100.0, 100.0, 100.0);
        assert_eq!(inside.visible_fraction(&viewport), 1.0);

        // Bottom half hangs below the fold
        let half = Rect::new(100.0, 550.0, 100.0, 100.0);
        assert!((half.visible_fraction(&viewport) - 0.5).abs() < 1e-6);

        let below = Rect::new(100.0, 700.0, 100.0, 100.0);
        assert_eq!(below.visible_fraction(&viewport), 0.0);
    }

    #[test]
    fn test_visible_fraction_empty_rect() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(Rect::new(10.0, 10.0, 0.0, 0.0).visible_fraction(&viewport), 1.0);
        assert_eq!(Rect::new(10.0, 900.0, 0.0, 0.0).visible_fraction(&viewport), 0.0);
    }

    #[test]
    fn test_point_difference_is_vector() {
        let v = Point::new(30.0, 10.0) - Point::new(10.0, 40.0);
        assert_eq!(v, Vec2::new(20.0, -30.0));
    }

    #[test]
    fn test_clamp_abs() {
        let v = Vec2::new(5.0, -9.0).clamp_abs(Vec2::new(2.0, 3.0));
        assert_eq!(v, Vec2::new(2.0, -3.0));
    }
}
