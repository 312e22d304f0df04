//! Rectangle algebra in a y-down coordinate system.
//!
//! All coordinates are `f32`. Rectangles are described by their top-left
//! corner and size; the right and bottom edges are exclusive.
//!
//! Intersection never fails: disjoint rectangles yield a rectangle with a
//! non-positive width or height, so callers test [`Rectangle::overlap_area`]
//! (or [`Rectangle::area`] of the result) rather than matching on an option.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Same size, moved so that its top-left corner is `position`.
    #[inline]
    pub fn with_position(self, position: Vector2) -> Self {
        Self::new(position.x, position.y, self.width, self.height)
    }

    /// Same size, shifted by `offset`.
    #[inline]
    pub fn translated(self, offset: Vector2) -> Self {
        Self::new(
            self.x + offset.x,
            self.y + offset.y,
            self.width,
            self.height,
        )
    }

    /// Area, clamped to zero for degenerate rectangles.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Axis-aligned intersection.
    ///
    /// When the rectangles are disjoint the result has `width <= 0` or
    /// `height <= 0`; its position is still `max(left)`, `max(top)`.
    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rectangle::new(left, top, right - left, bottom - top)
    }

    /// Area shared by both rectangles, zero when they only touch or are disjoint.
    #[inline]
    pub fn overlap_area(&self, other: &Rectangle) -> f32 {
        self.intersect(other).area()
    }

    /// Half-open point containment: `x` in `[left, right)`, `y` in `[top, bottom)`.
    #[inline]
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
