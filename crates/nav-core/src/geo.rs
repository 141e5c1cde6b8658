//! Planar vector type and arithmetic.
//!
//! `Vec2` uses `f32` (single-precision) components.  At corridor scale
//! (metres, not kilometres) this gives sub-millimetre precision while
//! keeping agent snapshots compact — the same trade the rest of the
//! workspace makes everywhere.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A planar vector (or point) stored as single-precision floats.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at angle `radians` from the +x axis.
    #[inline]
    pub fn from_angle(radians: f32) -> Self {
        Self { x: radians.cos(), y: radians.sin() }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3-D cross product — positive when `other` is
    /// counter-clockwise of `self`.
    #[inline]
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Rotation by +90° (counter-clockwise perpendicular).
    #[inline]
    pub fn rotated_90(self) -> Vec2 {
        Vec2 { x: -self.y, y: self.x }
    }

    /// `self / |self|`, or `None` when the norm is below `eps`.
    pub fn normalized(self, eps: f32) -> Option<Vec2> {
        let n = self.norm();
        if n < eps {
            None
        } else {
            Some(Vec2 { x: self.x / n, y: self.y / n })
        }
    }

    /// Midpoint of the segment from `self` to `other`.
    #[inline]
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2 { x: 0.5 * (self.x + other.x), y: 0.5 * (self.y + other.y) }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
