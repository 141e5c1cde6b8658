//! Finite line segments and directed ray-crossing queries.
//!
//! A `LineSegment` caches its unit edge vector, length, and unit normal
//! (the edge rotated +90°) at construction, so the per-step crossing
//! queries are a handful of multiplies.

use crate::{EPSILON, Vec2};

/// A finite, oriented line segment from `p1` to `p2`.
///
/// The normal points to the left of the `p1 → p2` direction.  Which side
/// that is in world terms is decided by whoever orders the endpoints —
/// passage construction normalizes gate endpoint order so both gate
/// normals point into the passage interior.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    pub p1: Vec2,
    pub p2: Vec2,
    /// Unit vector from `p1` to `p2`.
    e: Vec2,
    /// Unit normal: `e` rotated +90°.
    normal: Vec2,
    length: f32,
}

impl LineSegment {
    /// Build a segment.  Degenerate (near zero-length) segments keep a zero
    /// edge vector; every crossing query on them answers `None`.
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        let delta = p2 - p1;
        let length = delta.norm();
        let e = delta.normalized(EPSILON).unwrap_or(Vec2::ZERO);
        Self { p1, p2, e, normal: e.rotated_90(), length }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        self.p1.midpoint(self.p2)
    }

    /// Parametric time at which the ray `position + t * velocity` crosses
    /// this segment, counted only when the motion agrees with `orientation`:
    /// `+1.0` along the normal, `-1.0` against it.
    ///
    /// Returns `None` when the ray misses the finite segment, moves away
    /// from it, or the normal component of `velocity` is below [`EPSILON`]
    /// (a stationary or parallel-moving agent never crosses).
    pub fn time_to_crossing(&self, position: Vec2, velocity: Vec2, orientation: f32) -> Option<f32> {
        let vn = velocity.dot(self.normal);
        if orientation * vn < EPSILON {
            return None;
        }
        let t = (self.p1 - position).dot(self.normal) / vn;
        if t < 0.0 {
            return None;
        }
        // Does the crossing point fall within the segment extent?
        let s = (position + velocity * t - self.p1).dot(self.e);
        if s < 0.0 || s > self.length {
            return None;
        }
        Some(t)
    }
}

/// Endpoint equality (exact), ignoring the cached derived fields.
impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        self.p1 == other.p1 && self.p2 == other.p2
    }
}

impl std::fmt::Display for LineSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} → {}]", self.p1, self.p2)
    }
}
