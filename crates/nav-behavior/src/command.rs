//! The motion command produced by the steering computation.

use nav_core::Vec2;

/// A planar twist: linear velocity plus angular speed.
///
/// Produced by the external steering computation each tick and passed
/// through every modulation's `post` hook before the host applies it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Twist {
    pub velocity:      Vec2,
    /// Counter-clockwise angular speed in rad/s.
    pub angular_speed: f32,
}

impl Twist {
    #[inline]
    pub fn new(velocity: Vec2, angular_speed: f32) -> Self {
        Self { velocity, angular_speed }
    }
}
