//! An observed agent, as it appears in another agent's perception snapshot.

use crate::{AgentId, Vec2};

/// One entry of a perceived-neighbor snapshot.
///
/// A `Neighbor` may describe a real agent supplied by the host each step, or
/// a virtual one synthesized by a modulation to bias the steering input.
/// The two are structurally indistinguishable; the synthesizing modulation
/// tracks its own additions for later removal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    pub id:       AgentId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius:   f32,
}

impl Neighbor {
    #[inline]
    pub fn new(id: AgentId, position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self { id, position, velocity, radius }
    }
}
