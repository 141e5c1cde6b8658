//! The per-agent behavior facade modulations read and write.

use nav_core::Vec2;

use crate::EnvironmentState;

/// Where the agent is trying to go.
///
/// Only the direction form matters to this workspace; an absent direction
/// turns every direction-dependent modulation into a per-tick no-op.
#[derive(Copy, Clone, Debug, Default)]
pub struct Target {
    /// Unit travel direction, when the agent has one.
    pub direction: Option<Vec2>,
}

/// One agent's steering-computation state, owned by the host.
///
/// The steering computation itself lives outside this workspace; modulations
/// see this facade in their hooks and adjust the perceived inputs
/// (`environment`, `optimal_speed`) before it runs.  All fields are plain
/// data refreshed by the host — nothing here is derived or cached.
#[derive(Clone, Debug)]
pub struct Behavior {
    pub position:      Vec2,
    /// Heading angle in radians.
    pub orientation:   f32,
    pub radius:        f32,
    /// Extra clearance the agent keeps beyond its radius.
    pub safety_margin: f32,
    /// How far ahead (travelled distance) the agent reacts to obstacles.
    pub horizon:       f32,
    /// Nominal cruise speed; modulations may cap it for one tick.
    pub optimal_speed: f32,
    pub target:        Target,
    pub environment:   EnvironmentState,
}

impl Behavior {
    /// A behavior at `position` with the given body `radius`; every other
    /// field starts neutral and is set by the host.
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            orientation: 0.0,
            radius,
            safety_margin: 0.0,
            horizon: 0.0,
            optimal_speed: 0.0,
            target: Target::default(),
            environment: EnvironmentState::Other,
        }
    }

    /// The velocity the agent would pick with nothing in the way:
    /// `optimal_speed` along the target direction, zero without a target.
    pub fn desired_velocity(&self) -> Vec2 {
        match self.target.direction {
            Some(direction) => direction * self.optimal_speed,
            None => Vec2::ZERO,
        }
    }
}
