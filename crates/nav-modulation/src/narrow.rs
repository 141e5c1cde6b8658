//! Yield-before-the-bottleneck modulation.

use std::sync::Arc;

use nav_behavior::{Behavior, Modulation};
use nav_core::{AgentId, AgentRng, LineSegment, Neighbor, Vec2};
use nav_passage::{Kinematics, Passage, find_conflict};

/// Upper bound of each jitter component applied to a virtual neighbor's
/// position, so stacked agents don't all brake against the exact same point.
const JITTER_MAX: f32 = 0.1;

/// Radius increment applied to the agent's own wrapped-around image when it
/// appears on the biased side, widening the perceived footprint there.
const LATERAL_RADIUS_BIAS: f32 = 0.9;

/// Makes an agent yield before entering a contested narrow passage.
///
/// Each tick the pre-hook runs [`find_conflict`] against the current
/// perception snapshot.  While a conflict holds, the contested gate is kept
/// in the perceived obstacle list (exactly once) and a virtual neighbor —
/// the conflicting agent teleported into the gate opening, plus jitter — is
/// appended to the perceived neighbor list.  The external steering
/// computation then brakes and holds back as if someone were standing in
/// the doorway.  When the conflict clears, the injected obstacle entries are
/// removed by count and the perceived world is back to what the host
/// supplied.
///
/// The neighbor snapshot is refreshed by the host every tick, so virtual
/// neighbors need no removal; only obstacle segments are tracked.
///
/// Idle until configured with a passage; degrades to a per-tick no-op
/// whenever the behavior has no target direction or no geometric
/// environment.
pub struct NarrowModulation {
    passage: Option<Arc<Passage>>,
    /// The owning agent, excluded from conflict queries and matched against
    /// wrapped-around images of itself for the footprint bias.
    agent: AgentId,
    /// +1 or -1: on which side of the agent (along x) the footprint bias
    /// applies.  Matches the agent's travel direction along the corridor.
    side: f32,
    /// Segments this instance has appended to the obstacle snapshot.
    /// Never holds more than one entry.
    injected: Vec<LineSegment>,
    /// Jitter source for virtual-neighbor placement; zero jitter when absent.
    rng: Option<AgentRng>,
    /// Unbiased radius of the own-image entry, latched while the footprint
    /// bias is active so the increment is applied once per episode.
    bias_base: Option<f32>,
}

impl NarrowModulation {
    /// Registry name.
    pub const NAME: &'static str = "Narrow";

    pub fn new(passage: Arc<Passage>, agent: AgentId, side: f32, rng: Option<AgentRng>) -> Self {
        Self {
            passage: Some(passage),
            agent,
            side,
            injected: Vec::new(),
            rng,
            bias_base: None,
        }
    }

    /// An instance with no passage — a permanent no-op until the host
    /// configures it.  This is what the registry factory produces.
    pub fn unconfigured() -> Self {
        Self {
            passage: None,
            agent: AgentId::INVALID,
            side: 1.0,
            injected: Vec::new(),
            rng: None,
            bias_base: None,
        }
    }

    pub fn set_passage(&mut self, passage: Arc<Passage>) {
        self.passage = Some(passage);
    }

    pub fn set_agent(&mut self, agent: AgentId, side: f32) {
        self.agent = agent;
        self.side = side;
    }

    /// Number of obstacle entries currently injected (0 or 1).
    pub fn injected_count(&self) -> usize {
        self.injected.len()
    }

    fn jitter(&mut self) -> Vec2 {
        match &mut self.rng {
            Some(rng) => Vec2::new(rng.gen_range(0.0..JITTER_MAX), rng.gen_range(0.0..JITTER_MAX)),
            None => Vec2::ZERO,
        }
    }
}

impl Modulation for NarrowModulation {
    fn pre(&mut self, behavior: &mut Behavior, _dt: f32) {
        let Some(passage) = self.passage.clone() else {
            return;
        };
        let Some(direction) = behavior.target.direction else {
            return;
        };

        let query = Kinematics {
            position:      behavior.position,
            velocity:      direction * behavior.optimal_speed,
            radius:        behavior.radius,
            safety_margin: behavior.safety_margin,
            horizon:       behavior.horizon,
        };
        let own = self.agent;
        let Some(state) = behavior.environment.as_geometric_mut() else {
            return;
        };
        let visible: Vec<Neighbor> = state
            .neighbors
            .iter()
            .filter(|n| n.id != own)
            .copied()
            .collect();

        match find_conflict(&passage, &query, &visible) {
            Some(conflict) => {
                assert_ne!(
                    conflict.neighbor.id, own,
                    "conflict resolver returned the querying agent at {}",
                    query.position
                );
                let rival = *conflict.neighbor;
                let gate = *passage.gate(conflict.gate);

                // Keep the contested gate in the obstacle snapshot exactly
                // once.  If the conflict switched gates since last tick,
                // retire the stale segment in the same replacement.
                if self.injected.first() != Some(&gate) {
                    let mut obstacles = state.line_obstacles.clone();
                    for _ in self.injected.drain(..) {
                        obstacles.pop();
                    }
                    obstacles.push(gate);
                    self.injected.push(gate);
                    state.line_obstacles = obstacles;
                }

                // Stand the rival in the gate opening: same id, radius and
                // velocity, position at the gate midpoint plus jitter.
                let jitter = self.jitter();
                let ghost = Neighbor::new(
                    rival.id,
                    passage.enter_position(conflict.gate) + jitter,
                    rival.velocity,
                    rival.radius,
                );
                let mut neighbors = state.neighbors.clone();
                neighbors.push(ghost);
                state.neighbors = neighbors;
            }
            None => {
                // Remove exactly what this instance added — by count, not
                // value, in case another modulation appended equal segments.
                if !self.injected.is_empty() {
                    let mut obstacles = state.line_obstacles.clone();
                    for _ in self.injected.drain(..) {
                        obstacles.pop();
                    }
                    state.line_obstacles = obstacles;
                }
            }
        }

        // Footprint bias, independent of conflict state: when the agent's
        // own wrapped-around image shows up on the configured side, widen
        // its perceived radius.  The latch pins the biased value to one
        // increment over the unbiased base for the whole episode.
        let position = query.position;
        let mut biased = false;
        let mut neighbors = state.neighbors.clone();
        for n in &mut neighbors {
            if n.id == own && (n.position.x - position.x) * self.side > 0.0 {
                let base = *self.bias_base.get_or_insert(n.radius);
                n.radius = base + LATERAL_RADIUS_BIAS;
                biased = true;
            }
        }
        if biased {
            state.neighbors = neighbors;
        } else {
            self.bias_base = None;
        }
    }
}
