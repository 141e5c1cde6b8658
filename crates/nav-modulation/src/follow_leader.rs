//! Follow-the-leader speed modulation.

use nav_behavior::{Behavior, Modulation, Twist};
use nav_core::{Neighbor, Vec2};

/// Time over which the gap correction is folded into the speed cap.
const RELAXATION_TIME: f32 = 0.5;

/// Caps an agent's speed behind its leader when oncoming traffic is ahead.
///
/// When both a same-flow leader and an opposing agent are in front, the
/// leader will have to make room: this modulation caps the follower's
/// nominal speed at the leader's forward speed, corrected by how much gap
/// the oncoming agent needs (twice its radius) relative to the current gap
/// to the leader.  A generous gap raises the cap above the nominal speed,
/// where the clamp makes it a no-op; a tight gap pulls the follower below
/// the leader's speed so space opens up.
///
/// The cap is scoped to one steering computation: `pre` saves the nominal
/// speed and `post` writes it back, so the capped value never becomes the
/// next tick's notion of "nominal".
#[derive(Default)]
pub struct FollowLeaderModulation {
    /// Nominal speed saved by `pre`, restored (and cleared) by `post`.
    baseline: Option<f32>,
}

impl FollowLeaderModulation {
    /// Registry name.
    pub const NAME: &'static str = "FollowLeader";

    pub fn new() -> Self {
        Self::default()
    }
}

/// Forward projection of a neighbor's position relative to `position`.
fn forward_gap(n: &Neighbor, position: Vec2, direction: Vec2) -> f32 {
    direction.dot(n.position - position)
}

impl Modulation for FollowLeaderModulation {
    fn pre(&mut self, behavior: &mut Behavior, _dt: f32) {
        let Some(state) = behavior.environment.as_geometric() else {
            return;
        };
        self.baseline = Some(behavior.optimal_speed);
        let Some(direction) = behavior.target.direction else {
            return;
        };
        let position = behavior.position;

        // Only traffic strictly ahead matters, split by flow direction.
        let mut same_flow: Vec<&Neighbor> = Vec::new();
        let mut opposing_flow: Vec<&Neighbor> = Vec::new();
        for n in &state.neighbors {
            if forward_gap(n, position, direction) <= 0.0 {
                continue;
            }
            let flow = n.velocity.dot(direction);
            if flow > 0.0 {
                same_flow.push(n);
            } else if flow < 0.0 {
                opposing_flow.push(n);
            }
        }

        // No leader to follow, or nobody coming: nothing to make room for.
        let Some(leader) = same_flow
            .iter()
            .min_by(|a, b| {
                forward_gap(a, position, direction)
                    .total_cmp(&forward_gap(b, position, direction))
            })
            .copied()
        else {
            return;
        };
        let Some(oncoming) = opposing_flow
            .iter()
            .min_by(|a, b| {
                forward_gap(a, position, direction)
                    .total_cmp(&forward_gap(b, position, direction))
            })
            .copied()
        else {
            return;
        };

        let delta =
            forward_gap(leader, position, direction) - leader.radius - behavior.radius;
        let dx = 2.0 * oncoming.radius - delta;
        let capped = direction.dot(leader.velocity) - dx / RELAXATION_TIME;
        behavior.optimal_speed = capped.max(0.0).min(behavior.optimal_speed);
    }

    fn post(&mut self, behavior: &mut Behavior, _dt: f32, cmd: Twist) -> Twist {
        if let Some(baseline) = self.baseline.take() {
            behavior.optimal_speed = baseline;
        }
        cmd
    }
}
