//! Unit tests for the two modulations.

use std::sync::Arc;

use nav_behavior::{Behavior, EnvironmentState, GeometricState, Modulation, Twist};
use nav_core::{AgentId, AgentRng, Neighbor, Vec2};
use nav_passage::Passage;

use crate::{FollowLeaderModulation, NarrowModulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Passage along +x: gate 0 at x = 2, gate 1 at x = 4, opening y ∈ [-0.25, 0.25].
fn passage() -> Arc<Passage> {
    Arc::new(
        Passage::new(
            (Vec2::new(2.0, -0.25), Vec2::new(2.0, 0.25)),
            (Vec2::new(4.0, -0.25), Vec2::new(4.0, 0.25)),
        )
        .unwrap(),
    )
}

fn behavior_at(position: Vec2, direction: Vec2) -> Behavior {
    let mut behavior = Behavior::new(position, 0.1);
    behavior.optimal_speed = 1.0;
    behavior.horizon = 10.0;
    behavior.target.direction = Some(direction);
    behavior.environment = EnvironmentState::Geometric(GeometricState::default());
    behavior
}

fn set_neighbors(behavior: &mut Behavior, neighbors: Vec<Neighbor>) {
    behavior
        .environment
        .as_geometric_mut()
        .unwrap()
        .neighbors = neighbors;
}

fn state(behavior: &Behavior) -> &GeometricState {
    behavior.environment.as_geometric().unwrap()
}

/// An agent advancing through the passage toward gate 0.
fn oncoming_inside() -> Neighbor {
    Neighbor::new(AgentId(1), Vec2::new(3.0, 0.0), Vec2::new(-1.0, 0.0), 0.2)
}

// ── NarrowModulation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod narrow {
    use super::*;

    #[test]
    fn injects_gate_and_ghost_on_conflict() {
        let passage = passage();
        let mut modulation = NarrowModulation::new(passage.clone(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        set_neighbors(&mut behavior, vec![oncoming_inside()]);

        modulation.pre(&mut behavior, 0.1);

        let state = state(&behavior);
        assert_eq!(state.line_obstacles.len(), 1);
        assert_eq!(state.line_obstacles[0], *passage.gate(0));
        assert_eq!(modulation.injected_count(), 1);

        assert_eq!(state.neighbors.len(), 2);
        let ghost = state.neighbors.last().unwrap();
        assert_eq!(ghost.id, AgentId(1));
        // No RNG configured: the ghost sits exactly in the gate opening.
        assert_eq!(ghost.position, Vec2::new(2.0, 0.0));
        assert_eq!(ghost.velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(ghost.radius, 0.2);
    }

    #[test]
    fn repeated_conflict_keeps_one_obstacle() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));

        for _ in 0..3 {
            // The host refreshes the neighbor snapshot from world truth
            // every tick; injected obstacles persist.
            set_neighbors(&mut behavior, vec![oncoming_inside()]);
            modulation.pre(&mut behavior, 0.1);
        }

        let state = state(&behavior);
        assert_eq!(state.line_obstacles.len(), 1);
        assert_eq!(modulation.injected_count(), 1);
        assert_eq!(state.neighbors.len(), 2);
    }

    #[test]
    fn obstacles_restored_when_conflict_clears() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));

        // A wall the host put there before any modulation ran.
        let wall = nav_core::LineSegment::new(Vec2::new(0.0, 0.5), Vec2::new(6.0, 0.5));
        behavior
            .environment
            .as_geometric_mut()
            .unwrap()
            .line_obstacles = vec![wall];

        set_neighbors(&mut behavior, vec![oncoming_inside()]);
        modulation.pre(&mut behavior, 0.1);
        assert_eq!(state(&behavior).line_obstacles.len(), 2);

        // Next tick the rival has turned around and is leaving the far way.
        set_neighbors(
            &mut behavior,
            vec![Neighbor::new(AgentId(1), Vec2::new(3.0, 0.0), Vec2::new(1.0, 0.0), 0.2)],
        );
        modulation.pre(&mut behavior, 0.1);

        let state = state(&behavior);
        assert_eq!(state.line_obstacles.len(), 1);
        assert_eq!(state.line_obstacles[0], wall);
        assert_eq!(modulation.injected_count(), 0);
    }

    #[test]
    fn conflict_switching_gates_swaps_the_segment() {
        let passage = passage();
        let mut modulation = NarrowModulation::new(passage.clone(), AgentId(0), 1.0, None);

        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        set_neighbors(&mut behavior, vec![oncoming_inside()]);
        modulation.pre(&mut behavior, 0.1);
        assert_eq!(state(&behavior).line_obstacles[0], *passage.gate(0));

        // Teleported to the far side, now contesting gate 1 against an
        // agent advancing away from it.
        behavior.position = Vec2::new(6.0, 0.0);
        behavior.target.direction = Some(Vec2::new(-1.0, 0.0));
        set_neighbors(
            &mut behavior,
            vec![Neighbor::new(AgentId(1), Vec2::new(3.0, 0.0), Vec2::new(1.0, 0.0), 0.2)],
        );
        modulation.pre(&mut behavior, 0.1);

        let state = state(&behavior);
        assert_eq!(state.line_obstacles.len(), 1);
        assert_eq!(state.line_obstacles[0], *passage.gate(1));
        assert_eq!(modulation.injected_count(), 1);
    }

    #[test]
    fn ghost_jitter_stays_in_bounds() {
        let rng = AgentRng::new(42, AgentId(0));
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, Some(rng));
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        set_neighbors(&mut behavior, vec![oncoming_inside()]);

        modulation.pre(&mut behavior, 0.1);

        let ghost = *state(&behavior).neighbors.last().unwrap();
        let offset = ghost.position - Vec2::new(2.0, 0.0);
        assert!((0.0..0.1).contains(&offset.x), "jitter x = {}", offset.x);
        assert!((0.0..0.1).contains(&offset.y), "jitter y = {}", offset.y);
    }

    #[test]
    fn own_image_is_not_a_rival() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        // The only "oncoming agent" is this agent's own wrapped-around image.
        set_neighbors(
            &mut behavior,
            vec![Neighbor::new(AgentId(0), Vec2::new(3.0, 0.0), Vec2::new(-1.0, 0.0), 0.1)],
        );

        modulation.pre(&mut behavior, 0.1);

        assert!(state(&behavior).line_obstacles.is_empty());
        assert_eq!(modulation.injected_count(), 0);
    }

    #[test]
    fn footprint_bias_applies_once_per_episode() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        let image = Neighbor::new(AgentId(0), Vec2::new(3.0, 0.0), Vec2::new(-1.0, 0.0), 0.1);
        set_neighbors(&mut behavior, vec![image]);

        // Even without a host refresh in between, repeated ticks never
        // stack the increment.
        for _ in 0..5 {
            modulation.pre(&mut behavior, 0.1);
        }
        let biased = state(&behavior).neighbors[0].radius;
        assert!((biased - 1.0).abs() < 1e-6, "got {biased}");
    }

    #[test]
    fn footprint_bias_only_on_configured_side() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        // Own image behind us (negative side): untouched.
        set_neighbors(
            &mut behavior,
            vec![Neighbor::new(AgentId(0), Vec2::new(-3.0, 0.0), Vec2::ZERO, 0.1)],
        );

        modulation.pre(&mut behavior, 0.1);

        assert_eq!(state(&behavior).neighbors[0].radius, 0.1);
    }

    #[test]
    fn unconfigured_is_a_no_op() {
        let mut modulation = NarrowModulation::unconfigured();
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        set_neighbors(&mut behavior, vec![oncoming_inside()]);

        modulation.pre(&mut behavior, 0.1);

        assert!(state(&behavior).line_obstacles.is_empty());
        assert_eq!(state(&behavior).neighbors.len(), 1);
    }

    #[test]
    fn no_direction_is_a_no_op() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        behavior.target.direction = None;
        set_neighbors(&mut behavior, vec![oncoming_inside()]);

        modulation.pre(&mut behavior, 0.1);

        assert!(state(&behavior).line_obstacles.is_empty());
    }

    #[test]
    fn non_geometric_environment_is_a_no_op() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        behavior.environment = EnvironmentState::Other;

        // Must not panic or inject anywhere.
        modulation.pre(&mut behavior, 0.1);
        assert_eq!(modulation.injected_count(), 0);
    }

    #[test]
    fn post_passes_the_command_through() {
        let mut modulation = NarrowModulation::new(passage(), AgentId(0), 1.0, None);
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        let cmd = Twist::new(Vec2::new(0.7, 0.0), 0.3);
        assert_eq!(modulation.post(&mut behavior, 0.1, cmd), cmd);
    }
}

// ── FollowLeaderModulation ───────────────────────────────────────────────────

#[cfg(test)]
mod follow_leader {
    use super::*;

    fn follower() -> Behavior {
        let mut behavior = behavior_at(Vec2::ZERO, Vec2::new(1.0, 0.0));
        behavior.radius = 0.2;
        behavior
    }

    fn leader_at(x: f32) -> Neighbor {
        Neighbor::new(AgentId(1), Vec2::new(x, 0.0), Vec2::new(0.5, 0.0), 0.2)
    }

    fn oncoming_at(x: f32, radius: f32) -> Neighbor {
        Neighbor::new(AgentId(2), Vec2::new(x, 0.0), Vec2::new(-1.0, 0.0), radius)
    }

    #[test]
    fn generous_gap_leaves_speed_alone() {
        // delta = 3 - 0.2 - 0.2 = 2.6, dx = 0.6 - 2.6 = -2.0,
        // cap = 0.5 + 4.0 = 4.5 → clamped to the 1.0 baseline.
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        set_neighbors(&mut behavior, vec![leader_at(3.0), oncoming_at(5.0, 0.3)]);

        modulation.pre(&mut behavior, 0.1);

        assert_eq!(behavior.optimal_speed, 1.0);
    }

    #[test]
    fn tight_gap_caps_to_zero() {
        // delta = 0.5 - 0.4 = 0.1, dx = 0.6 - 0.1 = 0.5,
        // cap = 0.5 - 1.0 < 0 → floored at 0.
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        set_neighbors(&mut behavior, vec![leader_at(0.5), oncoming_at(5.0, 0.3)]);

        modulation.pre(&mut behavior, 0.1);

        assert_eq!(behavior.optimal_speed, 0.0);
    }

    #[test]
    fn no_opposing_traffic_means_no_cap() {
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        set_neighbors(&mut behavior, vec![leader_at(0.5)]);

        modulation.pre(&mut behavior, 0.1);

        assert_eq!(behavior.optimal_speed, 1.0);
    }

    #[test]
    fn no_leader_means_no_cap() {
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        set_neighbors(&mut behavior, vec![oncoming_at(0.5, 0.3)]);

        modulation.pre(&mut behavior, 0.1);

        assert_eq!(behavior.optimal_speed, 1.0);
    }

    #[test]
    fn traffic_behind_is_ignored() {
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        set_neighbors(&mut behavior, vec![leader_at(-1.0), oncoming_at(-2.0, 0.3)]);

        modulation.pre(&mut behavior, 0.1);

        assert_eq!(behavior.optimal_speed, 1.0);
    }

    #[test]
    fn crossing_traffic_is_in_neither_flow() {
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        let crossing = Neighbor::new(AgentId(3), Vec2::new(2.0, 0.0), Vec2::new(0.0, 1.0), 0.3);
        set_neighbors(&mut behavior, vec![leader_at(3.0), crossing]);

        modulation.pre(&mut behavior, 0.1);

        // The crossing agent is not opposing flow, so no cap applies.
        assert_eq!(behavior.optimal_speed, 1.0);
    }

    #[test]
    fn nearest_oncoming_agent_sets_the_cap() {
        // The distant huge agent would cap us to zero; the near small one
        // leaves the cap non-binding.  Nearest must win.
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        set_neighbors(
            &mut behavior,
            vec![leader_at(3.0), oncoming_at(4.0, 0.1), oncoming_at(5.0, 2.0)],
        );

        modulation.pre(&mut behavior, 0.1);

        assert_eq!(behavior.optimal_speed, 1.0);
    }

    #[test]
    fn post_restores_the_baseline() {
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        set_neighbors(&mut behavior, vec![leader_at(0.5), oncoming_at(5.0, 0.3)]);

        modulation.pre(&mut behavior, 0.1);
        assert_eq!(behavior.optimal_speed, 0.0);

        let cmd = Twist::new(behavior.desired_velocity(), 0.0);
        let cmd = modulation.post(&mut behavior, 0.1, cmd);
        assert_eq!(cmd.velocity, Vec2::ZERO);
        assert_eq!(behavior.optimal_speed, 1.0);
    }

    #[test]
    fn post_without_pre_changes_nothing() {
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        behavior.optimal_speed = 0.7;

        let cmd = Twist::default();
        modulation.post(&mut behavior, 0.1, cmd);

        assert_eq!(behavior.optimal_speed, 0.7);
    }

    #[test]
    fn non_geometric_environment_is_a_no_op() {
        let mut modulation = FollowLeaderModulation::new();
        let mut behavior = follower();
        behavior.environment = EnvironmentState::Other;

        modulation.pre(&mut behavior, 0.1);
        modulation.post(&mut behavior, 0.1, Twist::default());

        assert_eq!(behavior.optimal_speed, 1.0);
    }
}

// ── Registry wiring ──────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use nav_behavior::ModulationRegistry;

    use crate::register_defaults;

    #[test]
    fn default_names_are_registered() {
        let mut registry = ModulationRegistry::new();
        register_defaults(&mut registry).unwrap();
        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["FollowLeader", "Narrow"]);
        assert!(registry.create("Narrow").is_ok());
        assert!(registry.create("FollowLeader").is_ok());
    }
}
