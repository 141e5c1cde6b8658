//! corridor — bidirectional traffic through a narrow passage.
//!
//! Eight agents commute along a periodic corridor whose middle narrows to a
//! single lane.  Each agent carries a `NarrowModulation` (yield before a
//! contested passage) and a `FollowLeaderModulation` (don't outrun a leader
//! who must make room), wrapped around a deliberately simple
//! direction-following steering stand-in.  Watch the lap counts: without
//! the modulations, opposing platoons meet head-on inside the narrowing
//! and grind to a halt.

mod world;

use std::sync::Arc;

use anyhow::Result;

use nav_behavior::{
    Behavior, EnvironmentState, GeometricState, Modulation, ModulationRegistry, Twist,
};
use nav_core::{AgentId, AgentRng, EPSILON, Neighbor, SimRng, Vec2};
use nav_modulation::{FollowLeaderModulation, NarrowModulation, register_defaults};
use nav_passage::Passage;

use world::CorridorWorld;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:     usize = 8;
const SEED:            u64   = 42;
const DT:              f32   = 0.1;
const TICKS:           u64   = 1_200;
const PROGRESS_EVERY:  u64   = 200;

const CORRIDOR_LENGTH: f32 = 10.0;
const CORRIDOR_WIDTH:  f32 = 1.0;
const NARROW_LENGTH:   f32 = 2.0;
const NARROW_WIDTH:    f32 = 0.5;

const AGENT_RADIUS:  f32 = 0.1;
const SAFETY_MARGIN: f32 = 0.05;
const HORIZON:       f32 = 4.0;
const OPTIMAL_SPEED: f32 = 0.6;
const SENSING_RANGE: f32 = 4.0;

/// Gain pulling agents toward the centerline so the stand-in steering can
/// thread the narrowing at all.
const CENTERING_GAIN: f32 = 0.3;
/// Clearance-to-speed ratio of the stand-in's braking ramp.
const BRAKE_TIME: f32 = 1.0;

// ── Agents ────────────────────────────────────────────────────────────────────

struct Agent {
    id:          AgentId,
    behavior:    Behavior,
    modulations: Vec<Box<dyn Modulation>>,
    /// Applied velocity of the last tick, published to other agents'
    /// neighbor snapshots.
    velocity:    Vec2,
    laps:        u32,
}

fn spawn_agents(world: &CorridorWorld, passage: &Arc<Passage>, rng: &mut SimRng) -> Result<Vec<Agent>> {
    let mut registry = ModulationRegistry::new();
    register_defaults(&mut registry)?;

    let mut agents = Vec::with_capacity(AGENT_COUNT);
    for i in 0..AGENT_COUNT {
        let id = AgentId(i as u32);
        let direction = if i % 2 == 0 {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(-1.0, 0.0)
        };

        let mut behavior = Behavior::new(world.random_spawn(rng), AGENT_RADIUS);
        behavior.orientation = if direction.x > 0.0 { 0.0 } else { std::f32::consts::PI };
        behavior.safety_margin = SAFETY_MARGIN;
        behavior.horizon = HORIZON;
        behavior.optimal_speed = OPTIMAL_SPEED;
        behavior.target.direction = Some(direction);
        behavior.environment = EnvironmentState::Geometric(GeometricState {
            neighbors:      Vec::new(),
            line_obstacles: world.walls.clone(),
        });

        let narrow = NarrowModulation::new(
            passage.clone(),
            id,
            direction.x.signum(),
            Some(AgentRng::new(SEED, id)),
        );
        let follow = registry.create(FollowLeaderModulation::NAME)?;
        let modulations: Vec<Box<dyn Modulation>> = vec![Box::new(narrow), follow];

        agents.push(Agent {
            id,
            behavior,
            modulations,
            velocity: Vec2::ZERO,
            laps: 0,
        });
    }
    Ok(agents)
}

// ── Perception refresh ────────────────────────────────────────────────────────

/// Rebuild agent `i`'s neighbor snapshot from world truth, including the
/// periodic images one corridor-length away (an agent's own image included —
/// that is how it sees itself coming the other way around the lattice).
fn perceived_neighbors(agents: &[Agent], i: usize, world: &CorridorWorld) -> Vec<Neighbor> {
    let center = agents[i].behavior.position;
    let mut out = Vec::new();
    for (j, other) in agents.iter().enumerate() {
        for shift in [-world.length, 0.0, world.length] {
            if j == i && shift == 0.0 {
                continue;
            }
            let position = other.behavior.position + Vec2::new(shift, 0.0);
            if (position.x - center.x).abs() <= SENSING_RANGE {
                out.push(Neighbor::new(other.id, position, other.velocity, other.behavior.radius));
            }
        }
    }
    out
}

// ── Steering stand-in ─────────────────────────────────────────────────────────

/// Minimal direction-following steering: head along the target direction
/// (with a pull toward the centerline), braking against the nearest blocker
/// ahead.  The production steering computation this models is out of scope;
/// it only needs to *react* to what the modulations inject.
fn steer(behavior: &Behavior) -> Twist {
    let Some(direction) = behavior.target.direction else {
        return Twist::default();
    };
    let heading = (direction + Vec2::new(0.0, -behavior.position.y) * CENTERING_GAIN)
        .normalized(EPSILON)
        .unwrap_or(direction);

    let Some(state) = behavior.environment.as_geometric() else {
        return Twist::new(heading * behavior.optimal_speed, 0.0);
    };

    let body = behavior.radius + behavior.safety_margin;
    let mut clearance = f32::INFINITY;
    for n in &state.neighbors {
        let offset = n.position - behavior.position;
        let gap = heading.dot(offset);
        if gap <= 0.0 {
            continue;
        }
        let lateral = (offset - heading * gap).norm();
        if lateral < n.radius + body {
            clearance = clearance.min(gap - n.radius - body);
        }
    }
    for wall in &state.line_obstacles {
        for orientation in [1.0, -1.0] {
            if let Some(t) = wall.time_to_crossing(behavior.position, heading, orientation) {
                clearance = clearance.min(t - body);
            }
        }
    }

    let speed = if clearance <= 0.0 {
        0.0
    } else {
        behavior.optimal_speed.min(clearance / BRAKE_TIME)
    };
    Twist::new(heading * speed, 0.0)
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Progress callbacks for the tick loop.
trait CorridorObserver {
    fn on_tick_end(&mut self, _tick: u64, _agents: &[Agent]) {}
    fn on_run_end(&mut self, _final_tick: u64, _agents: &[Agent]) {}
}

struct ProgressPrinter {
    interval: u64,
}

impl CorridorObserver for ProgressPrinter {
    fn on_tick_end(&mut self, tick: u64, agents: &[Agent]) {
        if tick % self.interval != 0 {
            return;
        }
        let mean_speed: f32 =
            agents.iter().map(|a| a.velocity.norm()).sum::<f32>() / agents.len() as f32;
        let laps: u32 = agents.iter().map(|a| a.laps).sum();
        println!("tick {tick:>5}  mean speed {mean_speed:.2} m/s  laps {laps}");
    }

    fn on_run_end(&mut self, final_tick: u64, agents: &[Agent]) {
        println!("\n{final_tick} ticks ({:.0} s simulated):", final_tick as f32 * DT);
        for agent in agents {
            println!(
                "  {}  laps {:>2}  at {}",
                agent.id, agent.laps, agent.behavior.position
            );
        }
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

fn run<O: CorridorObserver>(
    agents: &mut [Agent],
    world: &CorridorWorld,
    observer: &mut O,
) {
    for tick in 0..TICKS {
        for i in 0..agents.len() {
            // 1. Refresh perception from world truth.
            let neighbors = perceived_neighbors(agents, i, world);
            let agent = &mut agents[i];
            if let Some(state) = agent.behavior.environment.as_geometric_mut() {
                state.neighbors = neighbors;
            }

            // 2-4. pre hooks → steering → post hooks.
            for modulation in &mut agent.modulations {
                modulation.pre(&mut agent.behavior, DT);
            }
            let mut cmd = steer(&agent.behavior);
            for modulation in &mut agent.modulations {
                cmd = modulation.post(&mut agent.behavior, DT, cmd);
            }

            // 5. Apply: integrate, wrap the lattice, count laps.
            let mut position = agent.behavior.position + cmd.velocity * DT;
            let wrapped = world.wrap_x(position.x);
            if (wrapped - position.x).abs() > world.length * 0.5 {
                agent.laps += 1;
            }
            position.x = wrapped;
            agent.behavior.position = position;
            agent.velocity = cmd.velocity;
            if cmd.velocity.norm() > EPSILON {
                agent.behavior.orientation = cmd.velocity.y.atan2(cmd.velocity.x);
            }
        }
        observer.on_tick_end(tick, agents);
    }
    observer.on_run_end(TICKS, agents);
}

fn main() -> Result<()> {
    let world = CorridorWorld::new(CORRIDOR_LENGTH, CORRIDOR_WIDTH, NARROW_LENGTH, NARROW_WIDTH)?;
    let passage = Arc::new(world.passage.clone());
    let mut rng = SimRng::new(SEED);
    let mut agents = spawn_agents(&world, &passage, &mut rng)?;

    println!(
        "corridor {CORRIDOR_LENGTH}x{CORRIDOR_WIDTH} m, narrowing {NARROW_LENGTH}x{NARROW_WIDTH} m, \
         {AGENT_COUNT} agents, seed {SEED}\n"
    );
    let mut observer = ProgressPrinter { interval: PROGRESS_EVERY };
    run(&mut agents, &world, &mut observer);
    Ok(())
}
