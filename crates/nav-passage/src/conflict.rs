//! Per-step right-of-way decision: which neighbor, if any, should make the
//! querying agent yield before entering the passage.
//!
//! `find_conflict` is deterministic and stateless — it reads one perception
//! snapshot and returns a borrow into it.  Nothing is remembered between
//! steps; hysteresis lives in the calling modulation, not here.

use nav_core::{EPSILON, Neighbor, Vec2};

use crate::Passage;

/// Transient per-step state of the querying agent.
///
/// Assembled fresh each step from the host behavior; never persisted.
#[derive(Copy, Clone, Debug)]
pub struct Kinematics {
    pub position:      Vec2,
    pub velocity:      Vec2,
    pub radius:        f32,
    pub safety_margin: f32,
    /// How far ahead (in travelled distance) the agent is willing to react.
    pub horizon:       f32,
}

/// A detected right-of-way conflict: the neighbor to yield to and the gate
/// the querying agent was heading for.
#[derive(Copy, Clone, Debug)]
pub struct Conflict<'a> {
    pub neighbor: &'a Neighbor,
    pub gate:     usize,
}

/// Decide whether the querying agent must yield before entering `passage`.
///
/// The caller supplies the neighbor snapshot with the querying agent already
/// filtered out.  Two rules, checked in order once the agent is established
/// to be approaching a gate within its horizon:
///
/// 1. **Inside rule** — neighbors inside the passage that are not on their
///    way out through the opposite gate are advancing toward the querying
///    agent; the largest-radius one wins.
/// 2. **Outside race** — neighbors outside that would reach the passage
///    midpoint (through the opposite gate, accounting for their radius and
///    the querying agent's safety margin) before the querying agent does;
///    again the largest-radius one wins.
///
/// Ties on radius go to the earliest neighbor in snapshot order.  `None`
/// whenever the agent is already inside, not approaching, approaching
/// beyond `horizon`, or no neighbor satisfies either rule.
pub fn find_conflict<'a>(
    passage: &Passage,
    agent: &Kinematics,
    neighbors: &'a [Neighbor],
) -> Option<Conflict<'a>> {
    if passage.contains(agent.position) {
        return None;
    }

    let (t_enter, gate) = passage.time_to_enter(agent.position, agent.velocity, None)?;
    let speed = agent.velocity.norm();
    if speed < EPSILON {
        return None;
    }
    if t_enter * speed > agent.horizon {
        return None;
    }
    let opposite = Passage::opposite(gate);

    // Inside rule.
    let advancing_inside = neighbors.iter().filter(|n| {
        passage.contains(n.position)
            && passage.time_to_exit(n.position, n.velocity, Some(opposite)).is_none()
    });
    if let Some(winner) = largest_radius(advancing_inside) {
        return Some(Conflict { neighbor: winner, gate });
    }

    // Outside race: compare midpoint arrival times.
    let t_mid = t_enter + (0.5 * passage.length() - agent.radius) / speed;
    let racing_outside = neighbors.iter().filter(|n| {
        let Some((t_n, _)) = passage.time_to_enter(n.position, n.velocity, Some(opposite)) else {
            return false;
        };
        if t_n > t_mid {
            return false;
        }
        let speed_n = n.velocity.norm();
        if speed_n < EPSILON {
            return false;
        }
        t_n + (0.5 * passage.length() - n.radius - agent.safety_margin) / speed_n < t_mid
    });
    largest_radius(racing_outside).map(|winner| Conflict { neighbor: winner, gate })
}

/// Largest-radius neighbor; ties keep the earliest in iteration order.
fn largest_radius<'a>(iter: impl Iterator<Item = &'a Neighbor>) -> Option<&'a Neighbor> {
    iter.fold(None, |best: Option<&'a Neighbor>, n| match best {
        Some(b) if b.radius >= n.radius => Some(b),
        _ => Some(n),
    })
}
