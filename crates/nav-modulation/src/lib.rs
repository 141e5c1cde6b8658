//! `nav-modulation` — the two concrete steering modulations.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`narrow`]        | `NarrowModulation` — yield before a contested bottleneck  |
//! | [`follow_leader`] | `FollowLeaderModulation` — cap speed behind a leader      |
//!
//! Both implement the [`Modulation`][nav_behavior::Modulation] hook pair and
//! are independent of each other; an agent typically stacks both.
//!
//! `NarrowModulation` turns a detected right-of-way conflict into perceived
//! geometry: the contested gate becomes a temporary line obstacle and a
//! virtual copy of the conflicting neighbor is placed in the gate opening,
//! so the external steering computation brakes and gives way on its own.
//! `FollowLeaderModulation` caps the agent's nominal speed behind its leader
//! when oncoming traffic means the leader is about to make room.

pub mod follow_leader;
pub mod narrow;

#[cfg(test)]
mod tests;

pub use follow_leader::FollowLeaderModulation;
pub use narrow::NarrowModulation;

use nav_behavior::{BehaviorResult, ModulationRegistry};

/// Register both modulation types under their canonical names.
///
/// Call once at startup on the host's registry; hosts that wire modulations
/// programmatically can skip this entirely.
pub fn register_defaults(registry: &mut ModulationRegistry) -> BehaviorResult<()> {
    registry.register(NarrowModulation::NAME, || {
        Box::new(NarrowModulation::unconfigured())
    })?;
    registry.register(FollowLeaderModulation::NAME, || {
        Box::new(FollowLeaderModulation::new())
    })?;
    Ok(())
}
