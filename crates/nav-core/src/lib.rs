//! `nav-core` — foundational types for the `rust_nav` steering-modulation
//! workspace.
//!
//! This crate is a dependency of every other `nav-*` crate.  It intentionally
//! has no `nav-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).  Nothing here is fallible — construction-time errors
//! live with the types that can reject their inputs (`nav-passage`,
//! `nav-behavior`).
//!
//! # What lives here
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`ids`]      | `AgentId`                                         |
//! | [`geo`]      | `Vec2`, planar vector arithmetic                  |
//! | [`segment`]  | `LineSegment`, directed ray-crossing queries      |
//! | [`neighbor`] | `Neighbor` — an observed (or synthesized) agent   |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;
pub mod neighbor;
pub mod rng;
pub mod segment;


/// Threshold below which a speed or a normal-velocity component is treated
/// as zero.  Guards every division by a projected speed in this workspace.
pub const EPSILON: f32 = 1e-6;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Vec2;
pub use ids::AgentId;
pub use neighbor::Neighbor;
pub use rng::{AgentRng, SimRng};
pub use segment::LineSegment;
