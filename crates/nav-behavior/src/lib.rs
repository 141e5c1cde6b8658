//! `nav-behavior` — the surface this workspace shares with its host: the
//! per-agent `Behavior` facade, the perceived environment snapshots, and the
//! pre/post modulation protocol that brackets the external steering
//! computation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`behavior`]    | `Behavior` facade, `Target`                               |
//! | [`environment`] | `GeometricState`, tagged `EnvironmentState`               |
//! | [`command`]     | `Twist` — the steering command the hooks bracket          |
//! | [`modulation`]  | `Modulation` trait (pre/post hook pair)                   |
//! | [`registry`]    | `ModulationRegistry` — string-keyed factory map           |
//! | [`error`]       | `BehaviorError`                                           |
//!
//! # The per-tick protocol
//!
//! The host drives each agent strictly sequentially, every tick:
//!
//! 1. refresh the agent's `EnvironmentState` from world truth,
//! 2. call `pre` on every modulation in registration order,
//! 3. run the steering computation (external to this workspace),
//! 4. call `post` on every modulation with the produced command.
//!
//! Modulations adjust what the steering computation *perceives* (snapshot
//! replacement in `pre`) or what it *produced* (`post`); they never touch
//! world truth.  Snapshots are replaced whole — a modulation builds a new
//! collection and publishes it in one assignment, so step 3 can never
//! observe a half-edited view.

pub mod behavior;
pub mod command;
pub mod environment;
pub mod error;
pub mod modulation;
pub mod registry;


pub use behavior::{Behavior, Target};
pub use command::Twist;
pub use environment::{EnvironmentState, GeometricState};
pub use error::{BehaviorError, BehaviorResult};
pub use modulation::Modulation;
pub use registry::ModulationRegistry;
