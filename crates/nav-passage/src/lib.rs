//! `nav-passage` — geometric model of a single-lane bottleneck and the
//! per-step conflict detection that decides who yields before entering it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`passage`]  | `Passage` — two gates + interior polygon, crossing-time queries |
//! | [`conflict`] | `find_conflict` — pure per-step right-of-way decision          |
//! | [`error`]    | `PassageError`                                                 |
//!
//! # Design notes
//!
//! A `Passage` is immutable after construction and is shared by reference
//! (typically `Arc`) across every agent's modulation — all queries take
//! `&self` and no query allocates.
//!
//! `find_conflict` is a pure function of the current perception snapshot:
//! it holds no state, caches nothing, and two calls with the same inputs
//! always return the same neighbor.

pub mod conflict;
pub mod error;
pub mod passage;


pub use conflict::{Conflict, Kinematics, find_conflict};
pub use error::PassageError;
pub use passage::Passage;
