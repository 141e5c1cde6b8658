//! The `Modulation` trait — the pre/post hook pair around one steering step.

use crate::{Behavior, Twist};

/// A pluggable adjustment bracketing the external steering computation.
///
/// The host calls [`pre`][Self::pre] on every modulation before running the
/// steering computation and [`post`][Self::post] on each afterwards, every
/// tick, strictly sequentially.  Both hooks have no-op defaults so a
/// modulation only implements the side it uses.
///
/// A `pre` hook adjusts what the computation will perceive — typically by
/// replacing an environment snapshot or capping `optimal_speed`.  A `post`
/// hook adjusts (or merely observes) the produced command, and is the place
/// to undo any transient perception change scoped to this tick.
///
/// Modulation state is exclusively owned by one agent's instance; hooks
/// take `&mut self` and complete synchronously within the tick.
pub trait Modulation {
    /// Called before the steering computation.
    fn pre(&mut self, _behavior: &mut Behavior, _dt: f32) {}

    /// Called after the steering computation with the command it produced.
    ///
    /// Returns the command the host should apply (default: unchanged).
    fn post(&mut self, _behavior: &mut Behavior, _dt: f32, cmd: Twist) -> Twist {
        cmd
    }
}
