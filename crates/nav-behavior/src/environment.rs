//! Perceived-environment snapshots.

use nav_core::{LineSegment, Neighbor};

/// The geometric view of an agent's surroundings for one tick.
///
/// Both collections are whole-value snapshots: a modulation that wants to
/// add or remove entries clones the collection, edits the clone, and
/// publishes it back in a single assignment.  Elements of a published
/// snapshot are never mutated in place, so stacked modulations and the
/// steering computation always observe a consistent view.
#[derive(Clone, Debug, Default)]
pub struct GeometricState {
    pub neighbors:      Vec<Neighbor>,
    pub line_obstacles: Vec<LineSegment>,
}

/// What kind of environment the agent's steering computation consumes.
///
/// The tag replaces a runtime capability check on a concrete type: code that
/// needs geometry branches on the variant and degrades to a no-op on
/// [`Other`][EnvironmentState::Other], never assuming a representation.
#[derive(Clone, Debug, Default)]
pub enum EnvironmentState {
    /// Neighbors and line obstacles are available.
    Geometric(GeometricState),
    /// Some other sensing model this workspace cannot interpret.
    #[default]
    Other,
}

impl EnvironmentState {
    #[inline]
    pub fn as_geometric(&self) -> Option<&GeometricState> {
        match self {
            EnvironmentState::Geometric(state) => Some(state),
            EnvironmentState::Other => None,
        }
    }

    #[inline]
    pub fn as_geometric_mut(&mut self) -> Option<&mut GeometricState> {
        match self {
            EnvironmentState::Geometric(state) => Some(state),
            EnvironmentState::Other => None,
        }
    }
}
