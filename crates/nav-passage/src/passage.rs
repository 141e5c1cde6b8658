//! The bottleneck passage: two gates and the interior area between them.

use nav_core::{EPSILON, LineSegment, Vec2};

use crate::PassageError;

/// A single-lane bottleneck bounded by two gates.
///
/// Constructed once at scenario setup and shared read-only by every agent's
/// modulation.  The centerline runs from gate 0's midpoint to gate 1's
/// midpoint; the interior is the quadrilateral spanned by the two gates.
///
/// # Endpoint normalization
///
/// Gate endpoint order as supplied by the caller is arbitrary.  Construction
/// reorders each gate so its edge vector projects with a fixed sign onto the
/// centerline's lateral normal (one sign for gate 0, the opposite for
/// gate 1).  Two invariants follow:
///
/// - the quadrilateral `[a1, a2, b1, b2]` is simple and consistently wound,
///   so the interior test is a plain winding check;
/// - each gate's own normal points into the interior, so inward crossings
///   are `orientation = +1` and outward ones `-1` at both gates, keeping
///   enter/exit time signs consistent no matter how the gates were given.
#[derive(Clone, Debug)]
pub struct Passage {
    gates: [LineSegment; 2],
    /// Interior quadrilateral: gate 0's endpoints then gate 1's.
    area: [Vec2; 4],
    /// Unit centerline direction, gate 0 → gate 1.
    direction: Vec2,
    /// Distance between the gate midpoints.
    length: f32,
}

impl Passage {
    /// Build a passage from its two boundary gates (endpoint pairs, in any
    /// order).  Fails when the gate midpoints coincide or a gate has no
    /// extent — there is no passage to model then.
    pub fn new(gate_a: (Vec2, Vec2), gate_b: (Vec2, Vec2)) -> Result<Passage, PassageError> {
        let delta = gate_b.0.midpoint(gate_b.1) - gate_a.0.midpoint(gate_a.1);
        let length = delta.norm();
        let direction = delta
            .normalized(EPSILON)
            .ok_or(PassageError::DegenerateGates("gate midpoints coincide"))?;
        if (gate_a.1 - gate_a.0).norm() < EPSILON || (gate_b.1 - gate_b.0).norm() < EPSILON {
            return Err(PassageError::DegenerateGates("gate has zero extent"));
        }

        // Lateral normal of the centerline (direction rotated -90°).
        let n = Vec2::new(direction.y, -direction.x);
        let (a1, a2) = if (gate_a.1 - gate_a.0).dot(n) < 0.0 {
            (gate_a.1, gate_a.0)
        } else {
            gate_a
        };
        let (b1, b2) = if (gate_b.1 - gate_b.0).dot(n) > 0.0 {
            (gate_b.1, gate_b.0)
        } else {
            gate_b
        };

        Ok(Passage {
            gates: [LineSegment::new(a1, a2), LineSegment::new(b1, b2)],
            area: [a1, a2, b1, b2],
            direction,
            length,
        })
    }

    /// The gate with the given index (0 or 1).
    #[inline]
    pub fn gate(&self, index: usize) -> &LineSegment {
        &self.gates[index]
    }

    /// The index of the other gate.
    #[inline]
    pub const fn opposite(index: usize) -> usize {
        1 - index
    }

    /// Unit centerline direction, gate 0 → gate 1.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Distance between the two gate midpoints.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Strict interior test against the passage quadrilateral.
    ///
    /// Points on the boundary (gates included) are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        let mut winding = 0.0f32;
        for i in 0..4 {
            let a = self.area[i];
            let b = self.area[(i + 1) % 4];
            let side = (b - a).cross(point - a);
            if side == 0.0 {
                return false;
            }
            if winding == 0.0 {
                winding = side.signum();
            } else if side.signum() != winding {
                return false;
            }
        }
        true
    }

    /// Time at which the ray `position + t * velocity` crosses into the
    /// passage, together with the gate it crosses.
    ///
    /// Gates are tried in index order (or only `gate` when given); the first
    /// one with a valid non-negative inward crossing wins.  `None` when the
    /// ray reaches neither gate or the approach speed vanishes.
    pub fn time_to_enter(
        &self,
        position: Vec2,
        velocity: Vec2,
        gate: Option<usize>,
    ) -> Option<(f32, usize)> {
        self.crossing(position, velocity, gate, 1.0)
    }

    /// Time at which the ray crosses out of the passage.
    ///
    /// Only meaningful for positions inside the passage; `None` otherwise.
    pub fn time_to_exit(
        &self,
        position: Vec2,
        velocity: Vec2,
        gate: Option<usize>,
    ) -> Option<(f32, usize)> {
        if !self.contains(position) {
            return None;
        }
        self.crossing(position, velocity, gate, -1.0)
    }

    /// `true` iff an agent inside the passage is on its way out through
    /// `gate`.  A zero velocity is replaced by the unit heading derived from
    /// `orientation`, so a stopped agent still reports the way it faces.
    pub fn is_exiting(&self, position: Vec2, orientation: f32, velocity: Vec2, gate: usize) -> bool {
        if !self.contains(position) {
            return false;
        }
        let v = if velocity.norm() < EPSILON {
            Vec2::from_angle(orientation)
        } else {
            velocity
        };
        matches!(
            self.gates[gate].time_to_crossing(position, v, -1.0),
            Some(t) if t > 0.0
        )
    }

    /// Midpoint of the given gate — where a virtual yield-neighbor is placed.
    #[inline]
    pub fn enter_position(&self, gate: usize) -> Vec2 {
        self.gates[gate].midpoint()
    }

    fn crossing(
        &self,
        position: Vec2,
        velocity: Vec2,
        gate: Option<usize>,
        orientation: f32,
    ) -> Option<(f32, usize)> {
        for (i, g) in self.gates.iter().enumerate() {
            if gate.is_some_and(|k| k != i) {
                continue;
            }
            if let Some(t) = g.time_to_crossing(position, velocity, orientation) {
                return Some((t, i));
            }
        }
        None
    }
}
