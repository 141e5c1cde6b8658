//! Corridor geometry and spawn placement.
//!
//! The corridor runs along +x with a narrowing in the middle:
//!
//! ```text
//!  y=+W/2 ────────────╲____________╱──────────────
//!                     xa xb      xc xd
//!  y=-W/2 ────────────╱‾‾‾‾‾‾‾‾‾‾‾‾╲──────────────
//! ```
//!
//! The passage gates sit at `xa` and `xd` — where the funnel begins, not
//! where it is narrowest — so agents negotiate before committing to the
//! taper.

use nav_core::{LineSegment, SimRng, Vec2};
use nav_passage::{Passage, PassageError};

pub struct CorridorWorld {
    pub length:  f32,
    pub width:   f32,
    pub walls:   Vec<LineSegment>,
    pub passage: Passage,
}

impl CorridorWorld {
    /// Lay out walls and the passage for a corridor of `length` × `width`
    /// with a central narrowing of `narrow_length` × `narrow_width`.
    pub fn new(
        length: f32,
        width: f32,
        narrow_length: f32,
        narrow_width: f32,
    ) -> Result<Self, PassageError> {
        let dw = (width - narrow_width) * 0.5;
        let xb = length * 0.5 - narrow_length * 0.5;
        let xa = xb - dw;
        let xc = length * 0.5 + narrow_length * 0.5;
        let xd = xc + dw;
        // Extend one period past each end so wrapped agents still see walls.
        let x0 = xc - length;
        let x1 = length + xb;

        let profile = [
            Vec2::new(x0, width * 0.5),
            Vec2::new(xa, width * 0.5),
            Vec2::new(xb, narrow_width * 0.5),
            Vec2::new(xc, narrow_width * 0.5),
            Vec2::new(xd, width * 0.5),
            Vec2::new(x1, width * 0.5),
        ];

        let mut walls = Vec::new();
        for side in [-1.0f32, 1.0] {
            for pair in profile.windows(2) {
                walls.push(LineSegment::new(
                    Vec2::new(pair[0].x, pair[0].y * side),
                    Vec2::new(pair[1].x, pair[1].y * side),
                ));
            }
        }

        let passage = Passage::new(
            (Vec2::new(xa, width * 0.5), Vec2::new(xa, -width * 0.5)),
            (Vec2::new(xd, width * 0.5), Vec2::new(xd, -width * 0.5)),
        )?;

        Ok(Self { length, width, walls, passage })
    }

    /// X where the funnel begins — spawns stay short of it.
    fn spawn_limit(&self) -> f32 {
        self.passage.enter_position(0).x
    }

    /// Random spawn in the wide part of the corridor, on either end.
    pub fn random_spawn(&self, rng: &mut SimRng) -> Vec2 {
        let mut x = rng.gen_range(0.0..self.spawn_limit());
        let y = rng.gen_range(-self.width * 0.5..self.width * 0.5);
        if rng.gen_bool(0.5) {
            x = self.length - x;
        }
        Vec2::new(x, y)
    }

    /// Wrap an x coordinate into the periodic corridor `[0, length)`.
    pub fn wrap_x(&self, x: f32) -> f32 {
        x.rem_euclid(self.length)
    }
}
