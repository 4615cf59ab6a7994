use crate::lattice::{Direction, Point};

use serde::{Deserialize, Serialize};

/// Counterclockwise rotation about the origin by a multiple of 90°.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

pub const ALL_ROTATIONS: [Rotation; 4] =
    [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

impl Default for Rotation {
    fn default() -> Self {
        Rotation::R0
    }
}

impl Rotation {
    pub fn from_quarter_turns(turns: u8) -> Self {
        ALL_ROTATIONS[usize::from(turns % 4)]
    }

    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    pub fn apply(self, p: Point) -> Point {
        match self {
            Rotation::R0 => p,
            Rotation::R90 => Point::new(-p.y, p.x),
            Rotation::R180 => Point::new(-p.x, -p.y),
            Rotation::R270 => Point::new(p.y, -p.x),
        }
    }

    pub fn apply_direction(self, d: Direction) -> Direction {
        d.turned_ccw(self.quarter_turns())
    }
}
