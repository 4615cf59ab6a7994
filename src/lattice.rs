use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// An integer coordinate on the dungeon grid.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Point { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four connection slots of a room. The discriminants run clockwise, so the opposite
/// side is always two steps away.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Top,
    Direction::Right,
    Direction::Bottom,
    Direction::Left,
];

impl Direction {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        ALL_DIRECTIONS[(self.index() + 2) % 4]
    }

    /// The grid step taken when leaving a room through this side. TOP is +y.
    pub fn offset(self) -> Point {
        match self {
            Direction::Top => Point::new(0, 1),
            Direction::Right => Point::new(1, 0),
            Direction::Bottom => Point::new(0, -1),
            Direction::Left => Point::new(-1, 0),
        }
    }

    /// Turn counterclockwise by `quarter_turns` multiples of 90°.
    pub fn turned_ccw(self, quarter_turns: u8) -> Direction {
        let turns = usize::from(quarter_turns % 4);
        ALL_DIRECTIONS[(self.index() + 4 - turns) % 4]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::Top => "TOP",
            Direction::Right => "RIGHT",
            Direction::Bottom => "BOTTOM",
            Direction::Left => "LEFT",
        };
        f.write_str(name)
    }
}
