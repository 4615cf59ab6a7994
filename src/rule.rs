use crate::{
    error::LayoutError,
    lattice::{Direction, Point},
    room::{check_layout, Connection, GridRoom, RoomContent, RoomId},
    transform::Rotation,
};

use serde::{Deserialize, Serialize};

/// A cluster of rooms that realizes one mission symbol. The first room is the attachment point
/// and sits at the local origin; the others are positioned relative to it. Connections between
/// the cluster's own rooms are pre-wired and use indices local to the cluster.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RuleTemplate {
    rooms: Vec<GridRoom>,
}

impl RuleTemplate {
    pub fn new() -> Self {
        RuleTemplate::default()
    }

    /// A rule made of one room at the origin with all slots free.
    pub fn single(contents: Vec<RoomContent>) -> Self {
        let mut rule = RuleTemplate::new();
        rule.add_room(GridRoom::new(contents));
        rule
    }

    /// Appends a room without touching its position or connections.
    pub fn add_room(&mut self, room: GridRoom) -> RoomId {
        self.rooms.push(room);
        RoomId(self.rooms.len() - 1)
    }

    /// Wires `a`'s `side` to `b` and `b`'s opposite side back to `a`.
    pub fn connect(&mut self, a: RoomId, side: Direction, b: RoomId) -> Result<(), LayoutError> {
        let len = self.rooms.len();
        for r in [a, b].iter() {
            if r.index() >= len {
                return Err(LayoutError::DoorOutOfRange {
                    index: r.index(),
                    len,
                });
            }
        }
        self.rooms[a.index()].set_connection(side, Connection::Open(b));
        self.rooms[b.index()].set_connection(side.opposite(), Connection::Open(a));

        Ok(())
    }

    pub fn rooms(&self) -> &[GridRoom] {
        &self.rooms
    }

    pub fn first(&self) -> Option<&GridRoom> {
        self.rooms.first()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn into_rooms(self) -> Vec<GridRoom> {
        self.rooms
    }

    /// True when the attachment room carries a lock tag.
    pub fn is_lock_rule(&self) -> bool {
        self.first().map_or(false, GridRoom::is_lock)
    }

    /// Checks an authored rule: the first room at the origin, a consistent layout, and every door
    /// leading to the neighboring cell on its side.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let first = self.first().ok_or(LayoutError::EmptyCluster)?;
        if first.position() != Point::ORIGIN {
            return Err(LayoutError::FirstRoomNotAtOrigin {
                position: first.position(),
            });
        }

        check_layout(&self.rooms)?;

        for (i, room) in self.rooms.iter().enumerate() {
            for (direction, c) in room.connections() {
                if let Some(n) = c.neighbor() {
                    if room.position() + direction.offset() != self.rooms[n.index()].position() {
                        return Err(LayoutError::DoorNotAdjacent {
                            room: RoomId(i),
                            direction,
                            neighbor: n,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// A rotated copy of this rule. Positions always rotate; slot directions rotate only when
    /// `rotate_connections` is set, otherwise each room keeps its doors on the authored sides.
    pub fn rotated(&self, rotation: Rotation, rotate_connections: bool) -> RuleTemplate {
        let rooms = self
            .rooms
            .iter()
            .map(|room| {
                let mut turned = room.clone();
                turned.set_position(rotation.apply(room.position()));
                if rotate_connections {
                    for (d, c) in room.connections() {
                        turned.set_connection(rotation.apply_direction(d), c);
                    }
                }
                turned
            })
            .collect();

        RuleTemplate { rooms }
    }
}

/// Authoring format for one room of a rule.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RoomSpec {
    pub position: (i32, i32),
    #[serde(default)]
    pub contents: Vec<RoomContent>,
}

/// Authoring format for a rule: rooms by position, plus doors as `(from, side, to)` index
/// triples. The first room must be at `(0, 0)`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RuleSpec {
    pub rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub doors: Vec<(usize, Direction, usize)>,
}

impl RuleSpec {
    pub fn make(&self) -> Result<RuleTemplate, LayoutError> {
        let mut rule = RuleTemplate::new();
        for r in self.rooms.iter() {
            rule.add_room(GridRoom::new(r.contents.clone()).with_position(r.position.into()));
        }
        for (a, side, b) in self.doors.iter() {
            rule.connect(RoomId(*a), *side, RoomId(*b))?;
        }
        rule.validate()?;

        Ok(rule)
    }
}
