use crate::{
    error::LayoutError,
    frontier::Frontier,
    lattice::{Direction, Point},
    room::{check_layout, Connection, GridRoom, RoomContent, RoomId},
};

use fnv::FnvHashMap;
use std::fmt;

/// The dungeon under construction: every placed room, an index of occupied cells and the
/// frontier of rooms that can still be built off of. A restart builds a new one of these.
#[derive(Clone, Debug)]
pub struct SpaceGraph {
    rooms: Vec<GridRoom>,
    occupied: FnvHashMap<Point, RoomId>,
    frontier: Frontier,
}

pub const ENTRANCE_ROOM: RoomId = RoomId(0);

impl SpaceGraph {
    /// A dungeon holding only the entrance room at the origin.
    pub fn with_entrance() -> Self {
        let entrance = GridRoom::new(vec![RoomContent::Entrance]).with_position(Point::ORIGIN);
        let mut occupied = FnvHashMap::default();
        occupied.insert(Point::ORIGIN, ENTRANCE_ROOM);

        SpaceGraph {
            rooms: vec![entrance],
            occupied,
            frontier: Frontier::seeded(ENTRANCE_ROOM),
        }
    }

    pub fn rooms(&self) -> &[GridRoom] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> &GridRoom {
        &self.rooms[id.index()]
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> &mut GridRoom {
        &mut self.rooms[id.index()]
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn room_at(&self, position: Point) -> Option<RoomId> {
        self.occupied.get(&position).cloned()
    }

    pub fn is_occupied(&self, position: Point) -> bool {
        self.occupied.contains_key(&position)
    }

    /// Appends already-positioned rooms whose connections are local to `rooms`. Returns the ids
    /// they received. The caller guarantees the positions are free.
    pub(crate) fn merge(&mut self, rooms: Vec<GridRoom>) -> Vec<RoomId> {
        let base = self.rooms.len();
        let mut ids = Vec::with_capacity(rooms.len());
        for room in rooms.into_iter() {
            let id = RoomId(self.rooms.len());
            debug_assert!(!self.occupied.contains_key(&room.position()));
            self.occupied.insert(room.position(), id);
            self.rooms.push(room.reindexed(base));
            ids.push(id);
        }

        ids
    }

    /// Opens a door from `a` through `side` into `b`, mirrored on `b`'s opposite side.
    pub(crate) fn connect(&mut self, a: RoomId, side: Direction, b: RoomId) {
        self.room_mut(a).set_connection(side, Connection::Open(b));
        self.room_mut(b)
            .set_connection(side.opposite(), Connection::Open(a));
    }

    pub(crate) fn absorb_into_frontier(&mut self, base: RoomId, new_rooms: &[RoomId]) {
        self.frontier.absorb(&self.rooms, base, new_rooms);
    }

    pub(crate) fn reset_frontier(&mut self, room: RoomId) {
        self.frontier.reset_to(room);
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        check_layout(&self.rooms)
    }
}

impl fmt::Display for SpaceGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, room) in self.rooms.iter().enumerate() {
            writeln!(f, "{}: {}", RoomId(i), room)?;
        }
        Ok(())
    }
}
