use crate::{
    error::LayoutError,
    lattice::{Direction, Point, ALL_DIRECTIONS},
};

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a room inside the container that owns it (a rule template or a space graph).
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct RoomId(pub usize);

impl RoomId {
    pub fn index(self) -> usize {
        self.0
    }

    /// Used when a cluster is appended to a container that already holds `base` rooms.
    pub fn shifted(self, base: usize) -> RoomId {
        RoomId(self.0 + base)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "room{}", self.0)
    }
}

/// State of one directional slot of a room.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Connection {
    Unused,
    Open(RoomId),
    /// The door exists but is gated.
    Locked(RoomId),
}

impl Default for Connection {
    fn default() -> Self {
        Connection::Unused
    }
}

impl Connection {
    pub fn neighbor(self) -> Option<RoomId> {
        match self {
            Connection::Unused => None,
            Connection::Open(r) | Connection::Locked(r) => Some(r),
        }
    }

    pub fn is_unused(self) -> bool {
        self == Connection::Unused
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Connection::Locked(_))
    }

    /// The same state pointing at a different room.
    pub fn retarget(self, room: RoomId) -> Connection {
        match self {
            Connection::Unused => Connection::Unused,
            Connection::Open(_) => Connection::Open(room),
            Connection::Locked(_) => Connection::Locked(room),
        }
    }
}

/// Tags describing what a room holds. Only the lock tags change how rooms are placed.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum RoomContent {
    Entrance,
    Lock,
    FinalLock,
    Key,
    FinalKey,
    Goal,
    Custom(String),
}

impl fmt::Display for RoomContent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoomContent::Entrance => f.write_str("ENTRANCE"),
            RoomContent::Lock => f.write_str("LOCK"),
            RoomContent::FinalLock => f.write_str("FINAL_LOCK"),
            RoomContent::Key => f.write_str("KEY"),
            RoomContent::FinalKey => f.write_str("FINAL_KEY"),
            RoomContent::Goal => f.write_str("GOAL"),
            RoomContent::Custom(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GridRoom {
    position: Point,
    connections: [Connection; 4],
    contents: Vec<RoomContent>,
}

impl GridRoom {
    pub fn new(contents: Vec<RoomContent>) -> Self {
        GridRoom {
            position: Point::ORIGIN,
            connections: [Connection::Unused; 4],
            contents,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn connection(&self, direction: Direction) -> Connection {
        self.connections[direction.index()]
    }

    pub fn set_connection(&mut self, direction: Direction, connection: Connection) {
        self.connections[direction.index()] = connection;
    }

    /// All `(direction, connection)` pairs, TOP first.
    pub fn connections(&self) -> impl Iterator<Item = (Direction, Connection)> + '_ {
        ALL_DIRECTIONS
            .iter()
            .map(move |d| (*d, self.connections[d.index()]))
    }

    /// Directions whose slot is unused.
    pub fn free_connections(&self) -> Vec<Direction> {
        self.connections()
            .filter(|(_, c)| c.is_unused())
            .map(|(d, _)| d)
            .collect()
    }

    pub fn has_free_connection(&self) -> bool {
        self.connections.iter().any(|c| c.is_unused())
    }

    /// Marks an existing door as locked. Locking requires a neighbor on that side.
    pub fn lock_door(&mut self, direction: Direction) -> Result<(), LayoutError> {
        match self.connection(direction) {
            Connection::Unused => Err(LayoutError::UnconnectedLock { direction }),
            c => {
                if let Some(neighbor) = c.neighbor() {
                    self.set_connection(direction, Connection::Locked(neighbor));
                }
                Ok(())
            }
        }
    }

    pub fn contents(&self) -> &[RoomContent] {
        &self.contents
    }

    pub fn has_content(&self, content: &RoomContent) -> bool {
        self.contents.contains(content)
    }

    /// True for rooms that gate the rest of the dungeon (ordinary or final lock).
    pub fn is_lock(&self) -> bool {
        self.has_content(&RoomContent::Lock) || self.has_content(&RoomContent::FinalLock)
    }

    /// Rewrites every neighbor reference as if the room's container were appended after `base`
    /// other rooms.
    pub(crate) fn reindexed(mut self, base: usize) -> Self {
        for c in self.connections.iter_mut() {
            if let Some(neighbor) = c.neighbor() {
                *c = c.retarget(neighbor.shifted(base));
            }
        }
        self
    }
}

impl fmt::Display for GridRoom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [", self.position)?;
        for (i, c) in self.contents.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str("]")?;
        for (d, c) in self.connections() {
            match c {
                Connection::Unused => {}
                Connection::Open(r) => write!(f, " {}->{}", d, r)?,
                Connection::Locked(r) => write!(f, " {}-x{}", d, r)?,
            }
        }
        Ok(())
    }
}

/// Checks that no two rooms share a position and every connection is mirrored on the neighbor's
/// opposite slot with the same state. A room may not connect to itself.
pub fn check_layout(rooms: &[GridRoom]) -> Result<(), LayoutError> {
    let mut seen = FnvHashMap::default();
    for (i, room) in rooms.iter().enumerate() {
        if let Some(first) = seen.insert(room.position(), RoomId(i)) {
            return Err(LayoutError::DuplicatePosition {
                position: room.position(),
                first,
                second: RoomId(i),
            });
        }
    }

    for (i, room) in rooms.iter().enumerate() {
        let id = RoomId(i);
        for (direction, c) in room.connections() {
            let neighbor = match c.neighbor() {
                Some(n) => n,
                None => continue,
            };
            if neighbor == id {
                return Err(LayoutError::SelfConnection {
                    room: id,
                    direction,
                });
            }
            let other = rooms
                .get(neighbor.index())
                .ok_or(LayoutError::DanglingConnection {
                    room: id,
                    direction,
                    neighbor,
                })?;
            if other.connection(direction.opposite()) != c.retarget(id) {
                return Err(LayoutError::AsymmetricConnection {
                    room: id,
                    direction,
                    neighbor,
                });
            }
        }
    }

    Ok(())
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_has_all_connections_free() {
        let room = GridRoom::new(vec![RoomContent::Entrance]);
        assert_eq!(room.free_connections(), ALL_DIRECTIONS.to_vec());
        assert!(room.has_free_connection());
        assert!(!room.is_lock());
    }

    #[test]
    fn test_free_connections_skip_used_slots() {
        let mut room = GridRoom::default();
        room.set_connection(Direction::Top, Connection::Open(RoomId(3)));
        room.set_connection(Direction::Left, Connection::Locked(RoomId(4)));
        assert_eq!(
            room.free_connections(),
            vec![Direction::Right, Direction::Bottom]
        );
    }

    #[test]
    fn test_lock_door_requires_a_connection() {
        let mut room = GridRoom::default();
        assert_eq!(
            room.lock_door(Direction::Right),
            Err(LayoutError::UnconnectedLock {
                direction: Direction::Right
            })
        );

        room.set_connection(Direction::Right, Connection::Open(RoomId(1)));
        room.lock_door(Direction::Right).unwrap();
        assert_eq!(
            room.connection(Direction::Right),
            Connection::Locked(RoomId(1))
        );
    }

    #[test]
    fn test_lock_tags() {
        assert!(GridRoom::new(vec![RoomContent::Lock]).is_lock());
        assert!(GridRoom::new(vec![RoomContent::Key, RoomContent::FinalLock]).is_lock());
        assert!(!GridRoom::new(vec![RoomContent::Custom("LOCKER".into())]).is_lock());
    }

    #[test]
    fn test_reindexed_shifts_neighbors_only() {
        let mut room = GridRoom::default();
        room.set_connection(Direction::Bottom, Connection::Locked(RoomId(0)));
        room.set_connection(Direction::Top, Connection::Open(RoomId(2)));
        let room = room.reindexed(10);
        assert_eq!(
            room.connection(Direction::Bottom),
            Connection::Locked(RoomId(10))
        );
        assert_eq!(room.connection(Direction::Top), Connection::Open(RoomId(12)));
        assert_eq!(room.connection(Direction::Left), Connection::Unused);
    }

    #[test]
    fn test_check_layout_catches_one_sided_doors() {
        let mut a = GridRoom::default();
        let b = GridRoom::default().with_position(Point::new(1, 0));
        a.set_connection(Direction::Right, Connection::Open(RoomId(1)));
        assert_eq!(
            check_layout(&[a.clone(), b.clone()]),
            Err(LayoutError::AsymmetricConnection {
                room: RoomId(0),
                direction: Direction::Right,
                neighbor: RoomId(1),
            })
        );

        let mut b = b;
        b.set_connection(Direction::Left, Connection::Locked(RoomId(0)));
        assert!(check_layout(&[a.clone(), b.clone()]).is_err());

        b.set_connection(Direction::Left, Connection::Open(RoomId(0)));
        assert_eq!(check_layout(&[a, b]), Ok(()));
    }

    #[test]
    fn test_check_layout_catches_self_connections() {
        let mut room = GridRoom::default();
        room.set_connection(Direction::Right, Connection::Open(RoomId(0)));
        room.set_connection(Direction::Left, Connection::Open(RoomId(0)));
        assert_eq!(
            check_layout(&[room]),
            Err(LayoutError::SelfConnection {
                room: RoomId(0),
                direction: Direction::Right,
            })
        );
    }

    #[test]
    fn test_check_layout_catches_shared_positions() {
        let rooms = vec![GridRoom::default(), GridRoom::default()];
        assert_eq!(
            check_layout(&rooms),
            Err(LayoutError::DuplicatePosition {
                position: Point::ORIGIN,
                first: RoomId(0),
                second: RoomId(1),
            })
        );
    }
}
