use crate::room::{GridRoom, RoomId};

use fnv::FnvHashSet;
use rand::Rng;

/// Placed rooms that may still be built off of.
///
/// Kept as a vector so that random draws depend only on the RNG state and on the order rooms
/// were inserted.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    rooms: Vec<RoomId>,
}

impl Frontier {
    pub fn seeded(room: RoomId) -> Self {
        Frontier { rooms: vec![room] }
    }

    pub fn contains(&self, room: RoomId) -> bool {
        self.rooms.contains(&room)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().cloned()
    }

    pub fn insert(&mut self, room: RoomId) {
        if !self.contains(room) {
            self.rooms.push(room);
        }
    }

    pub fn remove(&mut self, room: RoomId) {
        self.rooms.retain(|r| *r != room);
    }

    /// Forget everything and keep only `room`.
    pub fn reset_to(&mut self, room: RoomId) {
        self.rooms.clear();
        self.rooms.push(room);
    }

    pub fn choose(&self, rng: &mut impl Rng) -> Option<RoomId> {
        crate::sampling::choose(&self.rooms[..], rng).cloned()
    }

    /// Ordinary (unlocked) update after a cluster was attached to `base`: new rooms with a free
    /// slot join, and `base` leaves once it is full.
    pub fn absorb(&mut self, rooms: &[GridRoom], base: RoomId, new_rooms: &[RoomId]) {
        for r in new_rooms.iter() {
            if rooms[r.index()].has_free_connection() {
                self.insert(*r);
            }
        }
        if !rooms[base.index()].has_free_connection() {
            self.remove(base);
        }
    }

    pub fn to_set(&self) -> FnvHashSet<RoomId> {
        self.rooms.iter().cloned().collect()
    }
}

/// Every room that has at least one unused slot.
pub fn structural_frontier(rooms: &[GridRoom]) -> FnvHashSet<RoomId> {
    rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.has_free_connection())
        .map(|(i, _)| RoomId(i))
        .collect()
}
