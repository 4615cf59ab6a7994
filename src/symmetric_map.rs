use crate::room::RoomId;

use fnv::FnvHashMap;

/// Values keyed by an unordered pair of rooms.
#[derive(Default)]
pub struct SymmetricMap<T> {
    map: FnvHashMap<(RoomId, RoomId), T>,
}

impl<T> SymmetricMap<T> {
    pub fn new() -> Self {
        SymmetricMap {
            map: FnvHashMap::default(),
        }
    }

    fn order_rooms(r1: RoomId, r2: RoomId) -> (RoomId, RoomId) {
        if r1 > r2 {
            (r2, r1)
        } else {
            (r1, r2)
        }
    }

    pub fn get(&self, r1: RoomId, r2: RoomId) -> Option<&T> {
        self.map.get(&Self::order_rooms(r1, r2))
    }

    /// Returns the previous value for the pair, in either order.
    pub fn insert(&mut self, r1: RoomId, r2: RoomId, value: T) -> Option<T> {
        self.map.insert(Self::order_rooms(r1, r2), value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries with the smaller room first, sorted by room pair.
    pub fn sorted(&self) -> Vec<(RoomId, RoomId, &T)> {
        let mut entries: Vec<_> = self.map.iter().map(|((a, b), v)| (*a, *b, v)).collect();
        entries.sort_by_key(|(a, b, _)| (*a, *b));
        entries
    }
}
