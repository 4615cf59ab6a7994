use crate::{
    error::{GenerateError, LayoutError},
    lattice::Direction,
    mission::MissionSymbol,
    room::RoomId,
    rule::RuleTemplate,
    space_graph::SpaceGraph,
};

/// Locked rules stand for a single gated room; anything bigger is an authoring error.
pub fn check_rule<S: MissionSymbol>(symbol: S, rule: &RuleTemplate) -> Result<(), GenerateError> {
    if rule.is_lock_rule() && rule.len() != 1 {
        return Err(GenerateError::MultiRoomLock {
            symbol: format!("{:?}", symbol),
            rooms: rule.len(),
        });
    }

    Ok(())
}

/// Locks the door leaving `room` through `side` on both of its ends.
pub fn lock_connection(
    space: &mut SpaceGraph,
    room: RoomId,
    side: Direction,
) -> Result<(), LayoutError> {
    let neighbor = space
        .room(room)
        .connection(side)
        .neighbor()
        .ok_or(LayoutError::UnconnectedLock { direction: side })?;
    space.room_mut(room).lock_door(side)?;
    space.room_mut(neighbor).lock_door(side.opposite())?;

    Ok(())
}

/// Updates doors and the frontier after `new_rooms` were attached to `base` through `side`.
///
/// When the first new room is a lock, the door into it is locked and the frontier collapses to
/// that room: everything placed afterwards has to grow out of it. Otherwise new rooms with free
/// slots join the frontier and `base` leaves it once full.
pub fn settle(
    space: &mut SpaceGraph,
    base: RoomId,
    side: Direction,
    new_rooms: &[RoomId],
) -> Result<(), GenerateError> {
    let first = *new_rooms.first().ok_or(LayoutError::EmptyCluster)?;

    if space.room(first).is_lock() {
        lock_connection(space, base, side)?;
        space.reset_frontier(first);
        log::debug!("Locked {} behind {}; frontier reset", first, base);
        return Ok(());
    }

    space.absorb_into_frontier(base, new_rooms);

    Ok(())
}
