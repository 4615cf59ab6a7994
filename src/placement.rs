use crate::{
    error::{GenerateError, Infeasible, LayoutError},
    lattice::{Direction, Point},
    room::RoomId,
    rule::RuleTemplate,
    sampling::choose,
    space_graph::SpaceGraph,
};

use rand::Rng;

/// Attempts made per rotation before the expansion draws a new rule and rotation.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Where a cluster goes: its first room sits one step from `base` through `side`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub base: RoomId,
    pub side: Direction,
    /// Absolute position of every room of the cluster, in cluster order.
    pub positions: Vec<Point>,
    /// Which attempt succeeded, counting from 1.
    pub attempt: usize,
}

/// Cluster positions when its first room is attached to a room at `base_position` via `side`.
pub fn translate_cluster(cluster: &RuleTemplate, base_position: Point, side: Direction) -> Vec<Point> {
    let origin = base_position + side.offset();

    cluster
        .rooms()
        .iter()
        .map(|r| origin + r.position())
        .collect()
}

pub fn collides(space: &SpaceGraph, positions: &[Point]) -> bool {
    positions.iter().any(|p| space.is_occupied(*p))
}

/// Randomly probes frontier rooms and their free sides for a spot where `cluster` fits.
/// `Ok(None)` means every attempt collided.
pub fn search_placement(
    space: &SpaceGraph,
    cluster: &RuleTemplate,
    attempts: usize,
    rng: &mut impl Rng,
) -> Result<Option<Placement>, GenerateError> {
    let first = cluster.first().ok_or(LayoutError::EmptyCluster)?;
    if space.frontier().is_empty() {
        return Err(Infeasible::EmptyFrontier.into());
    }

    for attempt in 1..=attempts {
        let base = match space.frontier().choose(rng) {
            Some(b) => b,
            None => break,
        };
        let free = space.room(base).free_connections();
        let side = match choose(&free[..], rng) {
            Some(side) => *side,
            None => {
                log::trace!("Attempt {}: {} has no free side", attempt, base);
                continue;
            }
        };

        // The first room must accept the door coming from `base`.
        if !first.connection(side.opposite()).is_unused() {
            log::trace!("Attempt {}: first room has no {} door", attempt, side.opposite());
            continue;
        }

        let positions = translate_cluster(cluster, space.room(base).position(), side);
        if collides(space, &positions) {
            log::trace!("Attempt {}: collision off {} {}", attempt, base, side);
            continue;
        }

        return Ok(Some(Placement {
            base,
            side,
            positions,
            attempt,
        }));
    }

    Ok(None)
}

/// Moves the cluster's rooms into the dungeon and opens the door between `base` and the first
/// room. Returns the ids of the new rooms, first room first.
pub fn apply_placement(
    space: &mut SpaceGraph,
    cluster: RuleTemplate,
    placement: &Placement,
) -> Vec<RoomId> {
    let rooms = cluster
        .into_rooms()
        .into_iter()
        .zip(placement.positions.iter())
        .map(|(mut room, p)| {
            room.set_position(*p);
            room
        })
        .collect();
    let ids = space.merge(rooms);
    if let Some(first) = ids.first() {
        space.connect(placement.base, placement.side, *first);
    }

    ids
}
