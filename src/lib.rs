//! Builds the physical layout of a dungeon (the space graph) from a mission graph.
//!
//! Each mission node is replaced by a small pre-authored cluster of grid rooms drawn from a
//! [`RuleCatalog`], rotated at random and attached to a room that still has a free door.
//! Lock rooms gate everything placed after them.

pub mod catalog;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod lattice;
pub mod locking;
pub mod map_types;
pub mod mission;
pub mod placement;
pub mod room;
pub mod rule;
pub mod sampling;
pub mod space_graph;
pub mod stats;
pub mod symmetric_map;
pub mod transform;
pub mod walker;

#[cfg(test)]
mod test_util;

pub use catalog::RuleCatalog;
pub use error::{GenerateError, Infeasible, LayoutError};
pub use lattice::{Direction, Point};
pub use map_types::dungeon::{Dungeon, DungeonSpec};
pub use mission::{ListMissionGraph, MissionGraph, MissionSymbol};
pub use room::{Connection, GridRoom, RoomContent, RoomId};
pub use rule::{RuleSpec, RuleTemplate};
pub use space_graph::SpaceGraph;
