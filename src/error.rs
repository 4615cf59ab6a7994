use crate::{
    lattice::{Direction, Point},
    room::RoomId,
};

use thiserror::Error;

/// Structural problems with a room cluster, either an authored rule template or a generated
/// dungeon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("room cluster has no rooms")]
    EmptyCluster,

    #[error("first room of a rule must sit at the local origin, found {position}")]
    FirstRoomNotAtOrigin { position: Point },

    #[error("{first} and {second} share position {position}")]
    DuplicatePosition {
        position: Point,
        first: RoomId,
        second: RoomId,
    },

    #[error("{room} connects {direction} to {neighbor}, which does not connect back")]
    AsymmetricConnection {
        room: RoomId,
        direction: Direction,
        neighbor: RoomId,
    },

    #[error("{room} connects {direction} to {neighbor}, which does not exist")]
    DanglingConnection {
        room: RoomId,
        direction: Direction,
        neighbor: RoomId,
    },

    #[error("{room} connects {direction} to itself")]
    SelfConnection { room: RoomId, direction: Direction },

    #[error("{room} connects {direction} to {neighbor}, which is not the next cell over")]
    DoorNotAdjacent {
        room: RoomId,
        direction: Direction,
        neighbor: RoomId,
    },

    #[error("door references room index {index}, but the rule has {len} rooms")]
    DoorOutOfRange { index: usize, len: usize },

    #[error("cannot lock the {direction} slot because it is unused")]
    UnconnectedLock { direction: Direction },
}

/// A build attempt that can not be completed with the random draws made so far. The generator
/// recovers from these by discarding the dungeon and starting over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Infeasible {
    #[error("no placement for {symbol} after {rounds} rounds")]
    ExpansionExhausted { symbol: String, rounds: usize },

    #[error("mission walk exceeded depth {depth}")]
    WalkTooDeep { depth: usize },

    #[error("no room in the dungeon has a free connection")]
    EmptyFrontier,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("mission graph has no nodes")]
    EmptyMission,

    #[error("mission graph has no node {node}")]
    UnknownMissionNode { node: usize },

    #[error("mission node {node} already has an edge in its {slot} slot")]
    MissionSlotTaken { node: usize, slot: Direction },

    #[error("first mission node must be an entrance, found {symbol}")]
    NotEntrance { symbol: String },

    #[error("mission node {symbol} is not terminal; rules only exist for terminal symbols")]
    NonTerminal { symbol: String },

    #[error("no rule templates for terminal symbol {symbol}")]
    NoRules { symbol: String },

    #[error("locked rule for {symbol} has {rooms} rooms; locked rules must have exactly one")]
    MultiRoomLock { symbol: String, rooms: usize },

    #[error("invalid rule template for {symbol}: {source}")]
    InvalidRule {
        symbol: String,
        #[source]
        source: LayoutError,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("placement infeasible: {0}")]
    Infeasible(#[from] Infeasible),

    #[error("gave up after {restarts} restarts")]
    RestartsExhausted { restarts: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GenerateError {
    /// True for failures that a fresh build might avoid.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GenerateError::Infeasible(_))
    }
}
