//! The read-only view of a mission graph that the generator walks.

use crate::{error::GenerateError, lattice::Direction};

use serde::{Deserialize, Serialize};
use std::{fmt, hash::Hash};

/// A symbol of the mission alphabet.
pub trait MissionSymbol: Copy + Eq + Hash + fmt::Debug {
    fn is_entrance(&self) -> bool;

    /// Terminal symbols are the ones that have rule templates.
    fn is_terminal(&self) -> bool;
}

pub trait MissionGraph {
    type Node: Copy + Eq + fmt::Debug;
    type Symbol: MissionSymbol;

    /// The node generation starts from; it must carry the entrance symbol.
    fn first_node(&self) -> Option<Self::Node>;

    fn symbol(&self, node: Self::Node) -> Self::Symbol;

    /// The node that the edge in `slot` points to. An edge coming into `node` is reported as
    /// pointing at `node` itself.
    fn edge_target(&self, node: Self::Node, slot: Direction) -> Option<Self::Node>;
}

/// Slots followed when walking out of a mission node, in order. TOP is never followed.
pub const WALK_ORDER: [Direction; 3] = [Direction::Right, Direction::Left, Direction::Bottom];

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MissionNodeSpec<S> {
    pub symbol: S,
    #[serde(default)]
    pub edges: [Option<usize>; 4],
}

/// A mission graph stored as a node list. Node 0 is the first node.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ListMissionGraph<S> {
    pub nodes: Vec<MissionNodeSpec<S>>,
}

impl<S> Default for ListMissionGraph<S> {
    fn default() -> Self {
        ListMissionGraph { nodes: Vec::new() }
    }
}

impl<S> ListMissionGraph<S> {
    pub fn new() -> Self {
        ListMissionGraph::default()
    }

    pub fn add_node(&mut self, symbol: S) -> usize {
        self.nodes.push(MissionNodeSpec {
            symbol,
            edges: [None; 4],
        });
        self.nodes.len() - 1
    }

    /// Adds a directed edge leaving `from` through `slot`. `to` records the same edge on its
    /// opposite slot as an incoming edge. Both slots must be empty.
    pub fn link(&mut self, from: usize, slot: Direction, to: usize) -> Result<(), GenerateError> {
        for node in [from, to].iter() {
            if *node >= self.nodes.len() {
                return Err(GenerateError::UnknownMissionNode { node: *node });
            }
        }
        let back = slot.opposite();
        for (node, s) in [(from, slot), (to, back)].iter() {
            if self.nodes[*node].edges[s.index()].is_some() {
                return Err(GenerateError::MissionSlotTaken {
                    node: *node,
                    slot: *s,
                });
            }
        }
        self.nodes[from].edges[slot.index()] = Some(to);
        self.nodes[to].edges[back.index()] = Some(to);

        Ok(())
    }
}

impl<S: MissionSymbol> MissionGraph for ListMissionGraph<S> {
    type Node = usize;
    type Symbol = S;

    fn first_node(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn symbol(&self, node: usize) -> S {
        self.nodes[node].symbol
    }

    fn edge_target(&self, node: usize, slot: Direction) -> Option<usize> {
        self.nodes
            .get(node)
            .and_then(|n| n.edges[slot.index()])
            .filter(|target| *target < self.nodes.len())
    }
}

/// Nodes reached by leaving `node` in walk order, skipping edges that point back at `node`.
pub fn outgoing<M: MissionGraph>(mission: &M, node: M::Node) -> Vec<M::Node> {
    WALK_ORDER
        .iter()
        .filter_map(|slot| mission.edge_target(node, *slot))
        .filter(|target| *target != node)
        .collect()
}
