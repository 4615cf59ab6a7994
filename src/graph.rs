use crate::{
    room::{Connection, RoomId},
    space_graph::SpaceGraph,
    symmetric_map::SymmetricMap,
};

use fnv::FnvHashSet;
use petgraph::{
    algo::tarjan_scc,
    graph::NodeIndex,
    stable_graph::StableGraph,
    visit::{Dfs, EdgeFiltered, EdgeRef},
    Undirected,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Door {
    Open,
    Locked,
}

/// Every door of the dungeon, once per connected pair of rooms.
pub fn collect_doors(space: &SpaceGraph) -> SymmetricMap<Door> {
    let mut doors = SymmetricMap::new();
    for (i, room) in space.rooms().iter().enumerate() {
        for (_, c) in room.connections() {
            match c {
                Connection::Unused => {}
                Connection::Open(n) => {
                    doors.insert(RoomId(i), n, Door::Open);
                }
                Connection::Locked(n) => {
                    doors.insert(RoomId(i), n, Door::Locked);
                }
            }
        }
    }

    doors
}

/// Node `i` of the returned graph is room `i`.
pub fn room_graph(space: &SpaceGraph) -> StableGraph<RoomId, Door, Undirected> {
    let mut graph = StableGraph::default();
    for i in 0..space.len() {
        graph.add_node(RoomId(i));
    }
    for (a, b, door) in collect_doors(space).sorted() {
        graph.add_edge(NodeIndex::new(a.index()), NodeIndex::new(b.index()), *door);
    }

    graph
}

/// Rooms that can be reached from `start` without passing a locked door.
pub fn reachable_through_open_doors(space: &SpaceGraph, start: RoomId) -> FnvHashSet<RoomId> {
    let graph = room_graph(space);
    let open = EdgeFiltered::from_fn(&graph, |e| *e.weight() == Door::Open);

    let mut reached = FnvHashSet::default();
    let mut dfs = Dfs::new(&open, NodeIndex::new(start.index()));
    while let Some(n) = dfs.next(&open) {
        reached.insert(graph[n]);
    }

    reached
}

/// True when every room can be reached from every other, locked doors included.
pub fn is_connected(space: &SpaceGraph) -> bool {
    tarjan_scc(&room_graph(space)).len() <= 1
}

/// Layout scale applied to grid coordinates in the exported description.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ExportSpec {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for ExportSpec {
    fn default() -> Self {
        ExportSpec {
            scale_x: 1.5,
            scale_y: 1.5,
        }
    }
}

/// Describes the dungeon in GraphViz `graph` syntax: one pinned node per room and one edge per
/// door, locked doors dashed.
pub fn to_graphviz(space: &SpaceGraph, export: &ExportSpec) -> String {
    let mut out = String::from("graph space {\n    node [shape=\"box\"];\n");

    for (i, room) in space.rooms().iter().enumerate() {
        let mut label = RoomId(i).to_string();
        for c in room.contents() {
            label.push_str("\\n");
            label.push_str(&c.to_string().replace('"', "\\\""));
        }
        let p = room.position();
        out.push_str(&format!(
            "    {} [label=\"{}\" pos=\"{},{}!\"];\n",
            RoomId(i),
            label,
            p.x as f32 * export.scale_x,
            p.y as f32 * export.scale_y
        ));
    }

    for (a, b, door) in collect_doors(space).sorted() {
        match door {
            Door::Open => out.push_str(&format!("    {} -- {};\n", a, b)),
            Door::Locked => out.push_str(&format!(
                "    {} -- {} [style=\"dashed\" label=\"locked\"];\n",
                a, b
            )),
        }
    }

    out.push_str("}\n");
    out
}
