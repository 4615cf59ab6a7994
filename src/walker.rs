use crate::{
    catalog::RuleCatalog,
    error::{GenerateError, Infeasible},
    locking,
    map_types::dungeon::DungeonSpec,
    mission::{outgoing, MissionGraph, MissionSymbol},
    placement::{apply_placement, search_placement},
    sampling::sample_rotation,
    space_graph::SpaceGraph,
    stats::PlacementStats,
};

use rand::Rng;

/// Checks that the mission starts at an entrance and returns that node.
pub fn entrance_node<M: MissionGraph>(mission: &M) -> Result<M::Node, GenerateError> {
    let node = mission.first_node().ok_or(GenerateError::EmptyMission)?;
    let symbol = mission.symbol(node);
    if !symbol.is_entrance() {
        return Err(GenerateError::NotEntrance {
            symbol: format!("{:?}", symbol),
        });
    }

    Ok(node)
}

/// Grows the dungeon by one rule for `symbol`.
///
/// Each round draws a rule and a rotation and makes `placement_attempts` tries at attaching it.
/// After `max_expansion_rounds` failed rounds the expansion is infeasible.
pub fn expand_node<S: MissionSymbol>(
    space: &mut SpaceGraph,
    symbol: S,
    catalog: &RuleCatalog<S>,
    spec: &DungeonSpec,
    rng: &mut impl Rng,
    stats: &mut PlacementStats,
) -> Result<(), GenerateError> {
    let mut attempts = 0;
    for round in 1..=spec.max_expansion_rounds {
        let rule = catalog.select(symbol, rng)?;
        locking::check_rule(symbol, rule)?;
        let cluster = rule.rotated(sample_rotation(rng), spec.rotate_connections);

        let placement = match search_placement(space, &cluster, spec.placement_attempts, rng)? {
            Some(p) => p,
            None => {
                attempts += spec.placement_attempts;
                log::debug!("Round {} for {:?} found no placement", round, symbol);
                continue;
            }
        };

        attempts += placement.attempt;
        stats.record(attempts);
        let new_rooms = apply_placement(space, cluster, &placement);
        log::debug!(
            "Placed {:?} as {} rooms off {} {}",
            symbol,
            new_rooms.len(),
            placement.base,
            placement.side
        );

        return locking::settle(space, placement.base, placement.side, &new_rooms);
    }

    Err(Infeasible::ExpansionExhausted {
        symbol: format!("{:?}", symbol),
        rounds: spec.max_expansion_rounds,
    }
    .into())
}

/// Builds one dungeon by walking `mission` depth first from its entrance.
///
/// Children are taken in walk order and each is expanded before its own children are visited.
/// A pending-node stack stands in for recursion so the walk depth is checked explicitly.
pub fn walk_mission<M: MissionGraph>(
    mission: &M,
    catalog: &RuleCatalog<M::Symbol>,
    spec: &DungeonSpec,
    rng: &mut impl Rng,
    stats: &mut PlacementStats,
) -> Result<SpaceGraph, GenerateError> {
    let entrance = entrance_node(mission)?;
    let mut space = SpaceGraph::with_entrance();

    let mut pending: Vec<(M::Node, usize)> = outgoing(mission, entrance)
        .into_iter()
        .rev()
        .map(|n| (n, 1))
        .collect();
    while let Some((node, depth)) = pending.pop() {
        if depth > spec.max_walk_depth {
            return Err(Infeasible::WalkTooDeep { depth }.into());
        }

        expand_node(&mut space, mission.symbol(node), catalog, spec, rng, stats)?;
        pending.extend(outgoing(mission, node).into_iter().rev().map(|n| (n, depth + 1)));
    }

    Ok(space)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        frontier::structural_frontier,
        lattice::Direction,
        mission::ListMissionGraph,
        room::{Connection, RoomContent, RoomId},
        rule::RuleTemplate,
        sampling::small_rng,
        space_graph::ENTRANCE_ROOM,
        test_util::{catalog, cross_rule, rooms_with, Sym},
    };

    fn walk(mission: &ListMissionGraph<Sym>, seed: u64) -> Result<SpaceGraph, GenerateError> {
        let mut rng = small_rng(seed);
        walk_mission(
            mission,
            &catalog(),
            &DungeonSpec::default(),
            &mut rng,
            &mut PlacementStats::default(),
        )
    }

    #[test]
    fn test_first_node_must_be_entrance() {
        let mut m = ListMissionGraph::new();
        let a = m.add_node(Sym::Corridor);
        let b = m.add_node(Sym::Corridor);
        m.link(a, Direction::Right, b).unwrap();
        assert_eq!(
            walk(&m, 0).unwrap_err(),
            GenerateError::NotEntrance {
                symbol: "Corridor".into()
            }
        );
        assert_eq!(
            walk(&ListMissionGraph::new(), 0).unwrap_err(),
            GenerateError::EmptyMission
        );
    }

    #[test]
    fn test_entrance_then_corridor() {
        let mut catalog = RuleCatalog::new();
        catalog
            .insert(Sym::Corridor, RuleTemplate::single(vec![]))
            .unwrap();
        let mut m = ListMissionGraph::new();
        let e = m.add_node(Sym::Entrance);
        let c = m.add_node(Sym::Corridor);
        m.link(e, Direction::Right, c).unwrap();

        for seed in 0..10 {
            let mut rng = small_rng(seed);
            let space = walk_mission(
                &m,
                &catalog,
                &DungeonSpec::default(),
                &mut rng,
                &mut PlacementStats::default(),
            )
            .unwrap();

            assert_eq!(space.len(), 2);
            let corridor = space.room(RoomId(1));
            let (side, _) = space
                .room(ENTRANCE_ROOM)
                .connections()
                .find(|(_, c)| !c.is_unused())
                .unwrap();
            assert_eq!(corridor.position(), side.offset());
            assert_eq!(
                space.room(ENTRANCE_ROOM).connection(side),
                Connection::Open(RoomId(1))
            );
            assert_eq!(
                corridor.connection(side.opposite()),
                Connection::Open(ENTRANCE_ROOM)
            );
        }
    }

    #[test]
    fn test_walk_skips_top_slot() {
        let mut m = ListMissionGraph::new();
        let e = m.add_node(Sym::Entrance);
        let up = m.add_node(Sym::Goal);
        let right = m.add_node(Sym::Key);
        m.link(e, Direction::Top, up).unwrap();
        m.link(e, Direction::Right, right).unwrap();

        let space = walk(&m, 3).unwrap();
        assert_eq!(space.len(), 2);
        assert!(rooms_with(space.rooms(), &RoomContent::Goal).is_empty());
        assert_eq!(rooms_with(space.rooms(), &RoomContent::Key).len(), 1);
    }

    #[test]
    fn test_walk_is_depth_first_in_walk_order() {
        // entrance -> (right) key -> (bottom) goal, entrance -> (left) lock
        let mut m = ListMissionGraph::new();
        let e = m.add_node(Sym::Entrance);
        let key = m.add_node(Sym::Key);
        let goal = m.add_node(Sym::Goal);
        let lock = m.add_node(Sym::Lock);
        m.link(e, Direction::Right, key).unwrap();
        m.link(key, Direction::Bottom, goal).unwrap();
        m.link(e, Direction::Left, lock).unwrap();

        let space = walk(&m, 17).unwrap();
        let order: Vec<&RoomContent> = space
            .rooms()
            .iter()
            .skip(1)
            .flat_map(|r| r.contents().iter())
            .collect();
        assert_eq!(
            order,
            vec![&RoomContent::Key, &RoomContent::Goal, &RoomContent::Lock]
        );
    }

    #[test]
    fn test_lock_gates_everything_after_it() {
        // entrance -> corridor, entrance -> lock -> goal
        let mut m = ListMissionGraph::new();
        let e = m.add_node(Sym::Entrance);
        let corridor = m.add_node(Sym::Corridor);
        let lock = m.add_node(Sym::Lock);
        let goal = m.add_node(Sym::Goal);
        m.link(e, Direction::Right, corridor).unwrap();
        m.link(e, Direction::Bottom, lock).unwrap();
        m.link(lock, Direction::Right, goal).unwrap();

        for seed in 0..10 {
            let space = walk(&m, seed).unwrap();
            assert_eq!(space.validate(), Ok(()));

            let lock_room = rooms_with(space.rooms(), &RoomContent::Lock)[0];
            let goal_room = rooms_with(space.rooms(), &RoomContent::Goal)[0];
            let locked: Vec<_> = space
                .room(lock_room)
                .connections()
                .filter(|(_, c)| c.is_locked())
                .collect();
            assert_eq!(locked.len(), 1);

            // The goal hangs off the lock room through an ordinary door.
            let (side, c) = space
                .room(goal_room)
                .connections()
                .find(|(_, c)| !c.is_unused())
                .unwrap();
            assert_eq!(c, Connection::Open(lock_room));
            assert_eq!(
                space.room(lock_room).connection(side.opposite()),
                Connection::Open(goal_room)
            );
        }
    }

    #[test]
    fn test_unplaceable_rule_is_infeasible_not_fatal() {
        let mut m = ListMissionGraph::new();
        let e = m.add_node(Sym::Entrance);
        let b = m.add_node(Sym::Blocked);
        m.link(e, Direction::Right, b).unwrap();

        let spec = DungeonSpec {
            max_expansion_rounds: 3,
            ..DungeonSpec::default()
        };
        let mut rng = small_rng(1);
        let err = walk_mission(&m, &catalog(), &spec, &mut rng, &mut PlacementStats::default())
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::Infeasible(Infeasible::ExpansionExhausted {
                symbol: "Blocked".into(),
                rounds: 3
            })
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_expansion_redraws_rule_after_failed_round() {
        let mut catalog = RuleCatalog::new();
        catalog.insert(Sym::Corridor, cross_rule()).unwrap();
        catalog
            .insert(Sym::Corridor, RuleTemplate::single(vec![]))
            .unwrap();

        let mut stats = PlacementStats::default();
        for seed in 0..20 {
            let mut space = SpaceGraph::with_entrance();
            let mut rng = small_rng(seed);
            expand_node(
                &mut space,
                Sym::Corridor,
                &catalog,
                &DungeonSpec::default(),
                &mut rng,
                &mut stats,
            )
            .unwrap();
            assert_eq!(space.len(), 2);
        }
        // Some seeds draw the cross first and pay a whole round for it.
        assert!(stats.summary().max_attempts > 100);
    }

    #[test]
    fn test_walk_depth_is_bounded() {
        // A two node cycle never terminates on its own.
        let mut m = ListMissionGraph::new();
        let e = m.add_node(Sym::Entrance);
        let a = m.add_node(Sym::Corridor);
        let b = m.add_node(Sym::Corridor);
        m.link(e, Direction::Right, a).unwrap();
        m.link(a, Direction::Right, b).unwrap();
        m.nodes[b].edges[Direction::Right.index()] = Some(a);

        let spec = DungeonSpec {
            max_walk_depth: 8,
            ..DungeonSpec::default()
        };
        let mut rng = small_rng(4);
        assert_eq!(
            walk_mission(&m, &catalog(), &spec, &mut rng, &mut PlacementStats::default())
                .unwrap_err(),
            GenerateError::Infeasible(Infeasible::WalkTooDeep { depth: 9 })
        );
    }

    #[test]
    fn test_lock_free_frontier_matches_free_rooms() {
        let mut m = ListMissionGraph::new();
        let e = m.add_node(Sym::Entrance);
        let mut prev = e;
        for _ in 0..12 {
            let next = m.add_node(Sym::Corridor);
            m.link(prev, Direction::Right, next).unwrap();
            prev = next;
        }
        let side = m.add_node(Sym::Key);
        m.link(e, Direction::Left, side).unwrap();

        for seed in 0..5 {
            let space = walk(&m, seed).unwrap();
            assert_eq!(space.frontier().to_set(), structural_frontier(space.rooms()));
        }
    }
}
