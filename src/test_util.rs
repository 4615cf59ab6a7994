use crate::{
    catalog::RuleCatalog,
    lattice::{Direction, Point, ALL_DIRECTIONS},
    mission::MissionSymbol,
    room::{GridRoom, RoomContent, RoomId},
    rule::RuleTemplate,
};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Sym {
    Entrance,
    Start,
    Corridor,
    Key,
    Lock,
    Goal,
    Blocked,
}

impl MissionSymbol for Sym {
    fn is_entrance(&self) -> bool {
        *self == Sym::Entrance
    }

    fn is_terminal(&self) -> bool {
        *self != Sym::Start
    }
}

/// Two rooms side by side, joined by a door.
pub fn pair_rule() -> RuleTemplate {
    let mut rule = RuleTemplate::new();
    let a = rule.add_room(GridRoom::default());
    let b = rule.add_room(GridRoom::default().with_position(Point::new(1, 0)));
    rule.connect(a, Direction::Right, b).unwrap();
    rule
}

/// A plus shape whose center uses every slot, so it can never be attached.
pub fn cross_rule() -> RuleTemplate {
    let mut rule = RuleTemplate::new();
    let center = rule.add_room(GridRoom::default());
    for d in ALL_DIRECTIONS.iter() {
        let arm = rule.add_room(GridRoom::default().with_position(d.offset()));
        rule.connect(center, *d, arm).unwrap();
    }
    rule
}

pub fn catalog() -> RuleCatalog<Sym> {
    let mut catalog = RuleCatalog::new();
    catalog
        .insert(Sym::Corridor, RuleTemplate::single(vec![]))
        .unwrap();
    catalog.insert(Sym::Corridor, pair_rule()).unwrap();
    catalog
        .insert(Sym::Key, RuleTemplate::single(vec![RoomContent::Key]))
        .unwrap();
    catalog
        .insert(Sym::Lock, RuleTemplate::single(vec![RoomContent::Lock]))
        .unwrap();
    catalog
        .insert(Sym::Goal, RuleTemplate::single(vec![RoomContent::Goal]))
        .unwrap();
    catalog.insert(Sym::Blocked, cross_rule()).unwrap();
    catalog
}

/// Every room holding `content`.
pub fn rooms_with(rooms: &[GridRoom], content: &RoomContent) -> Vec<RoomId> {
    rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.has_content(content))
        .map(|(i, _)| RoomId(i))
        .collect()
}
