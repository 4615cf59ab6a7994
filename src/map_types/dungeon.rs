use crate::{
    catalog::RuleCatalog,
    error::GenerateError,
    graph::{room_graph, to_graphviz, ExportSpec},
    mission::MissionGraph,
    placement::PLACEMENT_ATTEMPTS,
    sampling::small_rng,
    space_graph::SpaceGraph,
    stats::{PlacementStats, PlacementSummary},
    walker::walk_mission,
};

use petgraph::dot::{Config, Dot};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

pub const MAX_EXPANSION_ROUNDS: usize = 64;
pub const MAX_WALK_DEPTH: usize = 1024;

/// A finished dungeon and how hard it was to build.
#[derive(Clone, Debug)]
pub struct Dungeon {
    pub space: SpaceGraph,
    /// Builds thrown away before this one succeeded.
    pub restarts: usize,
    pub placement: PlacementSummary,
}

impl Dungeon {
    pub fn to_graphviz(&self, export: &ExportSpec) -> String {
        to_graphviz(&self.space, export)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct DungeonSpec {
    pub seed: u64,
    /// Tries per rule draw before drawing a new rule and rotation.
    pub placement_attempts: usize,
    /// Rule draws per mission node before the build is abandoned.
    pub max_expansion_rounds: usize,
    pub max_walk_depth: usize,
    /// `None` keeps restarting for as long as it takes.
    pub max_restarts: Option<usize>,
    /// Also turn each room's doors when a rule is rotated.
    pub rotate_connections: bool,
    pub export: ExportSpec,
}

impl Default for DungeonSpec {
    fn default() -> Self {
        DungeonSpec {
            seed: 0,
            placement_attempts: PLACEMENT_ATTEMPTS,
            max_expansion_rounds: MAX_EXPANSION_ROUNDS,
            max_walk_depth: MAX_WALK_DEPTH,
            max_restarts: None,
            rotate_connections: false,
            export: ExportSpec::default(),
        }
    }
}

impl DungeonSpec {
    pub fn from_ron(text: &str) -> Result<Self, GenerateError> {
        ron::de::from_str(text).map_err(|e| GenerateError::Config(e.to_string()))
    }

    pub fn rng(&self) -> SmallRng {
        small_rng(self.seed)
    }

    /// One build with no restarts. Infeasible builds come back as errors.
    pub fn try_generate<M: MissionGraph>(
        &self,
        mission: &M,
        catalog: &RuleCatalog<M::Symbol>,
        rng: &mut impl Rng,
    ) -> Result<Dungeon, GenerateError> {
        log::debug!("Generating space graph");

        let mut stats = PlacementStats::default();
        let space = walk_mission(mission, catalog, self, rng, &mut stats)?;
        debug_assert_eq!(space.validate(), Ok(()));
        log::debug!("Placed {} rooms", space.len());
        log::debug!(
            "Space graph = {:?}",
            Dot::with_config(&room_graph(&space), &[Config::EdgeNoLabel])
        );

        Ok(Dungeon {
            space,
            restarts: 0,
            placement: stats.summary(),
        })
    }

    /// Builds until one attempt succeeds. Configuration errors are returned immediately; an
    /// infeasible build is discarded and started over from the entrance.
    pub fn generate<M: MissionGraph>(
        &self,
        mission: &M,
        catalog: &RuleCatalog<M::Symbol>,
        rng: &mut impl Rng,
    ) -> Result<Dungeon, GenerateError> {
        let mut restarts = 0;
        loop {
            match self.try_generate(mission, catalog, rng) {
                Ok(dungeon) => return Ok(Dungeon { restarts, ..dungeon }),
                Err(e) if e.is_recoverable() => {
                    if self.max_restarts.map_or(false, |max| restarts >= max) {
                        return Err(GenerateError::RestartsExhausted { restarts });
                    }
                    restarts += 1;
                    log::warn!("Restarting build ({}): {}", restarts, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// `generate` with an RNG seeded from `self.seed`.
    pub fn generate_seeded<M: MissionGraph>(
        &self,
        mission: &M,
        catalog: &RuleCatalog<M::Symbol>,
    ) -> Result<Dungeon, GenerateError> {
        self.generate(mission, catalog, &mut self.rng())
    }
}
