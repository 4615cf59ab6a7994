use serde::{Deserialize, Serialize};
use stats::{MinMax, OnlineStats};

/// Running totals of how many placement attempts each expansion needed.
pub struct PlacementStats {
    expansions: usize,
    attempts: OnlineStats,
    extremes: MinMax<usize>,
}

impl Default for PlacementStats {
    fn default() -> Self {
        PlacementStats {
            expansions: 0,
            attempts: OnlineStats::new(),
            extremes: MinMax::new(),
        }
    }
}

impl PlacementStats {
    pub fn record(&mut self, attempts: usize) {
        self.expansions += 1;
        self.attempts.add(attempts);
        self.extremes.add(attempts);
    }

    pub fn summary(&self) -> PlacementSummary {
        if self.expansions == 0 {
            return PlacementSummary::default();
        }

        PlacementSummary {
            expansions: self.expansions,
            mean_attempts: self.attempts.mean(),
            stddev_attempts: self.attempts.stddev(),
            max_attempts: self.extremes.max().cloned().unwrap_or(0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PlacementSummary {
    pub expansions: usize,
    pub mean_attempts: f64,
    pub stddev_attempts: f64,
    pub max_attempts: usize,
}
