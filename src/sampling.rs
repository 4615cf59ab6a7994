use crate::transform::Rotation;

use rand::{prelude::*, rngs::SmallRng};
use rand_distr::{Distribution, Uniform};

pub fn small_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Uniform over the four quarter turns.
pub struct RotationDist {
    quarter_turns: Uniform<u8>,
}

impl Default for RotationDist {
    fn default() -> Self {
        RotationDist {
            quarter_turns: Uniform::new(0, 4),
        }
    }
}

impl Distribution<Rotation> for RotationDist {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rotation {
        Rotation::from_quarter_turns(rng.sample(self.quarter_turns))
    }
}

pub fn sample_rotation(rng: &mut impl Rng) -> Rotation {
    RotationDist::default().sample(rng)
}

/// Uniform choice from a slice; `None` when it is empty.
pub fn choose<'a, T>(items: &'a [T], rng: &mut impl Rng) -> Option<&'a T> {
    items.choose(rng)
}
