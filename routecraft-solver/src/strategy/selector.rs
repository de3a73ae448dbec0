//! Choice of the pool member a strategy starts from.

use rand::RngCore;
use rand::seq::SliceRandom;
use routecraft_core::Solution;

/// Picks the solution a strategy works on.
pub trait SolutionSelector {
    /// Choose from `pool`, or `None` when it is empty.
    fn select<'a>(&self, pool: &'a [Solution], rng: &mut dyn RngCore) -> Option<&'a Solution>;
}

/// Picks the cheapest evaluated solution, or the first one if none has been
/// evaluated.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectBest;

impl SolutionSelector for SelectBest {
    fn select<'a>(&self, pool: &'a [Solution], _rng: &mut dyn RngCore) -> Option<&'a Solution> {
        crate::best_solution(pool).or_else(|| pool.first())
    }
}

/// Picks a pool member uniformly at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectRandomly;

impl SolutionSelector for SelectRandomly {
    fn select<'a>(&self, pool: &'a [Solution], rng: &mut dyn RngCore) -> Option<&'a Solution> {
        pool.choose(rng)
    }
}
