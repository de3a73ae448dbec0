//! Admission of new solutions into the pool.

use routecraft_core::Solution;

/// Decides whether a freshly built solution enters the pool.
pub trait SolutionAcceptor {
    /// Offer `candidate`; returns `true` if it was admitted.
    fn accept(&self, pool: &mut Vec<Solution>, candidate: Solution) -> bool;
}

/// Keeps at most `memory` solutions and only ever trades up.
///
/// While the pool has room every candidate is admitted. Once full, the
/// candidate replaces the most expensive member if it is strictly cheaper.
/// Unevaluated solutions count as infinitely expensive.
///
/// # Examples
/// ```
/// use routecraft_core::Solution;
/// use routecraft_solver::{GreedyAcceptance, SolutionAcceptor};
///
/// let acceptor = GreedyAcceptance::new(1);
/// let mut pool = Vec::new();
/// assert!(acceptor.accept(&mut pool, Solution::new(Vec::new(), 10.0)));
/// assert!(!acceptor.accept(&mut pool, Solution::new(Vec::new(), 12.0)));
/// assert!(acceptor.accept(&mut pool, Solution::new(Vec::new(), 8.0)));
/// assert_eq!(pool[0].cost(), Some(8.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyAcceptance {
    memory: usize,
}

impl GreedyAcceptance {
    /// Keep up to `memory` solutions; a memory of zero is raised to one.
    pub fn new(memory: usize) -> Self {
        Self {
            memory: memory.max(1),
        }
    }

    /// Pool capacity.
    pub const fn memory(&self) -> usize {
        self.memory
    }
}

impl Default for GreedyAcceptance {
    fn default() -> Self {
        Self::new(1)
    }
}

fn ranking_cost(solution: &Solution) -> f64 {
    solution.cost().unwrap_or(f64::INFINITY)
}

impl SolutionAcceptor for GreedyAcceptance {
    fn accept(&self, pool: &mut Vec<Solution>, candidate: Solution) -> bool {
        if pool.len() < self.memory {
            pool.push(candidate);
            return true;
        }
        let worst = pool
            .iter_mut()
            .max_by(|a, b| ranking_cost(a).total_cmp(&ranking_cost(b)));
        match worst {
            Some(worst) if ranking_cost(&candidate) < ranking_cost(worst) => {
                *worst = candidate;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn costs(pool: &[Solution]) -> Vec<Option<f64>> {
        pool.iter().map(Solution::cost).collect()
    }

    #[rstest]
    fn fills_pool_before_competing() {
        let acceptor = GreedyAcceptance::new(2);
        let mut pool = Vec::new();
        assert!(acceptor.accept(&mut pool, Solution::new(Vec::new(), 9.0)));
        assert!(acceptor.accept(&mut pool, Solution::new(Vec::new(), 11.0)));
        assert_eq!(costs(&pool), [Some(9.0), Some(11.0)]);
    }

    #[rstest]
    fn replaces_worst_member() {
        let acceptor = GreedyAcceptance::new(2);
        let mut pool = vec![Solution::new(Vec::new(), 9.0), Solution::new(Vec::new(), 11.0)];
        assert!(acceptor.accept(&mut pool, Solution::new(Vec::new(), 10.0)));
        assert_eq!(costs(&pool), [Some(9.0), Some(10.0)]);
    }

    #[rstest]
    fn equal_cost_is_not_an_improvement() {
        let acceptor = GreedyAcceptance::new(1);
        let mut pool = vec![Solution::new(Vec::new(), 9.0)];
        assert!(!acceptor.accept(&mut pool, Solution::new(Vec::new(), 9.0)));
    }

    #[rstest]
    fn unevaluated_member_is_replaced_first() {
        let acceptor = GreedyAcceptance::new(2);
        let mut pool = vec![Solution::unevaluated(Vec::new()), Solution::new(Vec::new(), 3.0)];
        assert!(acceptor.accept(&mut pool, Solution::new(Vec::new(), 100.0)));
        assert_eq!(costs(&pool), [Some(100.0), Some(3.0)]);
    }

    #[rstest]
    fn zero_memory_keeps_one_solution() {
        assert_eq!(GreedyAcceptance::new(0).memory(), 1);
    }
}
