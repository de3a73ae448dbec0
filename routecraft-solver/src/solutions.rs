//! Helpers over solution pools.

use routecraft_core::{Solution, VehicleRoutingProblem};

/// The cheapest evaluated solution in `solutions`.
///
/// Solutions without a cost are ignored. Among equal costs the earliest
/// wins.
///
/// # Examples
/// ```
/// use routecraft_core::Solution;
/// use routecraft_solver::best_solution;
///
/// let pool = vec![
///     Solution::new(Vec::new(), 9.0),
///     Solution::unevaluated(Vec::new()),
///     Solution::new(Vec::new(), 4.0),
/// ];
/// assert_eq!(best_solution(&pool).and_then(Solution::cost), Some(4.0));
/// ```
#[must_use]
pub fn best_solution(solutions: &[Solution]) -> Option<&Solution> {
    solutions
        .iter()
        .filter_map(|solution| solution.cost().map(|cost| (cost, solution)))
        .min_by(|(left, _), (right, _)| left.total_cmp(right))
        .map(|(_, solution)| solution)
}

/// Sum of the route costs of `solution` under the problem's cost model.
#[must_use]
pub fn solution_cost(problem: &VehicleRoutingProblem, solution: &Solution) -> f64 {
    let costs = problem.transport_costs();
    solution.routes().iter().map(|route| route.cost(costs)).sum()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::line_problem;
    use routecraft_core::{Driver, VehicleRoute};
    use rstest::rstest;

    #[rstest]
    fn unevaluated_pool_has_no_best() {
        let pool = vec![Solution::unevaluated(Vec::new())];
        assert!(best_solution(&pool).is_none());
    }

    #[rstest]
    fn ties_keep_the_first() {
        let pool = vec![
            Solution::new(Vec::new(), 3.0),
            Solution::new(Vec::new(), 3.0),
        ];
        let best = best_solution(&pool).expect("evaluated pool");
        assert!(std::ptr::eq(best, pool.first().expect("two solutions")));
    }

    #[rstest]
    fn cost_sums_routes() {
        let problem = line_problem(&[2.0, 5.0]);
        let vehicle = problem.vehicles().first().cloned().expect("one vehicle");
        let mut route = VehicleRoute::new(vehicle, Driver::no_driver(), 0.0);
        for (index, job) in problem.jobs().iter().enumerate() {
            route.insert_job(index, Arc::clone(job)).expect("distinct jobs");
        }
        route.update_schedule(problem.transport_costs());
        let solution = Solution::unevaluated(vec![route]);
        assert!((solution_cost(&problem, &solution) - 10.0).abs() < 1e-9);
        assert!(solution_cost(&problem, &Solution::default()).abs() < f64::EPSILON);
    }
}
