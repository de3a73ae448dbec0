//! Removal of jobs from a solution.

use std::sync::Arc;

use rand::RngCore;
use rand::seq::SliceRandom;
use routecraft_core::{Job, Solution, VehicleRoutingProblem};

/// Removes jobs from a solution so they can be reinserted.
pub trait Ruin {
    /// Remove jobs from `solution` and return them.
    ///
    /// Routes left without jobs are dropped and the schedules of the
    /// remaining routes are refreshed.
    fn ruin(
        &self,
        problem: &VehicleRoutingProblem,
        solution: &mut Solution,
        rng: &mut dyn RngCore,
    ) -> Vec<Arc<Job>>;
}

/// Removes a fixed share of the assigned jobs, chosen uniformly.
///
/// The number removed is `ceil(share * assigned)`.
#[derive(Debug, Clone, Copy)]
pub struct RandomRuin {
    share: f64,
}

impl RandomRuin {
    /// Remove `share` of the assigned jobs, clamped to `[0, 1]`.
    pub fn new(share: f64) -> Self {
        Self {
            share: if share.is_nan() { 0.0 } else { share.clamp(0.0, 1.0) },
        }
    }

    /// Fraction of assigned jobs removed per call.
    pub const fn share(&self) -> f64 {
        self.share
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "share is clamped to [0, 1] so the product fits in usize"
    )]
    fn removal_count(&self, assigned: usize) -> usize {
        let count = (self.share * assigned as f64).ceil() as usize;
        count.min(assigned)
    }
}

impl Ruin for RandomRuin {
    fn ruin(
        &self,
        problem: &VehicleRoutingProblem,
        solution: &mut Solution,
        rng: &mut dyn RngCore,
    ) -> Vec<Arc<Job>> {
        let mut assigned: Vec<String> = solution
            .routes()
            .iter()
            .flat_map(|route| route.jobs().map(|job| job.id().to_owned()))
            .collect();
        let count = self.removal_count(assigned.len());
        assigned.shuffle(rng);

        let mut removed = Vec::with_capacity(count);
        for job_id in assigned.iter().take(count) {
            let taken = solution
                .routes_mut()
                .iter_mut()
                .find_map(|route| route.remove_job(job_id));
            removed.extend(taken);
        }

        let routes = solution.routes_mut();
        routes.retain(|route| !route.is_empty());
        for route in routes.iter_mut() {
            route.update_schedule(problem.transport_costs());
        }
        solution.invalidate_cost();
        log::debug!("ruin removed {} jobs", removed.len());
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::line_problem;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use routecraft_core::{Driver, VehicleRoute};
    use rstest::rstest;

    fn assigned_solution(problem: &VehicleRoutingProblem) -> Solution {
        let vehicle = problem.vehicles().first().cloned().expect("one vehicle");
        let mut route = VehicleRoute::new(vehicle, Driver::no_driver(), 0.0);
        for (index, job) in problem.jobs().iter().enumerate() {
            route.insert_job(index, Arc::clone(job)).expect("distinct jobs");
        }
        Solution::new(vec![route], 1.0)
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.1, 1)]
    #[case(0.5, 2)]
    #[case(1.0, 4)]
    #[case(7.0, 4)]
    fn removes_ceil_of_share(#[case] share: f64, #[case] expected: usize) {
        let problem = line_problem(&[1.0, 2.0, 3.0, 4.0]);
        let mut solution = assigned_solution(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let removed = RandomRuin::new(share).ruin(&problem, &mut solution, &mut rng);
        assert_eq!(removed.len(), expected);
        for job in &removed {
            assert!(!solution.contains_job(job.id()));
        }
        assert_eq!(solution.cost(), None);
    }

    #[rstest]
    fn emptied_routes_are_dropped() {
        let problem = line_problem(&[1.0, 2.0]);
        let mut solution = assigned_solution(&problem);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let removed = RandomRuin::new(1.0).ruin(&problem, &mut solution, &mut rng);
        assert_eq!(removed.len(), 2);
        assert!(solution.routes().is_empty());
    }
}
