//! Candidate solutions: a set of routes and their aggregate cost.

use crate::VehicleRoute;

/// Reported in place of a cost that has not been evaluated yet.
///
/// Real costs are never negative, so the value cannot be mistaken for one.
/// Inside the engine an unevaluated cost is `None`; this constant only
/// appears where a plain number must be emitted.
pub const NO_COST_YET: f64 = -9999.0;

/// A set of routes together with their aggregate cost.
///
/// The solution owns its routes exclusively: [`Solution::copy_of`] duplicates
/// every route and activity, so experiments on a copy never leak into the
/// original. Cost correctness is the responsibility of whoever commits it
/// with [`Solution::set_cost`].
///
/// # Examples
/// ```
/// use routecraft_core::{Solution, VehicleRoute, NO_COST_YET};
///
/// let mut solution = Solution::unevaluated(vec![VehicleRoute::empty()]);
/// assert_eq!(solution.cost(), None);
/// assert_eq!(solution.reported_cost(), NO_COST_YET);
///
/// solution.set_cost(42.0);
/// let copy = Solution::copy_of(&solution);
/// assert_eq!(copy.cost(), Some(42.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    routes: Vec<VehicleRoute>,
    cost: Option<f64>,
}

impl Solution {
    /// Construct a solution whose cost is already known.
    pub const fn new(routes: Vec<VehicleRoute>, cost: f64) -> Self {
        Self {
            routes,
            cost: Some(cost),
        }
    }

    /// Construct a solution whose cost has not been computed.
    pub const fn unevaluated(routes: Vec<VehicleRoute>) -> Self {
        Self { routes, cost: None }
    }

    /// Deep copy of `solution`.
    pub fn copy_of(solution: &Self) -> Self {
        solution.clone()
    }

    /// Routes of the solution.
    pub fn routes(&self) -> &[VehicleRoute] {
        &self.routes
    }

    /// Mutable access for strategies rebuilding the solution.
    pub const fn routes_mut(&mut self) -> &mut Vec<VehicleRoute> {
        &mut self.routes
    }

    /// Aggregate cost, `None` until evaluated.
    pub const fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// Cost as a plain number, [`NO_COST_YET`] when unevaluated.
    pub fn reported_cost(&self) -> f64 {
        self.cost.unwrap_or(NO_COST_YET)
    }

    /// Commit an externally computed cost.
    pub const fn set_cost(&mut self, cost: f64) {
        self.cost = Some(cost);
    }

    /// Forget the cost after a mutation.
    pub const fn invalidate_cost(&mut self) {
        self.cost = None;
    }

    /// Whether any route serves the job with `job_id`.
    pub fn contains_job(&self, job_id: &str) -> bool {
        self.routes.iter().any(|route| route.contains_job(job_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::Driver;
    use crate::test_support::{job_at, vehicle_at};
    use rstest::{fixture, rstest};

    #[fixture]
    fn solution() -> Solution {
        let mut route = VehicleRoute::new(Arc::new(vehicle_at("v", 0.0)), Driver::no_driver(), 0.0);
        route.insert_job(0, Arc::new(job_at("a", 1.0))).expect("insert a");
        route.insert_job(1, Arc::new(job_at("b", 2.0))).expect("insert b");
        Solution::new(vec![route], 4.0)
    }

    #[rstest]
    fn copy_is_isolated_from_original(solution: Solution) {
        let mut copy = Solution::copy_of(&solution);
        copy.routes_mut()
            .first_mut()
            .map(|route| route.remove_job("a"))
            .expect("copy has a route");
        copy.routes_mut().push(VehicleRoute::empty());
        copy.set_cost(1.0);

        assert!(solution.contains_job("a"));
        assert_eq!(solution.routes().len(), 1);
        assert_eq!(solution.cost(), Some(4.0));
        assert!(!copy.contains_job("a"));
    }

    #[rstest]
    fn unevaluated_cost_reports_sentinel() {
        let solution = Solution::unevaluated(Vec::new());
        assert!((solution.reported_cost() - NO_COST_YET).abs() < f64::EPSILON);
    }

    #[rstest]
    fn invalidate_clears_cost(mut solution: Solution) {
        solution.invalidate_cost();
        assert_eq!(solution.cost(), None);
    }
}
