//! Deterministic problem generation for the insertion benchmarks.

use std::sync::Arc;

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use routecraft_core::test_support::{EuclideanCosts, TimeDependentCosts};
use routecraft_core::{
    Driver, Job, Location, ProblemError, Vehicle, VehicleRoute, VehicleRoutingProblem,
};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Side of the square customers are scattered over.
const AREA_SIZE: f64 = 100.0;

/// End of the congestion window applied to every leg.
const RUSH_HOUR_END: f64 = 120.0;

/// Congestion multiplier before [`RUSH_HOUR_END`].
const RUSH_HOUR_FACTOR: f64 = 1.5;

/// Scatter `count` customers uniformly and serve them from the centre.
///
/// # Errors
/// Propagates [`ProblemError`] from the problem builder.
pub fn scattered_problem(count: usize, seed: u64) -> Result<VehicleRoutingProblem, ProblemError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let jobs = (0..count).map(|index| {
        let coord = Coord {
            x: rng.gen_range(0.0..AREA_SIZE),
            y: rng.gen_range(0.0..AREA_SIZE),
        };
        let id = format!("c{index}");
        Job::new(id.clone(), Location::new(id).with_coord(coord))
    });
    #[expect(clippy::float_arithmetic, reason = "depot sits at the area centre")]
    let centre = Coord {
        x: AREA_SIZE / 2.0,
        y: AREA_SIZE / 2.0,
    };
    VehicleRoutingProblem::builder()
        .add_vehicle(Vehicle::new("v", Location::new("depot").with_coord(centre)))
        .add_jobs(jobs.collect::<Vec<_>>())
        .transport_costs(Arc::new(TimeDependentCosts::new(
            EuclideanCosts,
            RUSH_HOUR_END,
            RUSH_HOUR_FACTOR,
        )))
        .build()
}

/// A route through every job but the last, in generation order.
///
/// Returns the route and the held-back job.
pub fn route_missing_one(problem: &VehicleRoutingProblem) -> Option<(VehicleRoute, Arc<Job>)> {
    let vehicle = problem.vehicles().first().cloned()?;
    let (last, rest) = problem.jobs().split_last()?;
    let mut route = VehicleRoute::new(vehicle, Driver::no_driver(), 0.0);
    for (position, job) in rest.iter().enumerate() {
        route.insert_job(position, Arc::clone(job)).ok()?;
    }
    route.update_schedule(problem.transport_costs());
    Some((route, Arc::clone(last)))
}
