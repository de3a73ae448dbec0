//! Reinsertion of unassigned jobs.

use std::sync::Arc;

use rand::RngCore;
use rand::seq::SliceRandom;
use routecraft_core::{Driver, FleetSize, Job, Solution, Vehicle, VehicleRoute, VehicleRoutingProblem};

use crate::insertion::{Insertion, InsertionData, JobInsertionCalculator};

/// Inserts jobs into a solution.
pub trait Recreate {
    /// Insert `jobs` into `solution`, returning the jobs that did not fit.
    fn recreate(
        &self,
        problem: &VehicleRoutingProblem,
        solution: &mut Solution,
        jobs: Vec<Arc<Job>>,
        rng: &mut dyn RngCore,
    ) -> Vec<Arc<Job>>;
}

/// Inserts each job, in random order, at its cheapest place.
///
/// Every existing route is priced, followed by a fresh route for every
/// vehicle that is still idle (every vehicle when the fleet is infinite).
/// The winning insertion is applied with the departure time it was priced
/// at. Jobs without a feasible insertion are returned.
#[derive(Debug, Clone)]
pub struct BestInsertion<C> {
    calculator: C,
}

enum Target {
    Existing(usize),
    Fresh(Arc<Vehicle>),
}

impl<C: JobInsertionCalculator> BestInsertion<C> {
    /// Price insertions with `calculator`.
    pub const fn new(calculator: C) -> Self {
        Self { calculator }
    }

    /// The insertion calculator in use.
    pub const fn calculator(&self) -> &C {
        &self.calculator
    }

    fn idle_vehicles<'a>(
        problem: &'a VehicleRoutingProblem,
        solution: &Solution,
    ) -> impl Iterator<Item = &'a Arc<Vehicle>> {
        let infinite = problem.fleet_size() == FleetSize::Infinite;
        let in_use: Vec<String> = solution
            .routes()
            .iter()
            .filter_map(|route| route.vehicle().map(|vehicle| vehicle.id().to_owned()))
            .collect();
        problem
            .vehicles()
            .iter()
            .filter(move |vehicle| infinite || !in_use.iter().any(|id| id == vehicle.id()))
    }

    fn best_target(
        &self,
        problem: &VehicleRoutingProblem,
        solution: &Solution,
        job: &Job,
    ) -> Option<(Target, InsertionData)> {
        let mut best: Option<(Target, InsertionData)> = None;
        let bound = |best: &Option<(Target, InsertionData)>| {
            best.as_ref().map(|(_, data)| data.cost())
        };

        for (index, route) in solution.routes().iter().enumerate() {
            let Some(vehicle) = route.vehicle() else {
                continue;
            };
            let departure = route
                .start()
                .map_or(vehicle.earliest_departure(), |start| start.end_time());
            let insertion = self.calculator.calculate(
                route,
                job,
                vehicle,
                departure,
                route.driver(),
                bound(&best),
            );
            if let Insertion::Feasible(data) = insertion
                && bound(&best).is_none_or(|cost| data.cost() < cost)
            {
                best = Some((Target::Existing(index), data));
            }
        }

        let empty = VehicleRoute::empty();
        let driver = Driver::no_driver();
        for vehicle in Self::idle_vehicles(problem, solution) {
            let insertion = self.calculator.calculate(
                &empty,
                job,
                vehicle,
                vehicle.earliest_departure(),
                &driver,
                bound(&best),
            );
            if let Insertion::Feasible(data) = insertion
                && bound(&best).is_none_or(|cost| data.cost() < cost)
            {
                best = Some((Target::Fresh(Arc::clone(vehicle)), data));
            }
        }
        best
    }
}

impl<C: JobInsertionCalculator> Recreate for BestInsertion<C> {
    fn recreate(
        &self,
        problem: &VehicleRoutingProblem,
        solution: &mut Solution,
        mut jobs: Vec<Arc<Job>>,
        rng: &mut dyn RngCore,
    ) -> Vec<Arc<Job>> {
        jobs.shuffle(rng);
        let costs = problem.transport_costs();
        let mut unassigned = Vec::new();
        for job in jobs {
            let Some((target, data)) = self.best_target(problem, solution, &job) else {
                log::debug!("no feasible insertion for job {}", job.id());
                unassigned.push(job);
                continue;
            };
            let routes = solution.routes_mut();
            let route = match target {
                Target::Existing(index) => routes.get_mut(index),
                Target::Fresh(vehicle) => {
                    routes.push(VehicleRoute::new(
                        vehicle,
                        Driver::no_driver(),
                        data.departure_time(),
                    ));
                    routes.last_mut()
                }
            };
            let Some(route) = route else {
                unassigned.push(job);
                continue;
            };
            route.set_departure_time(data.departure_time());
            if let Err(err) = route.insert_job(data.position(), Arc::clone(&job)) {
                log::warn!("discarding insertion of job {}: {err}", job.id());
                unassigned.push(job);
                continue;
            }
            route.update_schedule(costs);
            log::debug!(
                "inserted job {} at position {} departing {} for {}",
                job.id(),
                data.position(),
                data.departure_time(),
                data.cost()
            );
        }
        solution.routes_mut().retain(|route| !route.is_empty());
        solution.invalidate_cost();
        unassigned
    }
}
