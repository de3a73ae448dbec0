//! Vehicle routes: a start, ordered service activities and an end.
//!
//! Routes are mutated only through [`VehicleRoute::insert_job`],
//! [`VehicleRoute::remove_job`] and the scheduling setters. Activity times are
//! stale after a mutation until [`VehicleRoute::update_schedule`] runs.

use std::sync::Arc;

use thiserror::Error;

use crate::{Driver, Job, Location, TourSchedule, TransportCosts, Vehicle, schedule_tour};

/// Errors returned by route mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The insertion index lies past the end of the tour.
    #[error("position {position} is out of bounds for a tour of {len} activities")]
    PositionOutOfBounds {
        /// Requested index.
        position: usize,
        /// Number of activities on the tour.
        len: usize,
    },
    /// The job is already served by this route.
    #[error("job {0} is already on the route")]
    DuplicateJob(String),
}

/// Departure of the vehicle from its start location.
#[derive(Debug, Clone, PartialEq)]
pub struct Start {
    location: Location,
    end_time: f64,
}

impl Start {
    /// Where the vehicle leaves from.
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// When the vehicle leaves.
    pub const fn end_time(&self) -> f64 {
        self.end_time
    }
}

/// Arrival of the vehicle at its end location.
#[derive(Debug, Clone, PartialEq)]
pub struct End {
    location: Location,
    arrival_time: f64,
}

impl End {
    /// Where the vehicle finishes.
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// When the vehicle gets there.
    pub const fn arrival_time(&self) -> f64 {
        self.arrival_time
    }
}

/// Service of one job on the route.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceActivity {
    job: Arc<Job>,
    arrival_time: f64,
    end_time: f64,
}

impl ServiceActivity {
    /// The job served.
    pub fn job(&self) -> &Job {
        &self.job
    }

    /// When the vehicle reaches the job.
    pub const fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// When service completes.
    pub const fn end_time(&self) -> f64 {
        self.end_time
    }
}

/// An ordered sequence of activities driven by one vehicle.
///
/// An empty route has no vehicle, no start and no end. Cloning a route
/// duplicates every activity; jobs and vehicles are immutable and shared.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use routecraft_core::{Driver, Job, Location, Vehicle, VehicleRoute};
///
/// # fn main() -> Result<(), routecraft_core::RouteError> {
/// let vehicle = Arc::new(Vehicle::new("v", Location::new("depot")));
/// let mut route = VehicleRoute::new(vehicle, Driver::no_driver(), 8.0);
/// route.insert_job(0, Arc::new(Job::new("j", Location::new("c"))))?;
/// assert!(route.contains_job("j"));
/// assert_eq!(route.start().map(|start| start.end_time()), Some(8.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehicleRoute {
    vehicle: Option<Arc<Vehicle>>,
    driver: Driver,
    start: Option<Start>,
    activities: Vec<ServiceActivity>,
    end: Option<End>,
}

impl VehicleRoute {
    /// A route with no vehicle assigned and no activities.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A route for `vehicle` that leaves at `departure_time` and has no jobs.
    pub fn new(vehicle: Arc<Vehicle>, driver: Driver, departure_time: f64) -> Self {
        let start = Start {
            location: vehicle.start_location().clone(),
            end_time: departure_time,
        };
        let end = End {
            location: vehicle.end_location().clone(),
            arrival_time: departure_time,
        };
        Self {
            vehicle: Some(vehicle),
            driver,
            start: Some(start),
            activities: Vec::new(),
            end: Some(end),
        }
    }

    /// The assigned vehicle.
    pub const fn vehicle(&self) -> Option<&Arc<Vehicle>> {
        self.vehicle.as_ref()
    }

    /// The assigned driver.
    pub const fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Start activity, absent for an empty route.
    pub const fn start(&self) -> Option<&Start> {
        self.start.as_ref()
    }

    /// End activity, absent for an empty route.
    pub const fn end(&self) -> Option<&End> {
        self.end.as_ref()
    }

    /// Service activities in tour order.
    pub fn activities(&self) -> &[ServiceActivity] {
        &self.activities
    }

    /// Jobs in tour order.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.activities.iter().map(ServiceActivity::job)
    }

    /// Whether the job with `job_id` is served by this route.
    pub fn contains_job(&self, job_id: &str) -> bool {
        self.jobs().any(|job| job.id() == job_id)
    }

    /// Whether the route serves no job.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Summed demand of every job on the route.
    pub fn load(&self) -> u64 {
        self.jobs().map(|job| u64::from(job.demand())).sum()
    }

    /// Move the departure from the start location. No-op on an empty route.
    pub fn set_departure_time(&mut self, departure_time: f64) {
        if let Some(start) = self.start.as_mut() {
            start.end_time = departure_time;
        }
    }

    /// Insert `job` before the activity currently at `position`.
    ///
    /// `position == activities().len()` appends. Activity times of the new
    /// service are provisional until [`Self::update_schedule`] runs.
    ///
    /// # Errors
    /// Returns [`RouteError`] when `position` is past the end of the tour or
    /// the job is already on the route.
    pub fn insert_job(&mut self, position: usize, job: Arc<Job>) -> Result<(), RouteError> {
        let len = self.activities.len();
        if position > len {
            return Err(RouteError::PositionOutOfBounds { position, len });
        }
        if self.contains_job(job.id()) {
            return Err(RouteError::DuplicateJob(job.id().to_owned()));
        }
        let provisional = self.start.as_ref().map_or(0.0, Start::end_time);
        self.activities.insert(
            position,
            ServiceActivity {
                job,
                arrival_time: provisional,
                end_time: provisional,
            },
        );
        Ok(())
    }

    /// Remove the job with `job_id`, returning it if it was on the route.
    pub fn remove_job(&mut self, job_id: &str) -> Option<Arc<Job>> {
        let index = self
            .activities
            .iter()
            .position(|activity| activity.job.id() == job_id)?;
        Some(self.activities.remove(index).job)
    }

    /// Simulate the route as it stands, if it has a vehicle.
    pub fn schedule(&self, costs: &dyn TransportCosts) -> Option<TourSchedule> {
        let vehicle = self.vehicle.as_deref()?;
        let start = self.start.as_ref()?;
        Some(schedule_tour(
            costs,
            vehicle,
            &self.driver,
            start.end_time,
            self.jobs(),
        ))
    }

    /// Recompute arrival and end times from the current departure time.
    pub fn update_schedule(&mut self, costs: &dyn TransportCosts) {
        let Some(schedule) = self.schedule(costs) else {
            return;
        };
        for (activity, visit) in self.activities.iter_mut().zip(schedule.visits()) {
            activity.arrival_time = visit.arrival_time;
            activity.end_time = visit.end_time;
        }
        if let Some(end) = self.end.as_mut() {
            end.arrival_time = schedule.end_arrival();
        }
    }

    /// Transport cost of the route plus the vehicle's fixed cost.
    ///
    /// A route serving no job costs nothing.
    #[expect(
        clippy::float_arithmetic,
        reason = "route cost sums floating-point transport and fixed costs"
    )]
    pub fn cost(&self, costs: &dyn TransportCosts) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let fixed = self.vehicle.as_deref().map_or(0.0, Vehicle::fixed_cost);
        self.schedule(costs)
            .map_or(0.0, |schedule| schedule.transport_cost() + fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EuclideanCosts, job_at, vehicle_at};
    use rstest::{fixture, rstest};

    #[fixture]
    fn route() -> VehicleRoute {
        VehicleRoute::new(Arc::new(vehicle_at("v", 0.0)), Driver::no_driver(), 0.0)
    }

    #[rstest]
    fn empty_route_has_no_start() {
        let route = VehicleRoute::empty();
        assert!(route.start().is_none());
        assert!(route.vehicle().is_none());
        assert!(route.is_empty());
    }

    #[rstest]
    fn insert_preserves_order(mut route: VehicleRoute) {
        route.insert_job(0, Arc::new(job_at("b", 2.0))).expect("insert b");
        route.insert_job(0, Arc::new(job_at("a", 1.0))).expect("insert a");
        let ids: Vec<&str> = route.jobs().map(Job::id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[rstest]
    fn insert_rejects_out_of_bounds(mut route: VehicleRoute) {
        let err = route
            .insert_job(1, Arc::new(job_at("a", 1.0)))
            .expect_err("position past end");
        assert_eq!(err, RouteError::PositionOutOfBounds { position: 1, len: 0 });
    }

    #[rstest]
    fn insert_rejects_duplicates(mut route: VehicleRoute) {
        let job = Arc::new(job_at("a", 1.0));
        route.insert_job(0, Arc::clone(&job)).expect("first insert");
        let err = route.insert_job(1, job).expect_err("duplicate");
        assert_eq!(err, RouteError::DuplicateJob("a".into()));
    }

    #[rstest]
    fn remove_returns_job(mut route: VehicleRoute) {
        route.insert_job(0, Arc::new(job_at("a", 1.0))).expect("insert");
        assert!(route.remove_job("a").is_some());
        assert!(route.remove_job("a").is_none());
        assert!(route.is_empty());
    }

    #[rstest]
    fn update_schedule_sets_activity_times(mut route: VehicleRoute) {
        route.insert_job(0, Arc::new(job_at("a", 3.0))).expect("insert");
        route.set_departure_time(10.0);
        route.update_schedule(&EuclideanCosts);
        let activity = &route.activities()[0];
        assert!((activity.arrival_time() - 13.0).abs() < 1e-9);
        let end = route.end().expect("route has an end");
        assert!((end.arrival_time() - 16.0).abs() < 1e-9);
    }

    #[rstest]
    fn cost_includes_fixed_cost() {
        let vehicle = Arc::new(vehicle_at("v", 0.0).with_fixed_cost(100.0));
        let mut route = VehicleRoute::new(vehicle, Driver::no_driver(), 0.0);
        assert!(route.cost(&EuclideanCosts).abs() < 1e-9);
        route.insert_job(0, Arc::new(job_at("a", 5.0))).expect("insert");
        assert!((route.cost(&EuclideanCosts) - 110.0).abs() < 1e-9);
    }

    #[rstest]
    fn clone_is_independent(mut route: VehicleRoute) {
        route.insert_job(0, Arc::new(job_at("a", 1.0))).expect("insert");
        let mut copy = route.clone();
        copy.remove_job("a");
        copy.set_departure_time(99.0);
        assert!(route.contains_job("a"));
        assert_eq!(route.start().map(Start::end_time), Some(0.0));
    }
}
