//! Forward simulation of a vehicle tour.
//!
//! Given a departure time and an ordered sequence of jobs, [`schedule_tour`]
//! walks the tour leg by leg, asking the [`TransportCosts`] for the cost and
//! duration of each leg at the moment the vehicle actually leaves. Service
//! starts at `max(arrival, window start)`; a tour is infeasible when it
//! misses a window, overloads the vehicle, leaves too early or returns too
//! late.

use thiserror::Error;

use crate::{Driver, Job, TransportCosts, Vehicle};

/// Why a simulated tour cannot be driven.
///
/// This is data for insertion evaluators rather than a failure: an
/// infeasible candidate is simply discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleViolation {
    /// The tour leaves before the vehicle is available.
    #[error("departure {departure} precedes earliest departure {earliest}")]
    DepartureTooEarly {
        /// Requested departure.
        departure: f64,
        /// Vehicle bound.
        earliest: f64,
    },
    /// The summed demand exceeds the vehicle capacity.
    #[error("load {load} exceeds capacity {capacity}")]
    CapacityExceeded {
        /// Total demand on the tour.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// The vehicle reaches a job after its window closed.
    #[error("job {job_id} reached at {arrival}, window closed at {latest}")]
    TimeWindowMissed {
        /// Job whose window was missed.
        job_id: String,
        /// Arrival at the job.
        arrival: f64,
        /// Window end.
        latest: f64,
    },
    /// The vehicle returns after its latest arrival.
    #[error("return at {arrival} exceeds latest arrival {latest}")]
    LatestArrivalExceeded {
        /// Arrival at the end location.
        arrival: f64,
        /// Vehicle bound.
        latest: f64,
    },
}

/// Timing of one service activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledVisit {
    /// When the vehicle reaches the job location.
    pub arrival_time: f64,
    /// When service finishes and the vehicle may leave.
    pub end_time: f64,
}

/// Outcome of [`schedule_tour`].
#[derive(Debug, Clone, PartialEq)]
pub struct TourSchedule {
    visits: Vec<ScheduledVisit>,
    end_arrival: f64,
    transport_cost: f64,
    load: u64,
    violation: Option<ScheduleViolation>,
}

impl TourSchedule {
    /// Per-job timings in tour order.
    pub fn visits(&self) -> &[ScheduledVisit] {
        &self.visits
    }

    /// Arrival at the vehicle's end location.
    pub const fn end_arrival(&self) -> f64 {
        self.end_arrival
    }

    /// Sum of leg costs, including the return leg.
    pub const fn transport_cost(&self) -> f64 {
        self.transport_cost
    }

    /// Summed demand of every job on the tour.
    pub const fn load(&self) -> u64 {
        self.load
    }

    /// The first constraint the tour breaks, if any.
    pub const fn violation(&self) -> Option<&ScheduleViolation> {
        self.violation.as_ref()
    }

    /// Whether the tour respects every hard constraint.
    pub const fn is_feasible(&self) -> bool {
        self.violation.is_none()
    }

    fn record(&mut self, violation: ScheduleViolation) {
        if self.violation.is_none() {
            self.violation = Some(violation);
        }
    }
}

/// Simulate `jobs` in order for `vehicle`, leaving its start at
/// `departure_time`.
///
/// # Examples
/// ```
/// use routecraft_core::{schedule_tour, Driver, Job, Location, TransportCosts, Vehicle};
///
/// struct Unit;
///
/// impl TransportCosts for Unit {
///     fn transport_cost(&self, from: &Location, to: &Location, _: f64, _: &Driver, _: &Vehicle) -> f64 {
///         if from == to { 0.0 } else { 1.0 }
///     }
///     fn transport_time(&self, from: &Location, to: &Location, t: f64, d: &Driver, v: &Vehicle) -> f64 {
///         self.transport_cost(from, to, t, d, v)
///     }
/// }
///
/// let vehicle = Vehicle::new("v", Location::new("depot"));
/// let job = Job::new("j", Location::new("customer")).with_service_duration(3.0);
/// let schedule = schedule_tour(&Unit, &vehicle, &Driver::no_driver(), 10.0, [&job]);
/// assert!(schedule.is_feasible());
/// assert_eq!(schedule.visits()[0].end_time, 14.0);
/// assert_eq!(schedule.end_arrival(), 15.0);
/// assert_eq!(schedule.transport_cost(), 2.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "schedules accumulate floating-point times and costs"
)]
pub fn schedule_tour<'a, I>(
    costs: &dyn TransportCosts,
    vehicle: &Vehicle,
    driver: &Driver,
    departure_time: f64,
    jobs: I,
) -> TourSchedule
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut schedule = TourSchedule {
        visits: Vec::new(),
        end_arrival: departure_time,
        transport_cost: 0.0,
        load: 0,
        violation: None,
    };
    if departure_time < vehicle.earliest_departure() {
        schedule.record(ScheduleViolation::DepartureTooEarly {
            departure: departure_time,
            earliest: vehicle.earliest_departure(),
        });
    }

    let mut previous = vehicle.start_location();
    let mut clock = departure_time;
    for job in jobs {
        let leg_cost = costs.transport_cost(previous, job.location(), clock, driver, vehicle);
        let arrival = clock + costs.transport_time(previous, job.location(), clock, driver, vehicle);
        schedule.transport_cost += leg_cost;

        let window = job.time_window();
        if arrival > window.end() {
            schedule.record(ScheduleViolation::TimeWindowMissed {
                job_id: job.id().to_owned(),
                arrival,
                latest: window.end(),
            });
        }
        let end_time = arrival.max(window.start()) + job.service_duration();
        schedule.load += u64::from(job.demand());
        schedule.visits.push(ScheduledVisit {
            arrival_time: arrival,
            end_time,
        });
        previous = job.location();
        clock = end_time;
    }

    if schedule.load > u64::from(vehicle.capacity()) {
        schedule.record(ScheduleViolation::CapacityExceeded {
            load: schedule.load,
            capacity: vehicle.capacity(),
        });
    }

    let end = vehicle.end_location();
    schedule.transport_cost += costs.transport_cost(previous, end, clock, driver, vehicle);
    schedule.end_arrival = clock + costs.transport_time(previous, end, clock, driver, vehicle);
    if schedule.end_arrival > vehicle.latest_arrival() {
        schedule.record(ScheduleViolation::LatestArrivalExceeded {
            arrival: schedule.end_arrival,
            latest: vehicle.latest_arrival(),
        });
    }
    schedule
}
