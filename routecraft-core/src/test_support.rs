//! Test-only transport cost models and fixtures used by unit and behaviour
//! tests.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use geo::Coord;

use crate::{Driver, Job, Location, TransportCosts, Vehicle};

/// Straight-line costs between location coordinates.
///
/// Cost is the Euclidean distance scaled by the vehicle's distance rate;
/// travel time equals the distance. Locations without coordinates are treated
/// as coincident.
#[derive(Debug, Default, Clone, Copy)]
pub struct EuclideanCosts;

impl EuclideanCosts {
    #[expect(
        clippy::float_arithmetic,
        reason = "Euclidean distance is floating-point geometry"
    )]
    fn distance(from: &Location, to: &Location) -> f64 {
        match (from.coord(), to.coord()) {
            (Some(a), Some(b)) => (a.x - b.x).hypot(a.y - b.y),
            _ => {
                log::warn!(
                    "missing coordinate between {} and {}; treating leg as zero length",
                    from.id(),
                    to.id()
                );
                0.0
            }
        }
    }
}

impl TransportCosts for EuclideanCosts {
    #[expect(
        clippy::float_arithmetic,
        reason = "distance cost scales by the vehicle's rate"
    )]
    fn transport_cost(
        &self,
        from: &Location,
        to: &Location,
        _departure_time: f64,
        _driver: &Driver,
        vehicle: &Vehicle,
    ) -> f64 {
        Self::distance(from, to) * vehicle.cost_per_distance()
    }

    fn transport_time(
        &self,
        from: &Location,
        to: &Location,
        _departure_time: f64,
        _driver: &Driver,
        _vehicle: &Vehicle,
    ) -> f64 {
        Self::distance(from, to)
    }
}

/// Wraps a cost model and inflates legs that leave before a cut-off time.
///
/// Models a congestion window: both cost and travel time of any leg departing
/// strictly before `rush_hour_end` are multiplied by `factor`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routecraft_core::test_support::{EuclideanCosts, TimeDependentCosts};
/// use routecraft_core::{Driver, Location, TransportCosts, Vehicle};
///
/// let costs = TimeDependentCosts::new(EuclideanCosts, 50.0, 2.0);
/// let a = Location::new("a").with_coord(Coord { x: 0.0, y: 0.0 });
/// let b = Location::new("b").with_coord(Coord { x: 0.0, y: 20.0 });
/// let vehicle = Vehicle::new("v", a.clone());
/// let driver = Driver::no_driver();
/// assert_eq!(costs.transport_cost(&a, &b, 0.0, &driver, &vehicle), 40.0);
/// assert_eq!(costs.transport_cost(&a, &b, 50.0, &driver, &vehicle), 20.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeDependentCosts<C> {
    inner: C,
    rush_hour_end: f64,
    factor: f64,
}

impl<C> TimeDependentCosts<C> {
    /// Inflate `inner` by `factor` for departures before `rush_hour_end`.
    pub const fn new(inner: C, rush_hour_end: f64, factor: f64) -> Self {
        Self {
            inner,
            rush_hour_end,
            factor,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "congestion scales a floating-point value"
    )]
    fn scale(&self, value: f64, departure_time: f64) -> f64 {
        if departure_time < self.rush_hour_end {
            value * self.factor
        } else {
            value
        }
    }
}

impl<C: TransportCosts> TransportCosts for TimeDependentCosts<C> {
    fn transport_cost(
        &self,
        from: &Location,
        to: &Location,
        departure_time: f64,
        driver: &Driver,
        vehicle: &Vehicle,
    ) -> f64 {
        let base = self
            .inner
            .transport_cost(from, to, departure_time, driver, vehicle);
        self.scale(base, departure_time)
    }

    fn transport_time(
        &self,
        from: &Location,
        to: &Location,
        departure_time: f64,
        driver: &Driver,
        vehicle: &Vehicle,
    ) -> f64 {
        let base = self
            .inner
            .transport_time(from, to, departure_time, driver, vehicle);
        self.scale(base, departure_time)
    }
}

/// A location on the x axis, named after `id`.
#[must_use]
pub fn point(id: &str, x: f64) -> Location {
    Location::new(id).with_coord(Coord { x, y: 0.0 })
}

/// A job with no demand or time restriction at `(x, 0)`.
#[must_use]
pub fn job_at(id: &str, x: f64) -> Job {
    Job::new(id, point(id, x))
}

/// A vehicle based at `(x, 0)` with default bounds.
#[must_use]
pub fn vehicle_at(id: &str, x: f64) -> Vehicle {
    Vehicle::new(id, point(&format!("{id}-depot"), x))
}
