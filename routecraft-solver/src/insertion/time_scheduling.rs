//! Departure-time search around a base insertion calculator.
//!
//! When transport costs depend on the time of day, the departure implied by
//! the route's current schedule is not always the cheapest. The decorator
//! probes a few departures on either side of it, in fixed steps, and keeps
//! the cheapest result of the wrapped calculator.

use std::fmt;

use routecraft_core::{Driver, Job, Vehicle, VehicleRoute};

use super::{Insertion, JobInsertionCalculator};

/// Settings of [`TimeSchedulingInsertionCalculator`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeSchedulingConfig {
    /// Distance between neighbouring candidate departures.
    pub time_slice: f64,
    /// Number of candidates probed on each side of the current departure.
    pub departure_times: usize,
}

impl Default for TimeSchedulingConfig {
    fn default() -> Self {
        Self {
            time_slice: 900.0,
            departure_times: 3,
        }
    }
}

/// Candidate departures for `vehicle` around `current_start`, in probe
/// order.
///
/// `current_start` comes first. Then, for each offset `k` in
/// `1..=config.departure_times`, the earlier candidate
/// `current_start - k * time_slice` is listed if it lies strictly after the
/// vehicle's earliest departure, followed by the later candidate
/// `current_start + k * time_slice` if it lies strictly before the vehicle's
/// latest arrival.
///
/// # Examples
/// ```
/// use routecraft_core::Location;
/// use routecraft_core::Vehicle;
/// use routecraft_solver::{TimeSchedulingConfig, departure_times};
///
/// # fn main() -> Result<(), routecraft_core::VehicleError> {
/// let config = TimeSchedulingConfig { time_slice: 10.0, departure_times: 2 };
/// let vehicle = Vehicle::new("v", Location::new("depot")).with_operating_window(0.0, 1000.0)?;
/// assert_eq!(departure_times(50.0, &vehicle, &config), [50.0, 40.0, 60.0, 30.0, 70.0]);
///
/// let late = Vehicle::new("v", Location::new("depot")).with_operating_window(45.0, 1000.0)?;
/// assert_eq!(departure_times(50.0, &late, &config), [50.0, 60.0, 70.0]);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "candidate departures are offsets in floating-point time"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "offset counts are tiny compared with f64 precision"
)]
pub fn departure_times(
    current_start: f64,
    vehicle: &Vehicle,
    config: &TimeSchedulingConfig,
) -> Vec<f64> {
    let mut candidates = Vec::with_capacity(2 * config.departure_times + 1);
    candidates.push(current_start);
    for offset in 1..=config.departure_times {
        let shift = offset as f64 * config.time_slice;
        let earlier = current_start - shift;
        if earlier > vehicle.earliest_departure() {
            candidates.push(earlier);
        }
        let later = current_start + shift;
        if later < vehicle.latest_arrival() {
            candidates.push(later);
        }
    }
    candidates
}

/// Wraps a [`JobInsertionCalculator`] and searches alternative departure
/// times.
///
/// The wrapped calculator is invoked once per candidate from
/// [`departure_times`], with the job, vehicle, driver and best known cost
/// passed through unchanged. The first result is the initial best and a later
/// one replaces it only if strictly cheaper, so earlier candidates win ties.
/// The retained result carries the departure that produced it. When no
/// candidate is feasible, [`Insertion::NotFound`] is returned.
pub struct TimeSchedulingInsertionCalculator<C> {
    inner: C,
    config: TimeSchedulingConfig,
}

impl<C> TimeSchedulingInsertionCalculator<C> {
    /// Decorate `inner` with the default settings.
    pub fn new(inner: C) -> Self {
        Self::with_config(inner, TimeSchedulingConfig::default())
    }

    /// Decorate `inner` with explicit settings.
    pub fn with_config(inner: C, config: TimeSchedulingConfig) -> Self {
        let calculator = Self { inner, config };
        log::info!("initialise {calculator}");
        calculator
    }

    /// Active settings.
    pub const fn config(&self) -> &TimeSchedulingConfig {
        &self.config
    }

    /// The decorated calculator.
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C> fmt::Display for TimeSchedulingInsertionCalculator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[name=timeSchedulingInsertion][timeSlice={}][departureTimes={}]",
            self.config.time_slice, self.config.departure_times
        )
    }
}

impl<C: fmt::Debug> fmt::Debug for TimeSchedulingInsertionCalculator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSchedulingInsertionCalculator")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .finish()
    }
}

impl<C: JobInsertionCalculator> JobInsertionCalculator for TimeSchedulingInsertionCalculator<C> {
    fn calculate(
        &self,
        route: &VehicleRoute,
        job: &Job,
        vehicle: &Vehicle,
        departure_time: f64,
        driver: &Driver,
        best_known_cost: Option<f64>,
    ) -> Insertion {
        let current_start = route.start().map_or(departure_time, |start| start.end_time());
        let mut best: Option<Insertion> = None;
        for candidate in departure_times(current_start, vehicle, &self.config) {
            let insertion = self
                .inner
                .calculate(route, job, vehicle, candidate, driver, best_known_cost)
                .with_departure_time(candidate);
            if best
                .as_ref()
                .is_none_or(|current| insertion.is_better_than(current))
            {
                best = Some(insertion);
            }
        }
        best.unwrap_or(Insertion::NotFound)
    }
}
