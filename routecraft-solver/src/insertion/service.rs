//! Exhaustive position search for a single service job.

use std::fmt;
use std::iter;
use std::sync::Arc;

use routecraft_core::{Driver, Job, TransportCosts, Vehicle, VehicleRoute, schedule_tour};

use super::{Insertion, InsertionData, JobInsertionCalculator};

/// Tries every position of the route at a fixed departure time.
///
/// The marginal cost is the cost of the resulting tour, fixed cost included,
/// minus the current cost of the route. Tours breaking a hard constraint are
/// skipped. The cheapest position wins; earlier positions win ties.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use routecraft_core::test_support::{EuclideanCosts, job_at, vehicle_at};
/// use routecraft_core::{Driver, VehicleRoute};
/// use routecraft_solver::{JobInsertionCalculator, ServiceInsertionCalculator};
///
/// let calculator = ServiceInsertionCalculator::new(Arc::new(EuclideanCosts));
/// let vehicle = vehicle_at("v", 0.0);
/// let insertion = calculator.calculate(
///     &VehicleRoute::empty(),
///     &job_at("j", 5.0),
///     &vehicle,
///     0.0,
///     &Driver::no_driver(),
///     None,
/// );
/// assert_eq!(insertion.cost(), 10.0);
/// ```
#[derive(Clone)]
pub struct ServiceInsertionCalculator {
    costs: Arc<dyn TransportCosts>,
}

impl ServiceInsertionCalculator {
    /// Price insertions with `costs`.
    pub fn new(costs: Arc<dyn TransportCosts>) -> Self {
        Self { costs }
    }
}

impl fmt::Debug for ServiceInsertionCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInsertionCalculator")
            .finish_non_exhaustive()
    }
}

impl JobInsertionCalculator for ServiceInsertionCalculator {
    #[expect(
        clippy::float_arithmetic,
        reason = "marginal cost is a floating-point difference"
    )]
    fn calculate(
        &self,
        route: &VehicleRoute,
        job: &Job,
        vehicle: &Vehicle,
        departure_time: f64,
        driver: &Driver,
        best_known_cost: Option<f64>,
    ) -> Insertion {
        let costs = self.costs.as_ref();
        let current_cost = route.cost(costs);
        let tour: Vec<&Job> = route.jobs().collect();

        let mut best = Insertion::NotFound;
        for position in 0..=tour.len() {
            let candidate = tour
                .iter()
                .copied()
                .take(position)
                .chain(iter::once(job))
                .chain(tour.iter().copied().skip(position));
            let schedule = schedule_tour(costs, vehicle, driver, departure_time, candidate);
            if !schedule.is_feasible() {
                continue;
            }
            let cost = schedule.transport_cost() + vehicle.fixed_cost() - current_cost;
            if best_known_cost.is_some_and(|bound| cost >= bound) {
                continue;
            }
            let insertion = Insertion::Feasible(InsertionData::new(cost, position, departure_time));
            if insertion.is_better_than(&best) {
                best = insertion;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routecraft_core::TimeWindow;
    use routecraft_core::test_support::{EuclideanCosts, job_at, vehicle_at};
    use rstest::{fixture, rstest};

    #[fixture]
    fn calculator() -> ServiceInsertionCalculator {
        ServiceInsertionCalculator::new(Arc::new(EuclideanCosts))
    }

    fn route_with(vehicle: &Arc<Vehicle>, jobs: &[Job]) -> VehicleRoute {
        let mut route = VehicleRoute::new(Arc::clone(vehicle), Driver::no_driver(), 0.0);
        for (index, job) in jobs.iter().enumerate() {
            route
                .insert_job(index, Arc::new(job.clone()))
                .expect("distinct jobs");
        }
        route.update_schedule(&EuclideanCosts);
        route
    }

    #[rstest]
    fn empty_route_pays_out_and_back(calculator: ServiceInsertionCalculator) {
        let vehicle = vehicle_at("v", 0.0).with_fixed_cost(3.0);
        let insertion = calculator.calculate(
            &VehicleRoute::empty(),
            &job_at("j", 4.0),
            &vehicle,
            0.0,
            &Driver::no_driver(),
            None,
        );
        let data = insertion.data().expect("feasible");
        assert!((data.cost() - 11.0).abs() < 1e-9);
        assert_eq!(data.position(), 0);
    }

    #[rstest]
    fn picks_position_between_neighbours(calculator: ServiceInsertionCalculator) {
        let vehicle = Arc::new(vehicle_at("v", 0.0));
        let route = route_with(&vehicle, &[job_at("a", 2.0), job_at("c", 6.0)]);
        let insertion = calculator.calculate(
            &route,
            &job_at("b", 4.0),
            &vehicle,
            0.0,
            &Driver::no_driver(),
            None,
        );
        let data = insertion.data().expect("feasible");
        assert_eq!(data.position(), 1);
        assert!(data.cost().abs() < 1e-9);
    }

    #[rstest]
    fn respects_best_known_cost(calculator: ServiceInsertionCalculator) {
        let vehicle = vehicle_at("v", 0.0);
        let insertion = calculator.calculate(
            &VehicleRoute::empty(),
            &job_at("j", 4.0),
            &vehicle,
            0.0,
            &Driver::no_driver(),
            Some(8.0),
        );
        assert_eq!(insertion, Insertion::NotFound);
    }

    #[rstest]
    fn unreachable_window_is_not_found(calculator: ServiceInsertionCalculator) {
        let vehicle = vehicle_at("v", 0.0);
        let window = TimeWindow::new(0.0, 1.0).expect("valid window");
        let job = job_at("far", 10.0).with_time_window(window);
        let insertion = calculator.calculate(
            &VehicleRoute::empty(),
            &job,
            &vehicle,
            0.0,
            &Driver::no_driver(),
            None,
        );
        assert!(!insertion.is_feasible());
    }

    #[rstest]
    fn capacity_is_enforced(calculator: ServiceInsertionCalculator) {
        let vehicle = Arc::new(vehicle_at("v", 0.0).with_capacity(2));
        let route = route_with(&vehicle, &[job_at("a", 1.0).with_demand(2)]);
        let insertion = calculator.calculate(
            &route,
            &job_at("b", 2.0).with_demand(1),
            &vehicle,
            0.0,
            &Driver::no_driver(),
            None,
        );
        assert_eq!(insertion, Insertion::NotFound);
    }
}
