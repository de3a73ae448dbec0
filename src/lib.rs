//! Facade crate for the routecraft vehicle routing toolkit.
//!
//! This crate re-exports the problem model from `routecraft-core` and the
//! search machinery from `routecraft-solver` so applications depend on one
//! crate.

#![forbid(unsafe_code)]

pub use routecraft_core::{
    Driver, End, FleetSize, Job, Location, NO_COST_YET, ProblemBuilder, ProblemError,
    RouteError, ScheduleViolation, ScheduledVisit, ServiceActivity, Solution, Start,
    TimeWindow, TimeWindowError, TourSchedule, TransportCosts, Vehicle, VehicleError,
    VehicleRoute, VehicleRoutingProblem, schedule_tour,
};

pub use routecraft_solver::{
    AlgorithmError, AlgorithmListener, AlgorithmListeners, BestInsertion,
    DEFAULT_UNASSIGNED_JOB_COST, GreedyAcceptance, Insertion, InsertionData, IterationCounter,
    JobInsertionCalculator, LoopState, RandomRuin, Recreate, Ruin, RuinAndRecreate, SearchLoop,
    SearchLoopConfig, SearchStrategy, SearchStrategyManager, SelectBest, SelectRandomly,
    ServiceInsertionCalculator, SolutionAcceptor, SolutionPool, SolutionSelector, StrategyError,
    TimeSchedulingConfig, TimeSchedulingInsertionCalculator, best_solution, departure_times,
    solution_cost,
};
