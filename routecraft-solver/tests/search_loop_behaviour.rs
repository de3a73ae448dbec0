//! Behavioural tests for the search loop lifecycle and listener contract.

use std::cell::RefCell;

use routecraft_core::Solution;
use routecraft_solver::test_support::{
    EventLog, ListenerEvent, RecordingListener, ScriptedStrategy, line_problem,
};
use routecraft_solver::{AlgorithmError, LoopState, SearchLoop, SearchStrategyManager};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct LoopWorld {
    manager: RefCell<SearchStrategyManager>,
    log: RefCell<Option<EventLog>>,
    iterations: RefCell<Option<usize>>,
    premature_break: RefCell<Option<usize>>,
    outcome: RefCell<Option<Result<Vec<Solution>, AlgorithmError>>>,
    state: RefCell<Option<LoopState>>,
}

impl LoopWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn register(&self, strategy: ScriptedStrategy, probability: f64) {
        self.manager
            .borrow_mut()
            .add_strategy(Box::new(strategy), probability)
            .expect("probability in range");
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn events(&self) -> Vec<ListenerEvent> {
        self.log
            .borrow()
            .as_ref()
            .map(|log| log.borrow().clone())
            .expect("listener registered")
    }

    fn count(&self, matches: impl Fn(&ListenerEvent) -> bool) -> usize {
        self.events().iter().filter(|event| matches(event)).count()
    }
}

#[fixture]
fn world() -> LoopWorld {
    LoopWorld::default()
}

#[given("a strategy drawn with probability 0.5")]
fn given_half_probability(world: &LoopWorld) {
    world.register(ScriptedStrategy::always("half", true), 0.5);
}

#[given("a strategy drawn with probability 1.0 that always improves")]
fn given_improving(world: &LoopWorld) {
    world.register(ScriptedStrategy::always("improve", true), 1.0);
}

#[given("a strategy drawn with probability 1.0 that never improves")]
fn given_idle(world: &LoopWorld) {
    world.register(ScriptedStrategy::always("idle", false), 1.0);
}

#[given("two strategies drawn with probabilities 0.3 and 0.7")]
fn given_two_strategies(world: &LoopWorld) {
    world.register(ScriptedStrategy::always("minor", true), 0.3);
    world.register(ScriptedStrategy::always("major", true), 0.7);
}

#[given("a recording listener")]
fn given_listener(world: &LoopWorld) {
    world.log.replace(Some(EventLog::default()));
}

#[given("an iteration budget of 4")]
fn given_budget_four(world: &LoopWorld) {
    world.iterations.replace(Some(4));
}

#[given("an iteration budget of 50")]
fn given_budget_fifty(world: &LoopWorld) {
    world.iterations.replace(Some(50));
}

#[given("a premature break after 1 idle iteration")]
fn given_premature_break(world: &LoopWorld) {
    world.premature_break.replace(Some(1));
}

#[when("the search is started")]
fn when_started(world: &LoopWorld) {
    let manager = world.manager.take();
    let mut search = SearchLoop::new(line_problem(&[1.0, 2.0]), manager);
    if let Some(iterations) = *world.iterations.borrow() {
        search.set_iterations(iterations);
    }
    search.set_premature_break(*world.premature_break.borrow());
    if let Some(log) = world.log.borrow().as_ref() {
        search.add_listener(RecordingListener::with_log("recorder", EventLog::clone(log)));
    }
    world.outcome.replace(Some(search.search_solutions()));
    world.state.replace(Some(search.state()));
}

#[then("the search fails with a probability error")]
fn then_probability_error(world: &LoopWorld) {
    assert!(matches!(
        *world.outcome.borrow(),
        Some(Err(AlgorithmError::ProbabilitySum { .. }))
    ));
}

#[then("no listener was notified")]
fn then_no_notifications(world: &LoopWorld) {
    assert!(world.events().is_empty());
}

#[then("the listener saw 1 start and 1 end")]
fn then_one_start_one_end(world: &LoopWorld) {
    assert_eq!(
        world.count(|event| matches!(event, ListenerEvent::AlgorithmStarts { .. })),
        1
    );
    assert_eq!(
        world.count(|event| matches!(event, ListenerEvent::AlgorithmEnds { .. })),
        1
    );
    assert!(matches!(
        world.events().first(),
        Some(ListenerEvent::AlgorithmStarts { .. })
    ));
    assert!(matches!(
        world.events().last(),
        Some(ListenerEvent::AlgorithmEnds { .. })
    ));
}

fn iteration_ends(world: &LoopWorld) -> usize {
    world.count(|event| matches!(event, ListenerEvent::IterationEnds { .. }))
}

#[then("the listener saw 4 iteration ends")]
fn then_four_ends(world: &LoopWorld) {
    assert_eq!(iteration_ends(world), 4);
}

#[then("the listener saw 1 iteration ends")]
fn then_one_end(world: &LoopWorld) {
    assert_eq!(iteration_ends(world), 1);
}

#[then("the search completed")]
fn then_completed(world: &LoopWorld) {
    assert_eq!(*world.state.borrow(), Some(LoopState::Completed));
}

#[then("the search broke early")]
fn then_broke_early(world: &LoopWorld) {
    assert_eq!(*world.state.borrow(), Some(LoopState::BrokenEarly));
}

#[then("both strategies were selected")]
fn then_both_selected(world: &LoopWorld) {
    let selected = |name: &str| {
        world.count(|event| {
            matches!(event, ListenerEvent::SelectedStrategy { strategy, .. } if strategy == name)
        })
    };
    let minor = selected("minor");
    let major = selected("major");
    assert!(minor > 0 && major > 0, "minor {minor}, major {major}");
    assert_eq!(minor + major, 50);
}

#[scenario(path = "tests/features/search_loop.feature", index = 0)]
fn invalid_probabilities(world: LoopWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/search_loop.feature", index = 1)]
fn full_run(world: LoopWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/search_loop.feature", index = 2)]
fn premature_break(world: LoopWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/search_loop.feature", index = 3)]
fn shared_draws(world: LoopWorld) {
    let _ = world;
}
