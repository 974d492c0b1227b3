use std::cell::Cell;

use blastopt::prelude::*;

use crate::sphere_problem;

#[test]
fn uninitialized_engine_refuses_to_run() {
    let mut engine = Fireworks::new();
    assert_eq!(engine.state(), RunState::Uninitialized);
    assert_eq!(engine.minimize(&sphere_problem(2)), Err(Error::ParametersNotSet));
    assert_eq!(engine.state(), RunState::Uninitialized);
    assert!(engine.solution().is_none());
}

#[test]
fn parameters_move_engine_to_ready() {
    let mut engine = Gem::default();
    engine.initialize_parameters(GemParams::default()).unwrap();
    assert_eq!(engine.state(), RunState::ParametersSet);
    assert_eq!(engine.params(), Some(&GemParams::default()));
}

#[test]
fn progress_reports_every_iteration_of_bbbc() {
    let params = BbbcParams::builder().max_iterations(6).seed(1).build().unwrap();
    let mut engine = Bbbc::with_params(params).unwrap();
    let mut seen = Vec::new();
    engine
        .minimize_with(
            &sphere_problem(2),
            &mut RunControl::new().progress(|start, end, current| {
                assert_eq!((start, end), (1, 6));
                seen.push(current);
            }),
        )
        .unwrap();
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn progress_for_gem_starts_at_zero() {
    let params = GemParams::builder().max_iterations(4).seed(1).build().unwrap();
    let mut engine = Gem::with_params(params).unwrap();
    let mut seen = Vec::new();
    engine
        .minimize_with(
            &sphere_problem(2),
            &mut RunControl::new().progress(|start, end, current| {
                assert_eq!((start, end), (0, 3));
                seen.push(current);
            }),
        )
        .unwrap();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[test]
fn cancelled_token_stops_before_first_iteration() {
    let token = CancellationToken::new();
    token.cancel();
    let params = BbbcParams::builder().max_iterations(10).build().unwrap();
    let mut engine = Bbbc::with_params(params).unwrap();
    let calls = Cell::new(0);
    let result = engine.minimize_with(
        &sphere_problem(2),
        &mut RunControl::new()
            .progress(|_, _, _| calls.set(calls.get() + 1))
            .cancellation(token),
    );
    assert_eq!(result, Err(Error::Cancelled));
    assert_eq!(calls.get(), 0);
    assert_eq!(engine.state(), RunState::ParametersSet);
}

#[test]
fn cancellation_mid_run() {
    let token = CancellationToken::new();
    let params = FireworksParams::builder().max_iterations(50).seed(3).build().unwrap();
    let mut engine = Fireworks::with_params(params).unwrap();
    let mut last = 0;
    let trigger = token.clone();
    let result = engine.minimize_with(
        &sphere_problem(2),
        &mut RunControl::new()
            .progress(|_, _, current| {
                last = current;
                if current == 3 {
                    trigger.cancel();
                }
            })
            .cancellation(token),
    );
    assert_eq!(result, Err(Error::Cancelled));
    assert_eq!(last, 3);
    assert!(engine.solution().is_none());
}

#[test]
fn non_finite_objective_aborts_run() {
    let problem = Problem::new(vec![-1.0; 2], vec![1.0; 2], |x: &[f64]| {
        if x[0] > 0.0 { f64::NAN } else { x[0] }
    })
    .unwrap();
    let params = GemParams::builder().max_iterations(20).seed(8).build().unwrap();
    let mut engine = Gem::with_params(params).unwrap();
    match engine.minimize(&problem) {
        Err(Error::NonFiniteObjective { point, index, value }) => {
            assert_eq!(index, 0);
            assert!(value.is_nan());
            assert!(point[0] > 0.0);
        }
        other => panic!("expected NonFiniteObjective, got {other:?}"),
    }
    assert_eq!(engine.state(), RunState::ParametersSet);
}

#[test]
fn invalid_bounds_are_rejected() {
    assert!(matches!(
        Problem::new(vec![1.0], vec![1.0], |x: &[f64]| x[0]),
        Err(Error::InvalidBounds { index: 0, .. })
    ));
    assert!(matches!(
        Problem::new(vec![0.0, 0.0], vec![1.0], |x: &[f64]| x[0]),
        Err(Error::BoundsLengthMismatch { lower: 2, upper: 1 })
    ));
    assert!(matches!(
        Problem::new(Vec::new(), Vec::new(), |_: &[f64]| 0.0),
        Err(Error::EmptyBounds)
    ));
}

#[test]
fn engines_are_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Bbbc>();
    assert_send::<MultiBbbc>();
    assert_send::<Fireworks>();
    assert_send::<MultiFireworks>();
    assert_send::<Gem>();
    assert_send::<MultiGem>();
}

fn sphere_10() -> Problem<impl Objective> {
    Problem::new(vec![-10.0; 2], vec![10.0; 2], |x: &[f64]| x[0] * x[0] + x[1] * x[1]).unwrap()
}

#[test]
fn default_budgets_converge_on_sphere() {
    let problem = sphere_10();

    let params = BbbcParams::builder().seed(42).build().unwrap();
    let best = Bbbc::with_params(params).unwrap().minimize(&problem).unwrap();
    assert!(best.value() < 1.0, "bbbc: {}", best.value());

    let params = FireworksParams::builder().seed(42).build().unwrap();
    let best = Fireworks::with_params(params).unwrap().minimize(&problem).unwrap();
    assert!(best.value() < 1.0, "fireworks: {}", best.value());

    let params = GemParams::builder().seed(42).build().unwrap();
    let best = Gem::with_params(params).unwrap().minimize(&problem).unwrap();
    assert!(best.value() < 1.0, "gem: {}", best.value());
}

#[test]
fn nan_objective_fails_on_first_evaluation() {
    let calls = Cell::new(0);
    let problem = Problem::new(vec![-1.0; 2], vec![1.0; 2], |_: &[f64]| {
        calls.set(calls.get() + 1);
        f64::NAN
    })
    .unwrap();

    let params = FireworksParams::builder().seed(1).build().unwrap();
    let result = Fireworks::with_params(params).unwrap().minimize(&problem);
    assert!(matches!(result, Err(Error::NonFiniteObjective { index: 0, .. })));
    assert_eq!(calls.get(), 1);

    calls.set(0);
    let params = BbbcParams::builder().seed(1).build().unwrap();
    let result = MultiBbbc::with_params(params).unwrap().minimize(&problem);
    assert!(matches!(result, Err(Error::NonFiniteObjective { .. })));
    assert_eq!(calls.get(), 1);
}

#[test]
fn single_iteration_returns_best_of_initial_population() {
    let problem = sphere_10();

    let params = BbbcParams::builder().max_iterations(1).seed(4).build().unwrap();
    let mut bbbc = Bbbc::with_params(params).unwrap();
    let best = bbbc.minimize(&problem).unwrap();
    assert!(bbbc.population().iter().all(|a| a.value() >= best.value()));
    assert!(bbbc.population().contains(&best));

    let params = FireworksParams::builder().max_iterations(1).seed(4).build().unwrap();
    let mut fireworks = Fireworks::with_params(params).unwrap();
    let best = fireworks.minimize(&problem).unwrap();
    assert!(fireworks.population().iter().all(|a| a.value() >= best.value()));
    assert!(fireworks.population().contains(&best));
}

#[test]
fn population_of_one_runs_every_engine() {
    let problem = sphere_10();

    let params = FireworksParams::builder().population_size(1).max_iterations(5).seed(2).build().unwrap();
    assert!(Fireworks::with_params(params).unwrap().minimize(&problem).is_ok());
    assert_eq!(MultiFireworks::with_params(params).unwrap().minimize(&problem).unwrap().len(), 1);

    let params = GemParams::builder().population_size(1).max_iterations(5).seed(2).build().unwrap();
    assert!(Gem::with_params(params).unwrap().minimize(&problem).is_ok());
    assert_eq!(MultiGem::with_params(params).unwrap().minimize(&problem).unwrap().len(), 1);

    let params = BbbcParams::builder().population_size(1).max_iterations(5).seed(2).build().unwrap();
    assert_eq!(MultiBbbc::with_params(params).unwrap().minimize(&problem).unwrap().len(), 1);
}
