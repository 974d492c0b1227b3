use blastopt::prelude::*;

use crate::{sphere_problem, test_functions};

#[test]
fn sphere_function() {
    let params = BbbcParams::builder().max_iterations(200).seed(42).build().unwrap();
    let mut engine = Bbbc::with_params(params).unwrap();
    let best = engine.minimize(&sphere_problem(2)).unwrap();
    assert!(best.value() < 0.1, "sphere best value should be < 0.1, got {}", best.value());
    assert_eq!(engine.solution(), Some(&best));
}

#[test]
fn rosenbrock_function() {
    let problem = Problem::new(vec![-5.0; 2], vec![5.0; 2], test_functions::rosenbrock).unwrap();
    let params = BbbcParams::builder()
        .population_size(40)
        .max_iterations(300)
        .seed(42)
        .build()
        .unwrap();
    let best = Bbbc::with_params(params).unwrap().minimize(&problem).unwrap();
    assert!(best.value() < 5.0, "rosenbrock best value should be < 5.0, got {}", best.value());
}

#[test]
fn solution_stays_in_bounds() {
    let problem = Problem::new(vec![2.0, -1.0], vec![3.0, 1.0], test_functions::sphere).unwrap();
    let params = BbbcParams::builder().max_iterations(50).seed(3).build().unwrap();
    let mut engine = Bbbc::with_params(params).unwrap();
    let best = engine.minimize(&problem).unwrap();
    assert!(problem.bounds().contains_point(best.point()));
    // The constrained optimum sits on the lower edge of the first axis.
    assert!((best.point()[0] - 2.0).abs() < 0.1);
    for agent in engine.population() {
        assert!(problem.bounds().contains_point(agent.point()));
    }
}

#[test]
fn single_agent_population() {
    let params = BbbcParams::builder()
        .population_size(1)
        .max_iterations(10)
        .seed(1)
        .build()
        .unwrap();
    let mut engine = Bbbc::with_params(params).unwrap();
    let best = engine.minimize(&sphere_problem(3)).unwrap();
    assert_eq!(engine.population().len(), 1);
    assert_eq!(best.point().dim(), 3);
}

#[test]
fn seeded_runs_are_identical() {
    let params = BbbcParams::builder().max_iterations(30).seed(9).build().unwrap();
    let a = Bbbc::with_params(params).unwrap().minimize(&sphere_problem(4)).unwrap();
    let b = Bbbc::with_params(params).unwrap().minimize(&sphere_problem(4)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rerun_after_clear() {
    let params = BbbcParams::builder().max_iterations(20).seed(5).build().unwrap();
    let mut engine = Bbbc::with_params(params).unwrap();
    let problem = sphere_problem(2);
    engine.minimize(&problem).unwrap();
    engine.clear();
    assert_eq!(engine.state(), RunState::ParametersSet);
    assert!(engine.population().is_empty());
    let best = engine.minimize(&problem).unwrap();
    assert_eq!(engine.state(), RunState::Done);
    assert!(best.value().is_finite());
}

#[test]
fn rejects_multi_objective_problem() {
    let set = ObjectiveSet::new().with(|x: &[f64]| x[0]).with(|x: &[f64]| -x[0]);
    let problem = Problem::new(vec![0.0], vec![1.0], set).unwrap();
    let params = BbbcParams::builder().max_iterations(5).build().unwrap();
    let err = Bbbc::with_params(params).unwrap().minimize(&problem).unwrap_err();
    assert_eq!(err, Error::ObjectiveCountMismatch { expected: 1, got: 2 });
}
