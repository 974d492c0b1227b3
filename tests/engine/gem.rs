use blastopt::prelude::*;

use crate::{sphere_problem, test_functions};

#[test]
fn sphere_function() {
    let params = GemParams::builder().max_iterations(150).seed(42).build().unwrap();
    let mut engine = Gem::with_params(params).unwrap();
    let best = engine.minimize(&sphere_problem(2)).unwrap();
    assert!(best.value() < 0.5, "sphere best value should be < 0.5, got {}", best.value());
    assert_eq!(engine.population().len(), 5);
}

#[test]
fn rastrigin_function() {
    let problem = Problem::new(vec![-5.12; 2], vec![5.12; 2], test_functions::rastrigin).unwrap();
    let params = GemParams::builder()
        .population_size(8)
        .max_iterations(200)
        .seed(3)
        .build()
        .unwrap();
    let best = Gem::with_params(params).unwrap().minimize(&problem).unwrap();
    assert!(best.value() < 10.0, "rastrigin best value should be < 10.0, got {}", best.value());
}

#[test]
fn grenades_stay_in_bounds() {
    let problem = Problem::new(vec![10.0, -3.0, 0.0], vec![20.0, 3.0, 1.0], test_functions::sphere).unwrap();
    let params = GemParams::builder().max_iterations(40).seed(17).build().unwrap();
    let mut engine = Gem::with_params(params).unwrap();
    let best = engine.minimize(&problem).unwrap();
    assert!(problem.bounds().contains_point(best.point()));
    for grenade in engine.population() {
        assert!(problem.bounds().contains_point(grenade.point()));
    }
}

#[test]
fn single_iteration_only_places() {
    let params = GemParams::builder().max_iterations(1).seed(2).build().unwrap();
    let mut engine = Gem::with_params(params).unwrap();
    let problem = sphere_problem(2);
    let best = engine.minimize(&problem).unwrap();
    let lowest = engine
        .population()
        .iter()
        .map(Agent::value)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(best.value(), lowest);
}

#[test]
fn radius_beyond_diagonal_is_rejected() {
    // 2√1 = 2 in one dimension.
    let problem = Problem::new(vec![-1.0], vec![1.0], test_functions::sphere).unwrap();
    let params = GemParams::builder().initial_radius(2.5).build().unwrap();
    let mut engine = Gem::with_params(params).unwrap();
    assert!(matches!(
        engine.minimize(&problem),
        Err(Error::InvalidParameter { name: "initial_radius", .. })
    ));
}

#[test]
fn seeded_runs_are_identical() {
    let params = GemParams::builder().max_iterations(25).seed(77).build().unwrap();
    let a = Gem::with_params(params).unwrap().minimize(&sphere_problem(3)).unwrap();
    let b = Gem::with_params(params).unwrap().minimize(&sphere_problem(3)).unwrap();
    assert_eq!(a, b);
}
