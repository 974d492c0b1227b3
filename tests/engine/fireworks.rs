use blastopt::prelude::*;

use crate::{sphere_problem, test_functions};

#[test]
fn sphere_function() {
    let params = FireworksParams::builder().max_iterations(100).seed(42).build().unwrap();
    let mut engine = Fireworks::with_params(params).unwrap();
    let best = engine.minimize(&sphere_problem(3)).unwrap();
    assert!(best.value() < 0.1, "sphere best value should be < 0.1, got {}", best.value());
    assert_eq!(engine.population().len(), 5);
}

#[test]
fn ackley_function() {
    let problem = Problem::new(vec![-10.0; 2], vec![10.0; 2], test_functions::ackley).unwrap();
    let params = FireworksParams::builder().max_iterations(200).seed(7).build().unwrap();
    let best = Fireworks::with_params(params).unwrap().minimize(&problem).unwrap();
    assert!(best.value() < 3.0, "ackley best value should be < 3.0, got {}", best.value());
}

#[test]
fn best_never_worsens_across_iterations() {
    let params = FireworksParams::builder().max_iterations(40).seed(11).build().unwrap();
    let mut engine = Fireworks::with_params(params).unwrap();
    let problem = sphere_problem(2);

    let mut bests = Vec::new();
    for iterations in [5, 20, 40] {
        let params = FireworksParams { max_iterations: iterations, ..params };
        engine.initialize_parameters(params).unwrap();
        bests.push(engine.minimize(&problem).unwrap().value());
    }
    // Same seed, longer runs: the incumbent can only improve.
    assert!(bests[1] <= bests[0]);
    assert!(bests[2] <= bests[1]);
}

#[test]
fn tiny_debris_ratios_still_explode_the_best() {
    let params = FireworksParams::builder()
        .population_size(2)
        .fecundity(1)
        .debris_ratios(0.01, 0.1)
        .max_iterations(30)
        .seed(4)
        .build()
        .unwrap();
    let best = Fireworks::with_params(params)
        .unwrap()
        .minimize(&sphere_problem(2))
        .unwrap();
    assert!(best.value().is_finite());
}

#[test]
fn invalid_debris_ratios_are_rejected() {
    let err = FireworksParams::builder().debris_ratios(0.5, 0.2).build().unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { .. }));
}

#[test]
fn seeded_runs_are_identical() {
    let params = FireworksParams::builder().max_iterations(15).seed(123).build().unwrap();
    let a = Fireworks::with_params(params).unwrap().minimize(&sphere_problem(3)).unwrap();
    let b = Fireworks::with_params(params).unwrap().minimize(&sphere_problem(3)).unwrap();
    assert_eq!(a, b);
}
