//! Integration tests for the multi-objective engines.

use blastopt::pareto::hypervolume;
use blastopt::prelude::*;

use crate::{assert_mutually_non_dominated, sphere_problem, test_functions, zdt1_problem};

fn schaffer_problem() -> Problem<impl Objective> {
    Problem::new(vec![-5.0], vec![5.0], VectorObjective::new(2, test_functions::schaffer)).unwrap()
}

fn objective_vectors(front: &[Agent]) -> Vec<Point> {
    front.iter().map(|a| a.objectives().clone()).collect()
}

#[test]
fn bbbc_zdt1_front() {
    let params = BbbcParams::builder()
        .population_size(20)
        .max_iterations(60)
        .seed(42)
        .build()
        .unwrap();
    let mut engine = MultiBbbc::with_params(params).unwrap();
    let problem = zdt1_problem(5);
    let front = engine.minimize(&problem).unwrap();

    assert!(!front.is_empty() && front.len() <= 20);
    assert_mutually_non_dominated(&front);
    for agent in &front {
        assert!(problem.bounds().contains_point(agent.point()));
        assert_eq!(agent.objectives().dim(), 2);
    }
    assert!(hypervolume(&objective_vectors(&front), &[2.0, 11.0]) > 0.0);
    assert_eq!(engine.pareto_front(), front);
}

#[test]
fn fireworks_schaffer_front_lies_between_minima() {
    let params = FireworksParams::builder()
        .population_size(10)
        .max_iterations(40)
        .seed(5)
        .build()
        .unwrap();
    let front = MultiFireworks::with_params(params)
        .unwrap()
        .minimize(&schaffer_problem())
        .unwrap();
    assert!(!front.is_empty() && front.len() <= 10);
    assert_mutually_non_dominated(&front);
    for agent in &front {
        let x = agent.point()[0];
        assert!((0.0..=2.0).contains(&x), "x = {x} is not Pareto-optimal");
    }
}

#[test]
fn gem_zdt1_front() {
    let params = GemParams::builder()
        .population_size(8)
        .max_iterations(40)
        .shrapnel(20)
        .seed(9)
        .build()
        .unwrap();
    let mut engine = MultiGem::with_params(params).unwrap();
    let front = engine.minimize(&zdt1_problem(3)).unwrap();
    assert!(!front.is_empty() && front.len() <= 8);
    assert_mutually_non_dominated(&front);
    assert_eq!(engine.population().len(), 8);
}

#[test]
fn single_objective_front_holds_the_minimum() {
    let params = FireworksParams::builder().max_iterations(20).seed(1).build().unwrap();
    let mut engine = MultiFireworks::with_params(params).unwrap();
    let front = engine.minimize(&sphere_problem(2)).unwrap();
    let lowest = engine
        .population()
        .iter()
        .map(Agent::value)
        .fold(f64::INFINITY, f64::min);
    assert!(!front.is_empty());
    assert!(front.iter().all(|a| a.value() == lowest));
}

#[test]
fn seeded_fronts_are_identical() {
    let params = BbbcParams::builder().max_iterations(15).seed(31).build().unwrap();
    let a = MultiBbbc::with_params(params).unwrap().minimize(&zdt1_problem(4)).unwrap();
    let b = MultiBbbc::with_params(params).unwrap().minimize(&zdt1_problem(4)).unwrap();
    assert_eq!(a, b);
}

/// `(x0, 1 − x0)` over the unit square: every point is Pareto-optimal.
fn conflicting_problem() -> Problem<impl Objective> {
    let objectives = ObjectiveSet::new()
        .with(|x: &[f64]| x[0])
        .with(|x: &[f64]| 1.0 - x[0]);
    Problem::new(vec![0.0; 2], vec![1.0; 2], objectives).unwrap()
}

/// `(x0, x1)` over the unit square: the objectives never conflict.
fn aligned_problem() -> Problem<impl Objective> {
    let objectives = ObjectiveSet::new()
        .with(|x: &[f64]| x[0])
        .with(|x: &[f64]| x[1]);
    Problem::new(vec![0.0; 2], vec![1.0; 2], objectives).unwrap()
}

#[test]
fn fireworks_front_fills_population_on_conflicting_objectives() {
    for seed in 0..5 {
        let params = FireworksParams::builder()
            .population_size(7)
            .max_iterations(20)
            .seed(seed)
            .build()
            .unwrap();
        let front = MultiFireworks::with_params(params)
            .unwrap()
            .minimize(&conflicting_problem())
            .unwrap();
        assert_eq!(front.len(), 7, "seed {seed}");
    }
}

#[test]
fn gem_front_fills_population_on_conflicting_objectives() {
    for seed in 0..5 {
        let params = GemParams::builder()
            .population_size(7)
            .max_iterations(20)
            .shrapnel(10)
            .seed(seed)
            .build()
            .unwrap();
        let front = MultiGem::with_params(params)
            .unwrap()
            .minimize(&conflicting_problem())
            .unwrap();
        assert_eq!(front.len(), 7, "seed {seed}");
    }
}

#[test]
fn fireworks_front_is_non_dominated_on_aligned_objectives() {
    let problem = aligned_problem();
    for seed in 0..5 {
        let params = FireworksParams::builder()
            .population_size(7)
            .max_iterations(20)
            .seed(seed)
            .build()
            .unwrap();
        let front = MultiFireworks::with_params(params).unwrap().minimize(&problem).unwrap();
        assert!(!front.is_empty() && front.len() <= 7, "seed {seed}");
        assert_mutually_non_dominated(&front);
        for agent in &front {
            assert!(problem.bounds().contains_point(agent.point()));
        }
    }
}

#[test]
fn gem_front_is_non_dominated_on_aligned_objectives() {
    let problem = aligned_problem();
    for seed in 0..5 {
        let params = GemParams::builder()
            .population_size(7)
            .max_iterations(20)
            .shrapnel(10)
            .seed(seed)
            .build()
            .unwrap();
        let front = MultiGem::with_params(params).unwrap().minimize(&problem).unwrap();
        assert!(!front.is_empty() && front.len() <= 7, "seed {seed}");
        assert_mutually_non_dominated(&front);
    }
}
