#![allow(clippy::cast_precision_loss, clippy::float_cmp)]

#[path = "../../benches/test_functions.rs"]
#[allow(dead_code)]
mod test_functions;

mod bbbc;
mod fireworks;
mod gem;
mod lifecycle;
mod multi_objective;

use blastopt::{Agent, Objective, Problem, VectorObjective};

/// Sphere over `[-5, 5]^dim`.
pub fn sphere_problem(dim: usize) -> Problem<impl Objective> {
    Problem::new(vec![-5.0; dim], vec![5.0; dim], test_functions::sphere).unwrap()
}

/// ZDT1 over `[0, 1]^dim`.
pub fn zdt1_problem(dim: usize) -> Problem<impl Objective> {
    Problem::new(
        vec![0.0; dim],
        vec![1.0; dim],
        VectorObjective::new(2, test_functions::zdt1),
    )
    .unwrap()
}

/// Panics if any member of `front` Pareto-dominates another.
pub fn assert_mutually_non_dominated(front: &[Agent]) {
    for (i, a) in front.iter().enumerate() {
        for (j, b) in front.iter().enumerate() {
            if i == j {
                continue;
            }
            assert!(
                !blastopt::pareto::dominates(a.objectives(), b.objectives()),
                "{:?} dominates {:?}",
                a.objectives(),
                b.objectives()
            );
        }
    }
}
