//! The lifecycle shared by every engine.
//!
//! An engine starts [`Uninitialized`](RunState::Uninitialized), becomes
//! [`ParametersSet`](RunState::ParametersSet) once it holds a validated
//! parameter value, is [`Running`](RunState::Running) while
//! [`Optimizer::minimize`] drives it, and ends [`Done`](RunState::Done).
//! A finished engine can be run again; every run starts from a fresh
//! population.
//!
//! The driver calls [`Optimizer::first_step`] for the first iteration and
//! [`Optimizer::next_step`] for every later one. Before each iteration it
//! checks the [`CancellationToken`]; after each it reports progress.
//!
//! ```
//! use blastopt::optimizer::{Optimizer, RunControl};
//! use blastopt::{Bbbc, BbbcParams, Problem};
//!
//! let problem = Problem::new(vec![-5.0; 2], vec![5.0; 2], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum::<f64>()
//! })
//! .unwrap();
//!
//! let params = BbbcParams::builder().max_iterations(50).seed(7).build().unwrap();
//! let mut engine = Bbbc::with_params(params).unwrap();
//!
//! let mut last = 0;
//! let best = engine
//!     .minimize_with(&problem, &mut RunControl::new().progress(|_, _, current| last = current))
//!     .unwrap();
//! assert!(best.value() < 1.0);
//! assert_eq!(last, 50);
//! ```

mod control;

pub use control::{CancellationToken, Progress, RunControl};

use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::problem::Problem;

/// Where an engine is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// No parameters yet; a run fails with [`Error::ParametersNotSet`].
    #[default]
    Uninitialized,
    /// Ready to run.
    ParametersSet,
    /// Inside a run, executing `iteration`.
    Running {
        /// Iteration being executed.
        iteration: usize,
    },
    /// The last run completed.
    Done,
}

/// A population-based engine driven iteration by iteration.
///
/// Implementors provide the per-iteration steps; the provided
/// [`minimize`](Self::minimize) and [`minimize_with`](Self::minimize_with)
/// run the shared driver loop.
pub trait Optimizer {
    /// What a completed run returns.
    type Output;

    /// Engine name used in log events.
    const NAME: &'static str;

    /// Index of the first iteration: `1` for BBBC and Fireworks, `0` for GEM.
    const FIRST_ITERATION: usize;

    /// Current lifecycle state.
    fn state(&self) -> RunState;

    #[doc(hidden)]
    fn set_state(&mut self, state: RunState);

    /// Iteration count of the configured run, `None` while uninitialized.
    fn max_iterations(&self) -> Option<usize>;

    /// Checks `problem` against the engine and resets the working set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectiveCountMismatch`] when the engine cannot
    /// handle the number of objectives, or [`Error::InvalidParameter`] when
    /// a parameter does not fit the problem's dimension.
    fn prepare<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()>;

    /// Creates and evaluates the initial population.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteObjective`] if an evaluation fails.
    fn first_step<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()>;

    /// Runs one iteration after the first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteObjective`] if an evaluation fails.
    fn next_step<O: Objective>(&mut self, problem: &Problem<O>, iteration: usize) -> Result<()>;

    /// Result of the last completed run.
    fn output(&self) -> Self::Output;

    /// Drops the working set so the next run is independent. Allocated
    /// slots are kept.
    fn clear(&mut self);

    /// Runs to completion without progress reporting or cancellation.
    ///
    /// # Errors
    ///
    /// See [`minimize_with`](Self::minimize_with).
    fn minimize<O: Objective>(&mut self, problem: &Problem<O>) -> Result<Self::Output> {
        self.minimize_with(problem, &mut RunControl::new())
    }

    /// Runs to completion, reporting progress and honoring cancellation
    /// through `control`.
    ///
    /// # Errors
    ///
    /// - [`Error::ParametersNotSet`] if no parameters were set; nothing is
    ///   touched in that case.
    /// - Any error of [`prepare`](Self::prepare),
    ///   [`first_step`](Self::first_step) or [`next_step`](Self::next_step).
    /// - [`Error::Cancelled`] if the token was cancelled.
    ///
    /// After an error the engine is back in
    /// [`ParametersSet`](RunState::ParametersSet) and its results are
    /// undefined.
    fn minimize_with<O: Objective>(
        &mut self,
        problem: &Problem<O>,
        control: &mut RunControl<'_>,
    ) -> Result<Self::Output> {
        let Some(max_iterations) = self.max_iterations() else {
            return Err(Error::ParametersNotSet);
        };

        trace_info!(
            optimizer = Self::NAME,
            max_iterations,
            dim = problem.dim(),
            n_objectives = problem.n_objectives(),
            "optimization started"
        );

        match drive(self, problem, control, max_iterations) {
            Ok(()) => {
                self.set_state(RunState::Done);
                trace_info!(optimizer = Self::NAME, "optimization finished");
                Ok(self.output())
            }
            Err(e) => {
                self.set_state(RunState::ParametersSet);
                trace_info!(optimizer = Self::NAME, error = %e, "optimization stopped");
                Err(e)
            }
        }
    }
}

fn drive<E, O>(
    engine: &mut E,
    problem: &Problem<O>,
    control: &mut RunControl<'_>,
    max_iterations: usize,
) -> Result<()>
where
    E: Optimizer + ?Sized,
    O: Objective,
{
    engine.prepare(problem)?;

    let first = E::FIRST_ITERATION;
    let last = first + max_iterations - 1;
    for iteration in first..=last {
        if control.is_cancelled() {
            return Err(Error::Cancelled);
        }
        engine.set_state(RunState::Running { iteration });
        if iteration == first {
            engine.first_step(problem)?;
        } else {
            engine.next_step(problem, iteration)?;
        }
        trace_debug!(optimizer = E::NAME, iteration, "iteration completed");
        control.report(first, last, iteration);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts steps; fails at `fail_at` if set.
    #[derive(Default)]
    struct Counter {
        max_iterations: Option<usize>,
        state: RunState,
        steps: Vec<usize>,
        fail_at: Option<usize>,
    }

    impl Optimizer for Counter {
        type Output = usize;
        const NAME: &'static str = "counter";
        const FIRST_ITERATION: usize = 0;

        fn state(&self) -> RunState {
            self.state
        }

        fn set_state(&mut self, state: RunState) {
            self.state = state;
        }

        fn max_iterations(&self) -> Option<usize> {
            self.max_iterations
        }

        fn prepare<O: Objective>(&mut self, _problem: &Problem<O>) -> Result<()> {
            self.steps.clear();
            Ok(())
        }

        fn first_step<O: Objective>(&mut self, _problem: &Problem<O>) -> Result<()> {
            self.steps.push(0);
            Ok(())
        }

        fn next_step<O: Objective>(&mut self, _problem: &Problem<O>, iteration: usize) -> Result<()> {
            if self.fail_at == Some(iteration) {
                return Err(Error::invalid_parameter("fail_at", "requested failure"));
            }
            self.steps.push(iteration);
            Ok(())
        }

        fn output(&self) -> usize {
            self.steps.len()
        }

        fn clear(&mut self) {
            self.steps.clear();
        }
    }

    fn problem() -> Problem<impl Objective> {
        Problem::new(vec![0.0], vec![1.0], |x: &[f64]| x[0]).unwrap()
    }

    #[test]
    fn test_uninitialized_fails_without_stepping() {
        let mut engine = Counter::default();
        assert_eq!(engine.minimize(&problem()), Err(Error::ParametersNotSet));
        assert!(engine.steps.is_empty());
        assert_eq!(engine.state(), RunState::Uninitialized);
    }

    #[test]
    fn test_runs_every_iteration_and_reports() {
        let mut engine = Counter {
            max_iterations: Some(3),
            state: RunState::ParametersSet,
            ..Counter::default()
        };
        let mut reports = Vec::new();
        let out = engine
            .minimize_with(
                &problem(),
                &mut RunControl::new().progress(|s, e, c| reports.push((s, e, c))),
            )
            .unwrap();
        assert_eq!(out, 3);
        assert_eq!(engine.steps, vec![0, 1, 2]);
        assert_eq!(reports, vec![(0, 2, 0), (0, 2, 1), (0, 2, 2)]);
        assert_eq!(engine.state(), RunState::Done);
    }

    #[test]
    fn test_error_returns_to_parameters_set() {
        let mut engine = Counter {
            max_iterations: Some(5),
            fail_at: Some(2),
            ..Counter::default()
        };
        assert!(matches!(
            engine.minimize(&problem()),
            Err(Error::InvalidParameter { name: "fail_at", .. })
        ));
        assert_eq!(engine.state(), RunState::ParametersSet);
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut engine = Counter {
            max_iterations: Some(5),
            ..Counter::default()
        };
        let token = CancellationToken::new();
        token.cancel();
        let result = engine.minimize_with(&problem(), &mut RunControl::new().cancellation(token));
        assert_eq!(result, Err(Error::Cancelled));
        assert!(engine.steps.is_empty());
    }
}
