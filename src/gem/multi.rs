use super::GemParams;
use super::engine::{Grenades, Schedule};
use crate::agent::Agent;
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::optimizer::{Optimizer, RunState};
use crate::problem::Problem;
use crate::random::rng_from_seed;
use crate::ranking::Ranking;

/// Multi-objective Grenade Explosion Method.
///
/// Grenades are processed front by front, and every member of the first
/// front probes axis directions during the opening phase. A grenade only
/// moves to shrapnel that Pareto-dominates its current position, so the
/// result is the non-dominated subset of the final grenades.
///
/// ```
/// use blastopt::{GemParams, MultiGem, ObjectiveSet, Optimizer, Problem};
///
/// let objectives = ObjectiveSet::new()
///     .with(|x: &[f64]| x[0] * x[0])
///     .with(|x: &[f64]| (x[0] - 1.0) * (x[0] - 1.0));
/// let problem = Problem::new(vec![-2.0], vec![3.0], objectives).unwrap();
///
/// let params = GemParams::builder().population_size(6).max_iterations(40).seed(8).build().unwrap();
/// let front = MultiGem::with_params(params).unwrap().minimize(&problem).unwrap();
/// assert!(!front.is_empty() && front.len() <= 6);
/// ```
pub struct MultiGem {
    params: Option<GemParams>,
    state: RunState,
    rng: fastrand::Rng,
    grenades: Grenades,
    front: Vec<Agent>,
}

impl MultiGem {
    /// Creates an engine without parameters. It must receive
    /// [`initialize_parameters`](Self::initialize_parameters) before a run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: None,
            state: RunState::Uninitialized,
            rng: fastrand::Rng::new(),
            grenades: Grenades::new(Ranking::Pareto),
            front: Vec::new(),
        }
    }

    /// Creates an engine ready to run with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` does not validate.
    pub fn with_params(params: GemParams) -> Result<Self> {
        let mut engine = Self::new();
        engine.initialize_parameters(params)?;
        Ok(engine)
    }

    /// Stores `params` and reseeds the generator when a seed is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` does not validate.
    pub fn initialize_parameters(&mut self, params: GemParams) -> Result<()> {
        params.validate()?;
        self.rng = rng_from_seed(params.seed);
        self.params = Some(params);
        self.state = RunState::ParametersSet;
        Ok(())
    }

    /// The parameters, if set.
    #[must_use]
    pub fn params(&self) -> Option<&GemParams> {
        self.params.as_ref()
    }

    /// Non-dominated grenades after the last iteration.
    #[must_use]
    pub fn pareto_front(&self) -> Vec<Agent> {
        self.front.clone()
    }

    /// The grenades in real coordinates.
    #[must_use]
    pub fn population(&self) -> &[Agent] {
        self.grenades.agents()
    }

    fn refresh_front(&mut self) {
        self.front.clear();
        let indices = self.grenades.front().to_vec();
        let agents = self.grenades.agents();
        self.front.extend(indices.into_iter().map(|i| agents[i].clone()));
    }
}

impl Default for MultiGem {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MultiGem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiGem")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("grenades", &self.grenades.agents().len())
            .field("front", &self.front.len())
            .finish_non_exhaustive()
    }
}

impl Optimizer for MultiGem {
    type Output = Vec<Agent>;

    const NAME: &'static str = "multi_gem";
    const FIRST_ITERATION: usize = 0;

    fn state(&self) -> RunState {
        self.state
    }

    fn set_state(&mut self, state: RunState) {
        self.state = state;
    }

    fn max_iterations(&self) -> Option<usize> {
        self.params.map(|p| p.max_iterations)
    }

    fn prepare<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        params.validate_for_dim(problem.dim())?;
        self.grenades.reset(problem);
        self.front.clear();
        Ok(())
    }

    fn first_step<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let schedule = Schedule::at(&params, problem.dim(), Self::FIRST_ITERATION);
        self.grenades
            .place(&mut self.rng, problem, params.population_size, schedule.territory)?;
        self.refresh_front();
        Ok(())
    }

    fn next_step<O: Objective>(&mut self, problem: &Problem<O>, iteration: usize) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let schedule = Schedule::at(&params, problem.dim(), iteration);
        self.grenades.step(&mut self.rng, problem, &params, &schedule)?;
        self.refresh_front();
        trace_debug!(front = self.front.len(), "multi gem front updated");
        Ok(())
    }

    fn output(&self) -> Vec<Agent> {
        self.pareto_front()
    }

    fn clear(&mut self) {
        self.grenades.clear();
        self.front.clear();
        if self.state == RunState::Done {
            self.state = RunState::ParametersSet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::ObjectiveSet;
    use crate::pareto::dominates;

    #[test]
    fn test_front_is_mutually_non_dominated() {
        let set = ObjectiveSet::new()
            .with(|x: &[f64]| x[0])
            .with(|x: &[f64]| x[1]);
        let problem = Problem::new(vec![0.0; 2], vec![1.0; 2], set).unwrap();
        let params = GemParams::builder()
            .population_size(6)
            .max_iterations(15)
            .shrapnel(10)
            .seed(21)
            .build()
            .unwrap();
        let mut engine = MultiGem::with_params(params).unwrap();
        let front = engine.minimize(&problem).unwrap();
        assert!(!front.is_empty());
        assert!(front.len() <= 6);
        for a in &front {
            for b in &front {
                assert!(!dominates(a.objectives(), b.objectives()));
            }
            assert!(problem.bounds().contains_point(a.point()));
        }
        engine.clear();
        assert!(engine.pareto_front().is_empty());
    }
}
