use super::GemParams;
use super::engine::{Grenades, Schedule};
use crate::agent::Agent;
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::optimizer::{Optimizer, RunState};
use crate::problem::Problem;
use crate::random::rng_from_seed;
use crate::ranking::Ranking;

/// Single-objective Grenade Explosion Method.
///
/// The incumbent is a snapshot of the best grenade ever seen, so it never
/// worsens even when a grenade is re-seeded away from its position.
pub struct Gem {
    params: Option<GemParams>,
    state: RunState,
    rng: fastrand::Rng,
    grenades: Grenades,
    best: Agent,
}

impl Gem {
    /// Creates an engine without parameters. It must receive
    /// [`initialize_parameters`](Self::initialize_parameters) before a run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: None,
            state: RunState::Uninitialized,
            rng: fastrand::Rng::new(),
            grenades: Grenades::new(Ranking::Scalar),
            best: Agent::new(0, 1),
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

    /// The best agent of the last completed run.
    #[must_use]
    pub fn solution(&self) -> Option<&Agent> {
        (self.state == RunState::Done).then_some(&self.best)
    }

    /// The grenades in real coordinates.
    #[must_use]
    pub fn population(&self) -> &[Agent] {
        self.grenades.agents()
    }

    fn update_best(&mut self) {
        if let Some(leader) = self
            .grenades
            .agents()
            .iter()
            .min_by(|a, b| a.value().total_cmp(&b.value()))
            && leader.value() < self.best.value()
        {
            self.best.set_at(leader);
            trace_debug!(value = leader.value(), "gem incumbent improved");
        }
    }
}

impl Default for Gem {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Gem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gem")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("grenades", &self.grenades.agents().len())
            .finish_non_exhaustive()
    }
}

impl Optimizer for Gem {
    type Output = Agent;

    const NAME: &'static str = "gem";
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
        if problem.n_objectives() != 1 {
            return Err(Error::ObjectiveCountMismatch {
                expected: 1,
                got: problem.n_objectives(),
            });
        }
        params.validate_for_dim(problem.dim())?;
        self.grenades.reset(problem);
        self.best = Agent::new(problem.dim(), 1);
        self.best.objectives_mut()[0] = f64::INFINITY;
        Ok(())
    }

    fn first_step<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let schedule = Schedule::at(&params, problem.dim(), Self::FIRST_ITERATION);
        self.grenades
            .place(&mut self.rng, problem, params.population_size, schedule.territory)?;
        if let Some(first) = self.grenades.agents().first() {
            self.best.set_at(first);
        }
        self.update_best();
        Ok(())
    }

    fn next_step<O: Objective>(&mut self, problem: &Problem<O>, iteration: usize) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let schedule = Schedule::at(&params, problem.dim(), iteration);
        self.grenades.step(&mut self.rng, problem, &params, &schedule)?;
        self.update_best();
        Ok(())
    }

    fn output(&self) -> Agent {
        self.best.clone()
    }

    fn clear(&mut self) {
        self.grenades.clear();
        if self.state == RunState::Done {
            self.state = RunState::ParametersSet;
        }
    }
}
