use super::{BbbcParams, MASS_EPSILON, big_bang, center_of_mass};
use crate::agent::{Agent, AgentPool};
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::optimizer::{Optimizer, RunState};
use crate::point::Point;
use crate::problem::Problem;
use crate::random::{rng_from_seed, scatter};

/// Single-objective Big Bang–Big Crunch.
///
/// The best agent is never regenerated, so the incumbent only improves.
/// See the [module documentation](super) for the update rules.
pub struct Bbbc {
    params: Option<BbbcParams>,
    state: RunState,
    rng: fastrand::Rng,
    agents: AgentPool,
    best: Agent,
    best_index: usize,
    center: Point,
    weights: Vec<f64>,
}

impl Bbbc {
    /// Creates an engine without parameters. It must receive
    /// [`initialize_parameters`](Self::initialize_parameters) before a run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: None,
            state: RunState::Uninitialized,
            rng: fastrand::Rng::new(),
            agents: AgentPool::default(),
            best: Agent::new(0, 1),
            best_index: 0,
            center: Point::zeros(0),
            weights: Vec::new(),
        }
    }

    /// Creates an engine ready to run with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` does not validate.
    pub fn with_params(params: BbbcParams) -> Result<Self> {
        let mut engine = Self::new();
        engine.initialize_parameters(params)?;
        Ok(engine)
    }

    /// Stores `params` and reseeds the generator when a seed is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` does not validate.
    pub fn initialize_parameters(&mut self, params: BbbcParams) -> Result<()> {
        params.validate()?;
        self.rng = rng_from_seed(params.seed);
        self.params = Some(params);
        self.state = RunState::ParametersSet;
        Ok(())
    }

    /// The parameters, if set.
    #[must_use]
    pub fn params(&self) -> Option<&BbbcParams> {
        self.params.as_ref()
    }

    /// The best agent of the last completed run.
    #[must_use]
    pub fn solution(&self) -> Option<&Agent> {
        (self.state == RunState::Done).then_some(&self.best)
    }

    /// The current population.
    #[must_use]
    pub fn population(&self) -> &[Agent] {
        self.agents.as_slice()
    }

    fn update_best(&mut self) {
        for (i, agent) in self.agents.iter().enumerate() {
            if agent.value() < self.best.value() {
                self.best_index = i;
                self.best.set_at(agent);
                trace_debug!(value = agent.value(), "bbbc incumbent improved");
            }
        }
    }
}

impl Default for Bbbc {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Bbbc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bbbc")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("population", &self.agents.len())
            .finish_non_exhaustive()
    }
}

impl Optimizer for Bbbc {
    type Output = Agent;

    const NAME: &'static str = "bbbc";
    const FIRST_ITERATION: usize = 1;

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
        if problem.n_objectives() != 1 {
            return Err(Error::ObjectiveCountMismatch {
                expected: 1,
                got: problem.n_objectives(),
            });
        }
        self.agents.reset(problem.dim(), 1);
        self.best = Agent::new(problem.dim(), 1);
        self.center = Point::zeros(problem.dim());
        Ok(())
    }

    fn first_step<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        self.agents.resize(params.population_size);
        for agent in self.agents.as_mut_slice() {
            scatter(&mut self.rng, problem.bounds(), agent.point_mut());
            problem.evaluate(agent)?;
        }
        self.best_index = 0;
        self.best.set_at(&self.agents[0]);
        self.update_best();
        Ok(())
    }

    fn next_step<O: Objective>(&mut self, problem: &Problem<O>, iteration: usize) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let f_best = self.best.value();

        self.weights.clear();
        self.weights.extend(
            self.agents
                .iter()
                .map(|a| 1.0 / (a.value() - f_best + MASS_EPSILON)),
        );
        center_of_mass(
            self.agents
                .iter()
                .zip(&self.weights)
                .map(|(a, &w)| (a.point().as_slice(), w)),
            &mut self.center,
        );

        for (i, agent) in self.agents.as_mut_slice().iter_mut().enumerate() {
            if i == self.best_index {
                continue;
            }
            big_bang(
                &mut self.rng,
                &params,
                problem.bounds(),
                &self.center,
                self.best.point(),
                iteration,
                agent.point_mut(),
            );
            problem.evaluate(agent)?;
        }
        self.update_best();
        Ok(())
    }

    fn output(&self) -> Agent {
        self.best.clone()
    }

    fn clear(&mut self) {
        self.agents.clear();
        self.best_index = 0;
        if self.state == RunState::Done {
            self.state = RunState::ParametersSet;
        }
    }
}
