use super::{DebrisRounding, FireworksParams, amplitudes, argmin, debris_counts, explode};
use crate::agent::{Agent, AgentPool};
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::optimizer::{Optimizer, RunState};
use crate::problem::Problem;
use crate::random::{rng_from_seed, scatter};
use crate::selection::{DistanceSelector, compact};

/// Single-objective fireworks algorithm.
///
/// Charges occupy the first `NP` slots of the pool; debris is appended
/// behind them and the survivors are compacted back to the front.
pub struct Fireworks {
    params: Option<FireworksParams>,
    state: RunState,
    rng: fastrand::Rng,
    agents: AgentPool,
    best: Agent,
    selector: DistanceSelector,
    fitness: Vec<f64>,
    counts: Vec<usize>,
    amplitudes: Vec<f64>,
    axes: Vec<usize>,
    candidates: Vec<usize>,
    survivors: Vec<usize>,
}

impl Fireworks {
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
            selector: DistanceSelector::new(),
            fitness: Vec::new(),
            counts: Vec::new(),
            amplitudes: Vec::new(),
            axes: Vec::new(),
            candidates: Vec::new(),
            survivors: Vec::new(),
        }
    }

    /// Creates an engine ready to run with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` does not validate.
    pub fn with_params(params: FireworksParams) -> Result<Self> {
        let mut engine = Self::new();
        engine.initialize_parameters(params)?;
        Ok(engine)
    }

    /// Stores `params` and reseeds the generator when a seed is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` does not validate.
    pub fn initialize_parameters(&mut self, params: FireworksParams) -> Result<()> {
        params.validate()?;
        self.rng = rng_from_seed(params.seed);
        self.params = Some(params);
        self.state = RunState::ParametersSet;
        Ok(())
    }

    /// The parameters, if set.
    #[must_use]
    pub fn params(&self) -> Option<&FireworksParams> {
        self.params.as_ref()
    }

    /// The best agent of the last completed run.
    #[must_use]
    pub fn solution(&self) -> Option<&Agent> {
        (self.state == RunState::Done).then_some(&self.best)
    }

    /// The current charges.
    #[must_use]
    pub fn population(&self) -> &[Agent] {
        self.agents.as_slice()
    }

    /// Keeps the best agent and the `keep - 1` most isolated others.
    fn select(&mut self, keep: usize) {
        self.fitness.clear();
        self.fitness.extend(self.agents.iter().map(Agent::value));
        let Some(best) = argmin(&self.fitness) else {
            return;
        };
        self.best.set_at(&self.agents[best]);
        trace_debug!(value = self.best.value(), "fireworks generation best");

        self.candidates.clear();
        self.candidates
            .extend((0..self.agents.len()).filter(|&i| i != best));

        let agents = self.agents.as_slice();
        let candidates = &self.candidates;
        let picks = self
            .selector
            .most_isolated(candidates.len(), keep - 1, |k| {
                agents[candidates[k]].point().as_slice()
            });

        self.survivors.clear();
        self.survivors.push(best);
        self.survivors.extend(picks.iter().map(|&p| candidates[p]));
        compact(&mut self.agents, &mut self.survivors);
    }
}

impl Default for Fireworks {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Fireworks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fireworks")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("population", &self.agents.len())
            .finish_non_exhaustive()
    }
}

impl Optimizer for Fireworks {
    type Output = Agent;

    const NAME: &'static str = "fireworks";
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
        Ok(())
    }

    fn first_step<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        self.agents.resize(params.population_size);
        for agent in self.agents.as_mut_slice() {
            scatter(&mut self.rng, problem.bounds(), agent.point_mut());
            problem.evaluate(agent)?;
        }
        self.fitness.clear();
        self.fitness.extend(self.agents.iter().map(Agent::value));
        if let Some(best) = argmin(&self.fitness) {
            self.best.set_at(&self.agents[best]);
        }
        Ok(())
    }

    fn next_step<O: Objective>(&mut self, problem: &Problem<O>, _iteration: usize) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let charges = self.agents.len();

        self.fitness.clear();
        self.fitness.extend(self.agents.iter().map(Agent::value));
        debris_counts(&self.fitness, &params, DebrisRounding::Round, &mut self.counts);
        amplitudes(&self.fitness, &params, &mut self.amplitudes);

        for charge in 0..charges {
            for _ in 0..self.counts[charge] {
                let debris = self.agents.push();
                self.agents.copy_within(charge, debris);
                explode(
                    &mut self.rng,
                    problem.bounds(),
                    self.amplitudes[charge],
                    self.agents[debris].point_mut(),
                    &mut self.axes,
                );
                problem.evaluate(&mut self.agents[debris])?;
            }
        }

        self.select(params.population_size);
        Ok(())
    }

    fn output(&self) -> Agent {
        self.best.clone()
    }

    fn clear(&mut self) {
        self.agents.clear();
        if self.state == RunState::Done {
            self.state = RunState::ParametersSet;
        }
    }
}
