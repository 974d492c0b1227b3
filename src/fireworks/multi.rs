use super::{DebrisRounding, FireworksParams, amplitudes, debris_counts, explode};
use crate::agent::{Agent, AgentPool};
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::optimizer::{Optimizer, RunState};
use crate::problem::Problem;
use crate::random::{rng_from_seed, scatter};
use crate::ranking::FrontRanker;
use crate::selection::{DistanceSelector, survive_by_fronts};

/// Multi-objective fireworks algorithm.
///
/// The explosion formulas see the front index of each charge as its
/// fitness, so every charge of the Pareto front explodes with the largest
/// shower and the smallest amplitude. Survivors are chosen front by front,
/// trimming the last admitted front by objective-space isolation.
///
/// ```
/// use blastopt::{FireworksParams, MultiFireworks, ObjectiveSet, Optimizer, Problem};
///
/// let objectives = ObjectiveSet::new()
///     .with(|x: &[f64]| x[0])
///     .with(|x: &[f64]| 1.0 - x[0] + x[1]);
/// let problem = Problem::new(vec![0.0; 2], vec![1.0; 2], objectives).unwrap();
///
/// let params = FireworksParams::builder().population_size(8).max_iterations(30).seed(2).build().unwrap();
/// let front = MultiFireworks::with_params(params).unwrap().minimize(&problem).unwrap();
/// assert!(!front.is_empty() && front.len() <= 8);
/// ```
pub struct MultiFireworks {
    params: Option<FireworksParams>,
    state: RunState,
    rng: fastrand::Rng,
    agents: AgentPool,
    ranker: FrontRanker,
    selector: DistanceSelector,
    front: Vec<usize>,
    fitness: Vec<f64>,
    counts: Vec<usize>,
    amplitudes: Vec<f64>,
    axes: Vec<usize>,
    chosen: Vec<usize>,
}

impl MultiFireworks {
    /// Creates an engine without parameters. It must receive
    /// [`initialize_parameters`](Self::initialize_parameters) before a run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: None,
            state: RunState::Uninitialized,
            rng: fastrand::Rng::new(),
            agents: AgentPool::default(),
            ranker: FrontRanker::new(),
            selector: DistanceSelector::new(),
            front: Vec::new(),
            fitness: Vec::new(),
            counts: Vec::new(),
            amplitudes: Vec::new(),
            axes: Vec::new(),
            chosen: Vec::new(),
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

    /// Non-dominated charges.
    #[must_use]
    pub fn pareto_front(&self) -> Vec<Agent> {
        self.front.iter().map(|&i| self.agents[i].clone()).collect()
    }

    /// The current charges.
    #[must_use]
    pub fn population(&self) -> &[Agent] {
        self.agents.as_slice()
    }

    /// Ranks the charges and records front 0 and the rank-based fitness.
    #[allow(clippy::cast_precision_loss)]
    fn rank_charges(&mut self) {
        self.ranker.rank(self.agents.as_slice());
        self.front.clear();
        self.front.extend_from_slice(self.ranker.front(0));
        self.fitness.clear();
        self.fitness
            .extend(self.ranker.ranks().iter().map(|&r| r as f64));
    }
}

impl Default for MultiFireworks {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MultiFireworks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiFireworks")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("population", &self.agents.len())
            .field("front", &self.front.len())
            .finish_non_exhaustive()
    }
}

impl Optimizer for MultiFireworks {
    type Output = Vec<Agent>;

    const NAME: &'static str = "multi_fireworks";
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
        self.agents.reset(problem.dim(), problem.n_objectives());
        self.front.clear();
        Ok(())
    }

    fn first_step<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        self.agents.resize(params.population_size);
        for agent in self.agents.as_mut_slice() {
            scatter(&mut self.rng, problem.bounds(), agent.point_mut());
            problem.evaluate(agent)?;
        }
        self.rank_charges();
        Ok(())
    }

    fn next_step<O: Objective>(&mut self, problem: &Problem<O>, _iteration: usize) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let charges = self.agents.len();

        debris_counts(&self.fitness, &params, DebrisRounding::Truncate, &mut self.counts);
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

        survive_by_fronts(
            &mut self.agents,
            params.population_size,
            &mut self.ranker,
            &mut self.selector,
            &mut self.chosen,
        );
        self.rank_charges();
        trace_debug!(front = self.front.len(), "multi fireworks front updated");
        Ok(())
    }

    fn output(&self) -> Vec<Agent> {
        self.pareto_front()
    }

    fn clear(&mut self) {
        self.agents.clear();
        self.front.clear();
        if self.state == RunState::Done {
            self.state = RunState::ParametersSet;
        }
    }
}
