use super::{BbbcParams, big_bang, center_of_mass};
use crate::agent::{Agent, AgentPool};
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::optimizer::{Optimizer, RunState};
use crate::point::Point;
use crate::problem::Problem;
use crate::random::{RandomSource, rng_from_seed, scatter};
use crate::ranking::FrontRanker;
use crate::selection::{DistanceSelector, survive_by_fronts};

/// Multi-objective Big Bang–Big Crunch.
///
/// The crunch collapses onto the unweighted mean of the current Pareto
/// front. Each iteration bangs `NP` offspring, each around a randomly
/// chosen front member, then keeps the best `NP` of parents and offspring
/// by front, trimming the last admitted front by objective-space
/// isolation.
///
/// ```
/// use blastopt::{MultiBbbc, BbbcParams, ObjectiveSet, Optimizer, Problem};
///
/// let objectives = ObjectiveSet::new()
///     .with(|x: &[f64]| x[0] * x[0])
///     .with(|x: &[f64]| (x[0] - 2.0) * (x[0] - 2.0));
/// let problem = Problem::new(vec![-5.0], vec![5.0], objectives).unwrap();
///
/// let params = BbbcParams::builder().population_size(10).max_iterations(50).seed(1).build().unwrap();
/// let front = MultiBbbc::with_params(params).unwrap().minimize(&problem).unwrap();
/// assert!(!front.is_empty());
/// assert!(front.len() <= 10);
/// ```
pub struct MultiBbbc {
    params: Option<BbbcParams>,
    state: RunState,
    rng: fastrand::Rng,
    agents: AgentPool,
    ranker: FrontRanker,
    selector: DistanceSelector,
    front: Vec<usize>,
    chosen: Vec<usize>,
    center: Point,
    leader: Point,
}

impl MultiBbbc {
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
            chosen: Vec::new(),
            center: Point::zeros(0),
            leader: Point::zeros(0),
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

    /// Non-dominated members of the current population.
    #[must_use]
    pub fn pareto_front(&self) -> Vec<Agent> {
        self.front.iter().map(|&i| self.agents[i].clone()).collect()
    }

    /// The current population.
    #[must_use]
    pub fn population(&self) -> &[Agent] {
        self.agents.as_slice()
    }

    fn refresh_front(&mut self) {
        self.ranker.rank(self.agents.as_slice());
        self.front.clear();
        self.front.extend_from_slice(self.ranker.front(0));
    }
}

impl Default for MultiBbbc {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MultiBbbc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiBbbc")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("population", &self.agents.len())
            .field("front", &self.front.len())
            .finish_non_exhaustive()
    }
}

impl Optimizer for MultiBbbc {
    type Output = Vec<Agent>;

    const NAME: &'static str = "multi_bbbc";
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
        self.center = Point::zeros(problem.dim());
        self.leader = Point::zeros(problem.dim());
        Ok(())
    }

    fn first_step<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        self.agents.resize(params.population_size);
        for agent in self.agents.as_mut_slice() {
            scatter(&mut self.rng, problem.bounds(), agent.point_mut());
            problem.evaluate(agent)?;
        }
        self.refresh_front();
        Ok(())
    }

    fn next_step<O: Objective>(&mut self, problem: &Problem<O>, iteration: usize) -> Result<()> {
        let params = self.params.ok_or(Error::ParametersNotSet)?;
        let np = params.population_size;

        center_of_mass(
            self.front
                .iter()
                .map(|&i| (self.agents[i].point().as_slice(), 1.0)),
            &mut self.center,
        );

        for _ in 0..np {
            let leader = self.front[self.rng.index(self.front.len())];
            self.leader.copy_from(self.agents[leader].point());
            let child = self.agents.push();
            big_bang(
                &mut self.rng,
                &params,
                problem.bounds(),
                &self.center,
                &self.leader,
                iteration,
                self.agents[child].point_mut(),
            );
            problem.evaluate(&mut self.agents[child])?;
        }

        survive_by_fronts(
            &mut self.agents,
            np,
            &mut self.ranker,
            &mut self.selector,
            &mut self.chosen,
        );
        self.refresh_front();
        trace_debug!(front = self.front.len(), "multi bbbc front updated");
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
