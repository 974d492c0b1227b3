//! Grenade bookkeeping shared by [`Gem`](super::Gem) and
//! [`MultiGem`](super::MultiGem).
//!
//! Positions live in the normalized cube `[-1, 1]^n`; every evaluation maps
//! them to the problem bounds first, so each grenade carries both its unit
//! position and its agent in real coordinates.

use core::f64::consts::PI;

use super::GemParams;
use crate::agent::{Agent, AgentPool};
use crate::error::Result;
use crate::objective::Objective;
use crate::point::{Point, distance};
use crate::problem::Problem;
use crate::random::{RandomSource, unit_vector};
use crate::ranking::{FrontRanker, Ranking};

/// Attempts to find an isolated position before accepting a crowded one.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Fraction of the run during which elite grenades probe axis directions.
const OSD_PHASE: f64 = 0.1;

/// Radii and exponents of one iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Schedule {
    /// Minimum distance between grenades, `R_t`.
    pub(crate) territory: f64,
    /// Maximum shrapnel reach, `R_e`.
    pub(crate) explosion: f64,
    /// Exponent `p` of the step length `R_e^(1-p)·u^p`.
    pub(crate) exponent: f64,
    /// Upper bound of the blend weight toward a grenade's OSD direction.
    pub(crate) osd_weight: f64,
    /// Whether elite grenades probe axis directions this iteration.
    pub(crate) osd_phase: bool,
}

impl Schedule {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn at(params: &GemParams, dim: usize, iteration: usize) -> Self {
        let n = dim as f64;
        let t = iteration as f64 / params.max_iterations as f64;
        let diagonal = 2.0 * n.sqrt();

        let territory = params.initial_radius / params.radius_reduction.powf(t);
        let m = params.m_max - t * (params.m_max - params.m_min);
        let explosion = diagonal.powf(m) * territory.powf(1.0 - m);
        let exponent = ((territory / explosion).ln() / params.territory_probability.ln()).max(1.0 / n);

        Self {
            territory,
            explosion,
            exponent,
            osd_weight: (PI * t).sin(),
            osd_phase: t < OSD_PHASE,
        }
    }

    /// Shrapnel reach for a uniform draw `u` in `[0, 1)`. Never exceeds
    /// `R_e^(1-p)`.
    pub(crate) fn step_length(&self, u: f64) -> f64 {
        self.explosion.powf(1.0 - self.exponent) * u.powf(self.exponent)
    }
}

/// A position in the unit cube and its evaluation.
#[derive(Clone, Debug)]
struct Candidate {
    unit: Point,
    agent: Agent,
}

impl Candidate {
    fn new(dim: usize, n_objectives: usize) -> Self {
        Self {
            unit: Point::zeros(dim),
            agent: Agent::new(dim, n_objectives),
        }
    }

    fn evaluate<O: Objective>(&mut self, problem: &Problem<O>) -> Result<()> {
        let bounds = problem.bounds();
        for (j, x) in self.agent.point_mut().iter_mut().enumerate() {
            *x = bounds.denormalize(j, self.unit[j]);
        }
        self.agent.clamp_to(bounds);
        problem.evaluate(&mut self.agent)
    }

    fn set_at(&mut self, other: &Candidate) {
        self.unit.copy_from(&other.unit);
        self.agent.set_at(&other.agent);
    }
}

/// The candidate a grenade moves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Choice {
    Current,
    Osd,
    Shrapnel,
}

/// First present candidate that no later candidate strictly beats.
fn choose(
    ranking: Ranking,
    current: Option<&Agent>,
    osd: Option<&Agent>,
    shrapnel: Option<&Agent>,
) -> Option<Choice> {
    let mut pick: Option<(Choice, &Agent)> = None;
    for (choice, candidate) in [
        (Choice::Current, current),
        (Choice::Osd, osd),
        (Choice::Shrapnel, shrapnel),
    ] {
        let Some(candidate) = candidate else {
            continue;
        };
        match pick {
            Some((_, held)) if !ranking.better(candidate, held) => {}
            _ => pick = Some((choice, candidate)),
        }
    }
    pick.map(|(choice, _)| choice)
}

/// Returns `true` if `x` lies closer than `radius` to any grenade but
/// `skip`.
fn collides(units: &[Point], skip: Option<usize>, x: &[f64], radius: f64) -> bool {
    units
        .iter()
        .enumerate()
        .any(|(i, u)| Some(i) != skip && distance(u, x) < radius)
}

/// Moves `x` back along the segment toward `origin` (inside the cube) until
/// it lies in `[-1, 1]^n`.
fn pull_back(x: &mut [f64], origin: &[f64]) {
    let mut scale: f64 = 1.0;
    for (&v, &o) in x.iter().zip(origin) {
        if v > 1.0 {
            scale = scale.min((1.0 - o) / (v - o));
        } else if v < -1.0 {
            scale = scale.min((-1.0 - o) / (v - o));
        }
    }
    if scale < 1.0 {
        for (v, &o) in x.iter_mut().zip(origin) {
            *v = (o + scale * (*v - o)).clamp(-1.0, 1.0);
        }
    }
}

fn random_unit(rng: &mut fastrand::Rng, out: &mut [f64]) {
    for v in out {
        *v = rng.uniform(-1.0, 1.0);
    }
}

/// The grenade population and its scratch buffers.
#[derive(Clone, Debug)]
pub(crate) struct Grenades {
    ranking: Ranking,
    agents: AgentPool,
    units: Vec<Point>,
    order: Vec<usize>,
    elite: Vec<bool>,
    ranker: FrontRanker,
    probe: Candidate,
    osd: Candidate,
    shrapnel: Candidate,
    best_shrapnel: Candidate,
    placement: Candidate,
    direction: Point,
    /// Unit direction toward each grenade's OSD point, kept for the rest of
    /// the run once probing finds one.
    osd_directions: Vec<Option<Point>>,
}

impl Grenades {
    pub(crate) fn new(ranking: Ranking) -> Self {
        Self {
            ranking,
            agents: AgentPool::default(),
            units: Vec::new(),
            order: Vec::new(),
            elite: Vec::new(),
            ranker: FrontRanker::new(),
            probe: Candidate::new(0, 1),
            osd: Candidate::new(0, 1),
            shrapnel: Candidate::new(0, 1),
            best_shrapnel: Candidate::new(0, 1),
            placement: Candidate::new(0, 1),
            direction: Point::zeros(0),
            osd_directions: Vec::new(),
        }
    }

    /// Grenades in real coordinates.
    pub(crate) fn agents(&self) -> &[Agent] {
        self.agents.as_slice()
    }

    /// Front-0 grenades, recomputed from the current positions.
    pub(crate) fn front(&mut self) -> &[usize] {
        self.ranker.rank(self.agents.as_slice());
        self.ranker.front(0)
    }

    pub(crate) fn clear(&mut self) {
        self.agents.clear();
        self.units.clear();
        self.osd_directions.clear();
    }

    /// Sizes every buffer for `problem`.
    pub(crate) fn reset<O: Objective>(&mut self, problem: &Problem<O>) {
        let (dim, n_obj) = (problem.dim(), problem.n_objectives());
        self.agents.reset(dim, n_obj);
        self.units.clear();
        for c in [
            &mut self.probe,
            &mut self.osd,
            &mut self.shrapnel,
            &mut self.best_shrapnel,
            &mut self.placement,
        ] {
            *c = Candidate::new(dim, n_obj);
        }
        self.direction = Point::zeros(dim);
        self.osd_directions.clear();
    }

    /// Places `count` grenades, each preferably farther than `territory`
    /// from those placed before it.
    pub(crate) fn place<O: Objective>(
        &mut self,
        rng: &mut fastrand::Rng,
        problem: &Problem<O>,
        count: usize,
        territory: f64,
    ) -> Result<()> {
        self.agents.clear();
        self.units.clear();
        self.osd_directions.clear();
        self.osd_directions.resize(count, None);
        for _ in 0..count {
            self.find_isolated(rng, None, territory);
            self.placement.evaluate(problem)?;
            let handle = self.agents.push_copy(&self.placement.agent);
            debug_assert_eq!(handle, self.units.len());
            self.units.push(self.placement.unit.clone());
        }
        Ok(())
    }

    /// Writes a random position into `self.placement.unit`, retrying while
    /// it collides with a grenade other than `skip`.
    fn find_isolated(&mut self, rng: &mut fastrand::Rng, skip: Option<usize>, territory: f64) {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            random_unit(rng, &mut self.placement.unit);
            if !collides(&self.units, skip, &self.placement.unit, territory) {
                return;
            }
        }
    }

    /// Runs one iteration: every grenade, in rank order, explodes and moves.
    pub(crate) fn step<O: Objective>(
        &mut self,
        rng: &mut fastrand::Rng,
        problem: &Problem<O>,
        params: &GemParams,
        schedule: &Schedule,
    ) -> Result<()> {
        self.ranking.order(
            self.agents.as_slice(),
            &mut self.ranker,
            &mut self.order,
            &mut self.elite,
        );
        for k in 0..self.order.len() {
            let g = self.order[k];
            self.explode(rng, problem, params, schedule, g)?;
        }
        Ok(())
    }

    fn explode<O: Objective>(
        &mut self,
        rng: &mut fastrand::Rng,
        problem: &Problem<O>,
        params: &GemParams,
        schedule: &Schedule,
        g: usize,
    ) -> Result<()> {
        let osd_found = if schedule.osd_phase && self.elite[g] {
            self.probe_axes(rng, problem, schedule, g)?
        } else {
            false
        };

        if osd_found {
            let mut toward = self.osd.unit.clone();
            toward -= &self.units[g];
            self.osd_directions[g] = normalize(&mut toward).then_some(toward);
        }

        let mut shrapnel_found = false;
        for _ in 0..params.shrapnel {
            unit_vector(rng, &mut self.direction);
            if let Some(osd) = &self.osd_directions[g] {
                let w = schedule.osd_weight * rng.uniform(0.0, 1.0);
                for (d, &o) in self.direction.iter_mut().zip(osd.iter()) {
                    *d = w * o + (1.0 - w) * *d;
                }
                normalize(&mut self.direction);
            }
            let length = schedule.step_length(rng.uniform(0.0, 1.0));
            let origin = &self.units[g];
            for ((s, &o), &d) in self
                .shrapnel
                .unit
                .iter_mut()
                .zip(origin.iter())
                .zip(self.direction.iter())
            {
                *s = o + length * d;
            }
            pull_back(&mut self.shrapnel.unit, origin);
            if collides(&self.units, Some(g), &self.shrapnel.unit, schedule.territory) {
                continue;
            }
            self.shrapnel.evaluate(problem)?;
            if !shrapnel_found || self.ranking.better(&self.shrapnel.agent, &self.best_shrapnel.agent) {
                self.best_shrapnel.set_at(&self.shrapnel);
                shrapnel_found = true;
            }
        }

        let isolated = !collides(&self.units, Some(g), &self.units[g], schedule.territory);
        let choice = choose(
            self.ranking,
            isolated.then_some(&self.agents[g]),
            osd_found.then_some(&self.osd.agent),
            shrapnel_found.then_some(&self.best_shrapnel.agent),
        );
        match choice {
            Some(Choice::Current) => {}
            Some(Choice::Osd) => {
                self.agents[g].set_at(&self.osd.agent);
                self.units[g].copy_from(&self.osd.unit);
            }
            Some(Choice::Shrapnel) => {
                self.agents[g].set_at(&self.best_shrapnel.agent);
                self.units[g].copy_from(&self.best_shrapnel.unit);
            }
            None => {
                self.find_isolated(rng, Some(g), schedule.territory);
                self.placement.evaluate(problem)?;
                self.agents[g].set_at(&self.placement.agent);
                self.units[g].copy_from(&self.placement.unit);
                self.osd_directions[g] = None;
                trace_debug!(grenade = g, "grenade re-seeded");
            }
        }
        Ok(())
    }

    /// Probes `±R_e·U(0, 1)` along every axis from grenade `g` and keeps the
    /// best isolated probe in `self.osd`. Returns whether one was found.
    fn probe_axes<O: Objective>(
        &mut self,
        rng: &mut fastrand::Rng,
        problem: &Problem<O>,
        schedule: &Schedule,
        g: usize,
    ) -> Result<bool> {
        let mut found = false;
        for q in 0..2 * self.units[g].dim() {
            let axis = q / 2;
            let sign = if q % 2 == 0 { 1.0 } else { -1.0 };
            self.probe.unit.copy_from(&self.units[g]);
            let moved = self.units[g][axis] + sign * schedule.explosion * rng.uniform(0.0, 1.0);
            self.probe.unit[axis] = moved.clamp(-1.0, 1.0);
            if collides(&self.units, Some(g), &self.probe.unit, schedule.territory) {
                continue;
            }
            self.probe.evaluate(problem)?;
            if !found || self.ranking.better(&self.probe.agent, &self.osd.agent) {
                self.osd.set_at(&self.probe);
                found = true;
            }
        }
        Ok(found)
    }
}

/// Scales `v` to unit length. Returns `false`, leaving `v` untouched, when
/// its norm is zero.
fn normalize(v: &mut Point) -> bool {
    let norm = v.norm();
    if norm > 0.0 {
        *v *= 1.0 / norm;
        true
    } else {
        false
    }
}
