//! Adapter between agents and Pareto front ranks.
//!
//! The multi-objective engines never compare objective vectors directly.
//! They ask a [`FrontRanker`] for the front index of every agent and treat
//! that index as a scalar fitness, or iterate the fronts best-first when
//! filling the next population.
//!
//! ```
//! use blastopt::ranking::FrontRanker;
//! use blastopt::{Agent, Point};
//!
//! let agents: Vec<Agent> = [[1.0, 4.0], [4.0, 1.0], [5.0, 5.0]]
//!     .iter()
//!     .map(|o| Agent::from_parts(Point::zeros(1), Point::from(&o[..])))
//!     .collect();
//!
//! let mut ranker = FrontRanker::new();
//! ranker.rank(&agents);
//! assert_eq!(ranker.ranks(), &[0, 0, 1]);
//! assert_eq!(ranker.front(0), &[0, 1]);
//! ```

use crate::agent::Agent;
use crate::pareto;

/// Front ranks and front buckets of the last ranked agent slice.
#[derive(Clone, Debug, Default)]
pub struct FrontRanker {
    ranks: Vec<usize>,
    fronts: Vec<Vec<usize>>,
}

impl FrontRanker {
    /// Creates an empty ranker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts `agents` into non-dominated fronts by their objective vectors.
    ///
    /// Within a front, indices are in ascending order.
    pub fn rank(&mut self, agents: &[Agent]) {
        let objectives: Vec<&[f64]> = agents.iter().map(|a| a.objectives().as_slice()).collect();
        self.fronts = pareto::non_dominated_sort(&objectives);
        self.ranks.clear();
        self.ranks.resize(agents.len(), 0);
        for (rank, front) in self.fronts.iter_mut().enumerate() {
            front.sort_unstable();
            for &i in front.iter() {
                self.ranks[i] = rank;
            }
        }
    }

    /// Front index of every agent, parallel to the ranked slice.
    #[must_use]
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// All fronts, best first.
    #[must_use]
    pub fn fronts(&self) -> &[Vec<usize>] {
        &self.fronts
    }

    /// Members of front `k`, or an empty slice past the last front.
    #[must_use]
    pub fn front(&self, k: usize) -> &[usize] {
        self.fronts.get(k).map(Vec::as_slice).unwrap_or_default()
    }
}

/// How candidates are compared: by the first objective, or by Pareto
/// dominance over all objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ranking {
    /// Lower first objective wins.
    Scalar,
    /// Dominance wins; mutually non-dominated candidates tie.
    Pareto,
}

impl Ranking {
    /// Returns `true` if `a` is strictly better than `b`.
    #[must_use]
    pub fn better(self, a: &Agent, b: &Agent) -> bool {
        match self {
            Self::Scalar => a.value() < b.value(),
            Self::Pareto => pareto::dominates(a.objectives(), b.objectives()),
        }
    }

    /// Orders `agents` best first into `order` and flags the elite into
    /// `elite`. Ties keep index order.
    ///
    /// The scalar elite is the single best agent; the Pareto elite is
    /// front 0.
    pub(crate) fn order(
        self,
        agents: &[Agent],
        ranker: &mut FrontRanker,
        order: &mut Vec<usize>,
        elite: &mut Vec<bool>,
    ) {
        order.clear();
        order.extend(0..agents.len());
        elite.clear();
        elite.resize(agents.len(), false);
        match self {
            Self::Scalar => {
                order.sort_by(|&a, &b| agents[a].value().total_cmp(&agents[b].value()));
                if let Some(&best) = order.first() {
                    elite[best] = true;
                }
            }
            Self::Pareto => {
                ranker.rank(agents);
                let ranks = ranker.ranks();
                order.sort_by_key(|&i| ranks[i]);
                for (flag, &rank) in elite.iter_mut().zip(ranks) {
                    *flag = rank == 0;
                }
            }
        }
    }
}
