//! Distance-weighted diversity selection.
//!
//! Every candidate is weighted by the sum of its distances to all other
//! candidates; the most isolated ones survive. Weights are normalized into
//! pseudo-probabilities with a compensated sum and fall back to uniform
//! weights when the total is zero or not finite.

use crate::agent::AgentPool;
use crate::matrix::SymmetricMatrix;
use crate::ranking::FrontRanker;
use crate::summation::compensated_sum;

/// Reusable buffers for distance-weighted selection.
#[derive(Clone, Debug, Default)]
pub(crate) struct DistanceSelector {
    distances: SymmetricMatrix,
    weights: Vec<f64>,
    order: Vec<usize>,
}

impl DistanceSelector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Positions, among the `n` candidates returned by `point_at`, of the
    /// `count` most isolated ones, most isolated first. Ties keep candidate
    /// order. Returns all positions when `count >= n`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn most_isolated<'a, F>(&mut self, n: usize, count: usize, point_at: F) -> &[usize]
    where
        F: Fn(usize) -> &'a [f64],
    {
        self.order.clear();
        self.order.extend(0..n);
        if count >= n {
            return &self.order;
        }

        self.distances.fill_distances_by(n, point_at);
        self.weights.clear();
        self.weights.extend((0..n).map(|i| self.distances.row_sum(i)));

        let total = compensated_sum(self.weights.iter().copied());
        if total.is_finite() && total > 0.0 {
            for w in &mut self.weights {
                *w /= total;
            }
        } else {
            self.weights.fill(1.0 / n as f64);
        }

        let weights = &self.weights;
        self.order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
        &self.order[..count]
    }

    /// Normalized weights of the last selection round.
    #[cfg(test)]
    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Front admission followed by a distance trim of the first overflowing
/// front.
///
/// Ranks every agent of `pool`, admits whole fronts best-first while the
/// total stays at most `keep`, fills the remainder from the next front by
/// [`DistanceSelector::most_isolated`] in objective space, then compacts the
/// survivors into the first `keep` slots and truncates the pool.
pub(crate) fn survive_by_fronts(
    pool: &mut AgentPool,
    keep: usize,
    ranker: &mut FrontRanker,
    selector: &mut DistanceSelector,
    chosen: &mut Vec<usize>,
) {
    ranker.rank(pool.as_slice());
    chosen.clear();
    for front in ranker.fronts() {
        if chosen.len() + front.len() <= keep {
            chosen.extend_from_slice(front);
            continue;
        }
        let remaining = keep - chosen.len();
        if remaining > 0 {
            let agents = pool.as_slice();
            let picks = selector.most_isolated(front.len(), remaining, |i| {
                agents[front[i]].objectives().as_slice()
            });
            chosen.extend(picks.iter().map(|&p| front[p]));
        }
        break;
    }
    compact(pool, chosen);
}

/// Moves the agents at the handles in `chosen` to slots `0..chosen.len()`
/// by value copy and truncates the pool. Sorts `chosen`.
pub(crate) fn compact(pool: &mut AgentPool, chosen: &mut [usize]) {
    chosen.sort_unstable();
    // Sorted handles satisfy chosen[k] >= k, so no source is overwritten
    // before it is read.
    for (dst, &src) in chosen.iter().enumerate() {
        pool.copy_within(src, dst);
    }
    pool.truncate(chosen.len());
}
