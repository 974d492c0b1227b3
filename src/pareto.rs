//! Pareto dominance and non-dominated sorting.
//!
//! Every objective is minimized. The multi-objective engines consume the
//! sort as a black box: given objective vectors, [`front_ranks`] returns a
//! parallel array of front indices where `0` is the non-dominated set and
//! larger values are dominated more.
//!
//! # Available functions
//!
//! | Function | Purpose |
//! |---|---|
//! | [`dominates`] | Pareto dominance test between two objective vectors |
//! | [`non_dominated_sort`] | Rank solutions into successive fronts (front 0, 1, …) |
//! | [`front_ranks`] | Front index per solution, parallel to the input |
//! | [`pareto_front_indices`] | Filter to non-dominated solutions only |
//! | [`hypervolume`] | Measure the quality of a front (volume of dominated space) |
//!
//! # Example
//!
//! ```
//! use blastopt::pareto::{front_ranks, hypervolume, non_dominated_sort, pareto_front_indices};
//!
//! let solutions = vec![
//!     vec![1.0, 5.0], // Pareto-optimal
//!     vec![5.0, 1.0], // Pareto-optimal
//!     vec![3.0, 3.0], // Pareto-optimal
//!     vec![4.0, 4.0], // Dominated by (3, 3)
//! ];
//!
//! let fronts = non_dominated_sort(&solutions);
//! assert_eq!(fronts.len(), 2);
//! assert_eq!(front_ranks(&solutions), vec![0, 0, 0, 1]);
//!
//! let mut front = pareto_front_indices(&solutions);
//! front.sort();
//! assert_eq!(front, vec![0, 1, 2]);
//!
//! let front_values: Vec<_> = front.iter().map(|&i| solutions[i].clone()).collect();
//! assert!(hypervolume(&front_values, &[6.0, 6.0]) > 0.0);
//! ```

/// Returns `true` if `a` Pareto-dominates `b`: no worse in every objective
/// and strictly better in at least one.
#[must_use]
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting (Deb et al., 2002).
///
/// Returns the fronts as index lists into `values`; `fronts[0]` is the
/// Pareto front. Complexity: O(M × N²).
pub(crate) fn fast_non_dominated_sort<V: AsRef<[f64]>>(values: &[V]) -> Vec<Vec<usize>> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    // S_p: set of solutions dominated by p
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    // n_p: domination count for p
    let mut domination_count: Vec<usize> = vec![0; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let (vi, vj) = (values[i].as_ref(), values[j].as_ref());
            if dominates(vi, vj) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(vj, vi) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front: Vec<usize> = Vec::new();
        for &p in &current_front {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        fronts.push(current_front);
        current_front = next_front;
    }

    fronts
}

/// Compute non-dominated sorting of a set of solutions.
///
/// Return a vec of fronts, where `fronts[0]` is the Pareto front
/// (non-dominated solutions), `fronts[1]` is the next-best front
/// (dominated only by front 0), and so on. Each inner vec contains
/// indices into `solutions`.
#[must_use]
pub fn non_dominated_sort<V: AsRef<[f64]>>(solutions: &[V]) -> Vec<Vec<usize>> {
    fast_non_dominated_sort(solutions)
}

/// Front index of every solution, parallel to `solutions`.
#[must_use]
pub fn front_ranks<V: AsRef<[f64]>>(solutions: &[V]) -> Vec<usize> {
    let mut ranks = vec![0; solutions.len()];
    for (rank, front) in fast_non_dominated_sort(solutions).iter().enumerate() {
        for &i in front {
            ranks[i] = rank;
        }
    }
    ranks
}

/// Filter solutions to return only non-dominated (Pareto-optimal) indices.
#[must_use]
pub fn pareto_front_indices<V: AsRef<[f64]>>(solutions: &[V]) -> Vec<usize> {
    fast_non_dominated_sort(solutions)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Compute the hypervolume indicator of a Pareto front.
///
/// The hypervolume is the volume of the objective space dominated by the
/// front and bounded by `reference_point`. A **higher** hypervolume
/// indicates a better front. Solutions that do not strictly dominate the
/// reference point are ignored.
#[must_use]
pub fn hypervolume<V: AsRef<[f64]>>(front: &[V], reference_point: &[f64]) -> f64 {
    let d = reference_point.len();
    debug_assert!(front.iter().all(|p| p.as_ref().len() == d));

    let filtered: Vec<Vec<f64>> = front
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| p.iter().zip(reference_point).all(|(&pv, &rv)| pv < rv))
        .map(<[f64]>::to_vec)
        .collect();

    if filtered.is_empty() {
        return 0.0;
    }

    hv_recursive(&filtered, reference_point)
}

/// Recursive hypervolume via slicing on the last objective.
fn hv_recursive(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();

    // Base case: 1-D hypervolume is just the gap from the best point to ref.
    if d == 1 {
        let min_val = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return (reference[0] - min_val).max(0.0);
    }

    if points.len() == 1 {
        return points[0]
            .iter()
            .zip(reference)
            .map(|(&p, &r)| (r - p).max(0.0))
            .product();
    }

    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| a[d - 1].total_cmp(&b[d - 1]));

    let sub_ref = &reference[..d - 1];
    let mut result = 0.0;

    for i in 0..sorted.len() {
        let height = if i + 1 < sorted.len() {
            sorted[i + 1][d - 1] - sorted[i][d - 1]
        } else {
            reference[d - 1] - sorted[i][d - 1]
        };

        if height <= 0.0 {
            continue;
        }

        // Project points[0..=i] onto the first d-1 dimensions and keep only
        // the non-dominated subset.
        let projected: Vec<Vec<f64>> = sorted[..=i].iter().map(|p| p[..d - 1].to_vec()).collect();
        let non_dom: Vec<Vec<f64>> = pareto_front_indices(&projected)
            .into_iter()
            .map(|k| projected[k].clone())
            .collect();

        if !non_dom.is_empty() {
            result += height * hv_recursive(&non_dom, sub_ref);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominates_basic() {
        assert!(dominates(&[1.0, 1.0], &[2.0, 2.0]));
        assert!(!dominates(&[2.0, 2.0], &[1.0, 1.0]));
        // Equal does not dominate
        assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0]));
        assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
    }

    #[test]
    fn test_dominates_incomparable() {
        assert!(!dominates(&[1.0, 3.0], &[3.0, 1.0]));
        assert!(!dominates(&[3.0, 1.0], &[1.0, 3.0]));
    }

    #[test]
    fn test_nds_known() {
        let values = vec![
            vec![1.0, 5.0], // front 0
            vec![5.0, 1.0], // front 0
            vec![3.0, 3.0], // front 0 (non-dominated)
            vec![4.0, 4.0], // front 1 (dominated by #2)
            vec![6.0, 6.0], // front 2
        ];
        let fronts = fast_non_dominated_sort(&values);

        assert_eq!(fronts.len(), 3);
        let mut f0 = fronts[0].clone();
        f0.sort_unstable();
        assert_eq!(f0, vec![0, 1, 2]);
        assert_eq!(fronts[1], vec![3]);
        assert_eq!(fronts[2], vec![4]);
        assert_eq!(front_ranks(&values), vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_duplicates_share_a_front() {
        let values = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        assert_eq!(front_ranks(&values), vec![0, 0, 1]);
    }

    #[test]
    fn test_single_objective_ranks_are_sorted_order() {
        let values = vec![vec![3.0], vec![1.0], vec![2.0], vec![1.0]];
        assert_eq!(front_ranks(&values), vec![2, 0, 1, 0]);
    }

    #[test]
    fn test_hypervolume_2d() {
        // Front: (1,3), (2,2), (3,1) with ref (4,4)
        let front = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
        let hv = hypervolume(&front, &[4.0, 4.0]);
        // Strips of area 1, 2 and 3
        assert!((hv - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_hypervolume_single_point() {
        let front = vec![vec![1.0, 1.0]];
        assert!((hypervolume(&front, &[3.0, 3.0]) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_hypervolume_empty_front() {
        let front: Vec<Vec<f64>> = vec![];
        assert!(hypervolume(&front, &[1.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hypervolume_point_at_ref() {
        // Point not strictly better than ref → contributes nothing
        let front = vec![vec![5.0, 5.0]];
        assert!(hypervolume(&front, &[5.0, 5.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hypervolume_3d() {
        let front = vec![vec![1.0, 1.0, 1.0]];
        assert!((hypervolume(&front, &[2.0, 2.0, 2.0]) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_pareto_front_indices_empty() {
        let values: Vec<Vec<f64>> = vec![];
        assert!(pareto_front_indices(&values).is_empty());
    }
}
