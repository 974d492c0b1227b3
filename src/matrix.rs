//! Compact symmetric matrix used as a pairwise distance cache.
//!
//! Only the lower triangle (diagonal included) is stored: entry `(i, j)`
//! with `i >= j` lives at `i * (i + 1) / 2 + j`, and `(j, i)` maps to the
//! same cell. Symmetry is therefore structural rather than maintained.

use crate::point::distance;

/// Symmetric `n × n` matrix stored in `n (n + 1) / 2` cells.
#[derive(Clone, Debug, Default)]
pub struct SymmetricMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SymmetricMatrix {
    /// Creates a zero-filled matrix of order `n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; cells(n)],
        }
    }

    /// Changes the order to `n`, reusing the allocation. All cells are reset
    /// to zero.
    pub fn resize(&mut self, n: usize) {
        self.n = n;
        self.data.clear();
        self.data.resize(cells(n), 0.0);
    }

    /// The order of the matrix.
    #[must_use]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Returns the entry at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    /// Sets the entry at `(i, j)` (and thereby `(j, i)`).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] = value;
    }

    /// Sum of row `i`.
    #[must_use]
    pub fn row_sum(&self, i: usize) -> f64 {
        (0..self.n).map(|j| self.get(i, j)).sum()
    }

    /// Recomputes the matrix as the Euclidean distances between `points`.
    ///
    /// The matrix is resized to `points.len()`; the diagonal is zero.
    pub fn fill_distances<P: AsRef<[f64]>>(&mut self, points: &[P]) {
        self.fill_distances_by(points.len(), |i| points[i].as_ref());
    }

    /// Recomputes the matrix as the Euclidean distances between the `n`
    /// points returned by `point_at`.
    pub fn fill_distances_by<'a, F>(&mut self, n: usize, point_at: F)
    where
        F: Fn(usize) -> &'a [f64],
    {
        self.resize(n);
        for i in 1..n {
            let pi = point_at(i);
            for j in 0..i {
                let d = distance(pi, point_at(j));
                self.set(i, j, d);
            }
        }
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.n && j < self.n,
            "index ({i}, {j}) out of range for order {}",
            self.n
        );
        let (hi, lo) = if i >= j { (i, j) } else { (j, i) };
        hi * (hi + 1) / 2 + lo
    }
}

fn cells(n: usize) -> usize {
    n * (n + 1) / 2
}
