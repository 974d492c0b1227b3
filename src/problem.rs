//! Box-constrained problem definitions.
//!
//! A [`Problem`] couples validated [`Bounds`] with an
//! [`Objective`](crate::Objective). Construction checks the bounds once;
//! optimizers then rely on them without further validation.
//!
//! ```
//! use blastopt::{Error, Problem};
//!
//! let problem = Problem::new(vec![-10.0, -10.0], vec![10.0, 10.0], |x: &[f64]| {
//!     x[0] * x[0] + x[1] * x[1]
//! })
//! .unwrap();
//! assert_eq!(problem.dim(), 2);
//!
//! let bad = Problem::new(vec![1.0], vec![0.0], |x: &[f64]| x[0]);
//! assert!(matches!(bad, Err(Error::InvalidBounds { index: 0, .. })));
//! ```

use crate::agent::Agent;
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::point::Point;

/// Per-axis lower and upper bounds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Validates and creates bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBounds`] for empty vectors,
    /// [`Error::BoundsLengthMismatch`] if the lengths differ, and
    /// [`Error::InvalidBounds`] if any axis has `lower >= upper` or a
    /// non-finite bound.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(Error::BoundsLengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(Error::EmptyBounds);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(Error::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Same bounds `[lower, upper]` on each of `dim` axes.
    ///
    /// # Errors
    ///
    /// See [`Bounds::new`].
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(vec![lower; dim], vec![upper; dim])
    }

    /// Number of axes.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Width of axis `i`.
    #[must_use]
    pub fn range(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }

    /// Returns `true` if `value` lies within the bounds of axis `i`.
    #[must_use]
    pub fn contains(&self, i: usize, value: f64) -> bool {
        (self.lower[i]..=self.upper[i]).contains(&value)
    }

    /// Returns `true` if every coordinate of `x` is within bounds.
    #[must_use]
    pub fn contains_point(&self, x: &[f64]) -> bool {
        x.iter().enumerate().all(|(i, &v)| self.contains(i, v))
    }

    /// Clamps every coordinate of `x` into its axis bounds.
    pub fn clamp(&self, x: &mut [f64]) {
        for (i, v) in x.iter_mut().enumerate() {
            *v = v.clamp(self.lower[i], self.upper[i]);
        }
    }

    /// Maps a coordinate from `[-1, 1]` to axis `i`.
    #[must_use]
    pub fn denormalize(&self, i: usize, unit: f64) -> f64 {
        self.lower[i] + (unit + 1.0) * 0.5 * self.range(i)
    }

    /// Maps a coordinate of axis `i` to `[-1, 1]`.
    #[must_use]
    pub fn normalize(&self, i: usize, value: f64) -> f64 {
        2.0 * (value - self.lower[i]) / self.range(i) - 1.0
    }
}

/// Bounds plus the objective to minimize over them.
#[derive(Debug)]
pub struct Problem<O> {
    bounds: Bounds,
    objective: O,
}

impl<O: Objective> Problem<O> {
    /// Creates a problem, validating the bounds.
    ///
    /// # Errors
    ///
    /// See [`Bounds::new`]. Also returns
    /// [`Error::ObjectiveCountMismatch`] if the objective reports zero
    /// outputs.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>, objective: O) -> Result<Self> {
        Self::with_bounds(Bounds::new(lower, upper)?, objective)
    }

    /// Creates a problem from already validated bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectiveCountMismatch`] if the objective reports
    /// zero outputs.
    pub fn with_bounds(bounds: Bounds, objective: O) -> Result<Self> {
        if objective.n_objectives() == 0 {
            return Err(Error::ObjectiveCountMismatch {
                expected: 1,
                got: 0,
            });
        }
        Ok(Self { bounds, objective })
    }

    /// The bounds.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Number of decision variables.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.bounds.dim()
    }

    /// Number of objectives.
    #[must_use]
    pub fn n_objectives(&self) -> usize {
        self.objective.n_objectives()
    }

    /// The objective.
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Evaluates the agent's decision vector into its objective vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteObjective`] carrying the point and the
    /// index of the first non-finite output.
    pub fn evaluate(&self, agent: &mut Agent) -> Result<()> {
        let (point, objectives) = agent.parts_mut();
        self.objective.evaluate(point, objectives);
        check_finite(point, objectives)
    }

    /// Evaluates a bare decision vector into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteObjective`] on NaN or infinite values.
    pub fn evaluate_into(&self, x: &[f64], out: &mut Point) -> Result<()> {
        self.objective.evaluate(x, out);
        check_finite(x, out)
    }
}

fn check_finite(x: &[f64], values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFiniteObjective {
            point: x.to_vec(),
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
