//! The [`Objective`] trait defines what gets minimized.
//!
//! Plain closures returning one value are objectives already:
//!
//! ```
//! use blastopt::Objective;
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let mut out = [0.0];
//! sphere.evaluate(&[1.0, 2.0], &mut out);
//! assert_eq!(out[0], 5.0);
//! assert_eq!(sphere.n_objectives(), 1);
//! ```
//!
//! For Pareto optimization, bundle several closures into an
//! [`ObjectiveSet`], or wrap a closure that returns all values at once in a
//! [`VectorObjective`]:
//!
//! ```
//! use blastopt::{Objective, ObjectiveSet, VectorObjective};
//!
//! let set = ObjectiveSet::new()
//!     .with(|x: &[f64]| x[0])
//!     .with(|x: &[f64]| 1.0 - x[0]);
//! assert_eq!(set.n_objectives(), 2);
//!
//! let vector = VectorObjective::new(2, |x: &[f64]| vec![x[0], 1.0 - x[0]]);
//! let mut out = [0.0; 2];
//! vector.evaluate(&[0.25], &mut out);
//! assert_eq!(out, [0.25, 0.75]);
//! ```
//!
//! Objectives must return finite values. A NaN or infinity is reported by
//! [`Problem::evaluate`](crate::Problem::evaluate) as
//! [`Error::NonFiniteObjective`](crate::Error::NonFiniteObjective).

/// A function from a decision vector to one or more objective values, all
/// of which are minimized.
pub trait Objective {
    /// Number of values written by [`evaluate`](Objective::evaluate).
    fn n_objectives(&self) -> usize;

    /// Evaluates the decision vector `x`, writing one value per objective
    /// into `out` (`out.len() == self.n_objectives()`).
    fn evaluate(&self, x: &[f64], out: &mut [f64]);
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn n_objectives(&self) -> usize {
        1
    }

    fn evaluate(&self, x: &[f64], out: &mut [f64]) {
        out[0] = self(x);
    }
}

type BoxedFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Several scalar objectives evaluated on the same decision vector.
#[derive(Default)]
pub struct ObjectiveSet {
    functions: Vec<BoxedFn>,
}

impl ObjectiveSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an objective.
    #[must_use]
    pub fn with(mut self, f: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        self.functions.push(Box::new(f));
        self
    }

    /// Appends an objective in place.
    pub fn push(&mut self, f: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) {
        self.functions.push(Box::new(f));
    }
}

impl core::fmt::Debug for ObjectiveSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectiveSet")
            .field("n_objectives", &self.functions.len())
            .finish()
    }
}

impl Objective for ObjectiveSet {
    fn n_objectives(&self) -> usize {
        self.functions.len()
    }

    fn evaluate(&self, x: &[f64], out: &mut [f64]) {
        for (slot, f) in out.iter_mut().zip(&self.functions) {
            *slot = f(x);
        }
    }
}

/// A closure returning all objective values at once.
///
/// The closure must always return exactly `n_objectives` values; missing
/// values are reported as NaN so the evaluation fails loudly.
pub struct VectorObjective<F> {
    n_objectives: usize,
    f: F,
}

impl<F> VectorObjective<F>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    /// Wraps `f`, which returns `n_objectives` values.
    pub fn new(n_objectives: usize, f: F) -> Self {
        Self { n_objectives, f }
    }
}

impl<F> core::fmt::Debug for VectorObjective<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VectorObjective")
            .field("n_objectives", &self.n_objectives)
            .finish_non_exhaustive()
    }
}

impl<F> Objective for VectorObjective<F>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    fn n_objectives(&self) -> usize {
        self.n_objectives
    }

    fn evaluate(&self, x: &[f64], out: &mut [f64]) {
        let values = (self.f)(x);
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = values.get(i).copied().unwrap_or(f64::NAN);
        }
    }
}
