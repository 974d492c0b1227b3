//! Big Bang–Big Crunch (BBBC).
//!
//! Each iteration contracts the population into a fitness-weighted center of
//! mass (the crunch) and scatters it again around that center (the bang).
//! The scatter is normally distributed with a standard deviation that
//! shrinks as `α·range/k` over the iterations, so the search anneals from
//! exploration to exploitation.
//!
//! # Algorithm overview
//!
//! 1. **Big bang**: `NP` agents are placed uniformly inside the bounds.
//! 2. **Big crunch**: weights `wᵢ = 1 / (fᵢ − f_best + ε)` give the center
//!    of mass `c = Σ wᵢ·xᵢ / Σ wᵢ`.
//! 3. **Big bang**: every agent except the best is regenerated as
//!    `x' = β·c + (1 − β)·best + N(0, 1)·α·range / k`, clamped to the
//!    bounds.
//!
//! [`MultiBbbc`] crunches onto the mean of the current Pareto front and
//! regenerates around a random front member.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `population_size` (NP) | 20 | Agents per iteration |
//! | `max_iterations` | 500 | Iterations per run |
//! | `alpha` (α) | 1.0 | Scale of the bang relative to the axis range |
//! | `beta` (β) | 0.25 | Pull of the center of mass versus the best agent |
//! | `seed` | random | RNG seed for reproducibility |
//!
//! # Examples
//!
//! ```
//! use blastopt::{Bbbc, BbbcParams, Optimizer, Problem};
//!
//! let problem = Problem::new(vec![-10.0; 3], vec![10.0; 3], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum::<f64>()
//! })
//! .unwrap();
//!
//! let params = BbbcParams::builder()
//!     .population_size(30)
//!     .max_iterations(200)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let best = Bbbc::with_params(params).unwrap().minimize(&problem).unwrap();
//! assert!(best.value() < 0.1);
//! ```

mod multi;
mod single;

pub use multi::MultiBbbc;
pub use single::Bbbc;

use crate::error::{Error, Result};
use crate::point::Point;
use crate::problem::Bounds;
use crate::random::RandomSource;
use crate::summation::compensated_sum;

/// Added to fitness gaps so the best agent gets a finite weight.
pub(crate) const MASS_EPSILON: f64 = 1e-10;

/// Parameters of [`Bbbc`] and [`MultiBbbc`].
///
/// Built and validated by [`BbbcParams::builder`]; the `Default` value
/// holds the documented defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BbbcParams {
    /// Number of agents.
    pub population_size: usize,
    /// Iterations per run.
    pub max_iterations: usize,
    /// Scale of the bang relative to each axis range.
    pub alpha: f64,
    /// Weight of the center of mass against the best agent, in `[0, 1]`.
    pub beta: f64,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BbbcParams {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_iterations: 500,
            alpha: 1.0,
            beta: 0.25,
            seed: None,
        }
    }
}

impl BbbcParams {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> BbbcParamsBuilder {
        BbbcParamsBuilder::new()
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::invalid_parameter("population_size", "must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid_parameter("max_iterations", "must be at least 1"));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(Error::invalid_parameter(
                "alpha",
                format!("must be positive and finite, got {}", self.alpha),
            ));
        }
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(Error::invalid_parameter(
                "beta",
                format!("must be in [0, 1], got {}", self.beta),
            ));
        }
        Ok(())
    }
}

/// Builder for [`BbbcParams`].
///
/// ```
/// use blastopt::BbbcParams;
///
/// let params = BbbcParams::builder().alpha(0.5).beta(0.1).seed(3).build().unwrap();
/// assert_eq!(params.population_size, 20);
///
/// assert!(BbbcParams::builder().beta(1.5).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BbbcParamsBuilder {
    params: BbbcParams,
}

impl BbbcParamsBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of agents.
    ///
    /// Default: 20.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.params.population_size = size;
        self
    }

    /// Sets the number of iterations per run.
    ///
    /// Default: 500.
    #[must_use]
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.params.max_iterations = n;
        self
    }

    /// Sets α, the scale of the bang. Larger values explore longer.
    ///
    /// Default: 1.0.
    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Sets β, the pull of the center of mass. `0` regenerates around the
    /// best agent only, `1` around the center only.
    ///
    /// Default: 0.25.
    #[must_use]
    pub fn beta(mut self, beta: f64) -> Self {
        self.params.beta = beta;
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// Validates and returns the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any field is out of range.
    pub fn build(self) -> Result<BbbcParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Writes into `center` the weighted mean of the `(point, weight)` pairs.
///
/// Weights are normalized by their compensated sum; when that sum is zero
/// or not finite every member counts equally.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn center_of_mass<'a, I>(members: I, center: &mut Point)
where
    I: Iterator<Item = (&'a [f64], f64)> + Clone,
{
    center.fill(0.0);
    let total = compensated_sum(members.clone().map(|(_, w)| w));
    let uniform = if total.is_finite() && total > 0.0 {
        None
    } else {
        Some(1.0 / members.clone().count() as f64)
    };
    for (x, w) in members {
        let w = uniform.unwrap_or(w / total);
        for (c, &v) in center.iter_mut().zip(x) {
            *c += w * v;
        }
    }
}

/// Regenerates `out` around `center` and `best` for iteration `k`, clamped
/// to `bounds`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn big_bang(
    rng: &mut fastrand::Rng,
    params: &BbbcParams,
    bounds: &Bounds,
    center: &[f64],
    best: &[f64],
    k: usize,
    out: &mut [f64],
) {
    let shrink = params.alpha / k as f64;
    for (j, x) in out.iter_mut().enumerate() {
        let anchor = params.beta * center[j] + (1.0 - params.beta) * best[j];
        *x = anchor + rng.normal(0.0, 1.0) * shrink * bounds.range(j);
    }
    bounds.clamp(out);
}
