//! Grenade Explosion Method (GEM).
//!
//! Grenades explode into shrapnel within an explosion radius `R_e`; each
//! grenade then moves to its best shrapnel if that beats staying put. A
//! territory radius `R_t` keeps grenades apart: shrapnel landing in a
//! foreign territory is discarded unevaluated. Both radii shrink over the
//! run, so the search narrows from the whole box to local refinement.
//!
//! # Algorithm overview
//!
//! All positions are normalized to `[-1, 1]^n`. For iteration `k` of
//! `Imax`, with `t = k / Imax` and diagonal `D = 2√n`:
//!
//! - `R_t = R_0 / reduct^t`
//! - `m = m_max − t·(m_max − m_min)` and `R_e = D^m · R_t^(1−m)`
//! - step length `R_e^(1−p)·u^p` with `p = max(1/n, ln(R_t/R_e) / ln(T_w))`
//!
//! During the first tenth of the run the elite grenades probe `±R_e` along
//! every axis. The direction to the best probe becomes that grenade's
//! optimal search direction (OSD) and stays with it until it is re-seeded.
//! Shrapnel directions are blended toward the OSD with a weight bounded by
//! `sin(π·t)`, which peaks mid-run.
//!
//! Iterations are counted from 0: iteration 0 places the grenades.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `population_size` | 5 | Number of grenades |
//! | `max_iterations` | 300 | Iterations per run |
//! | `shrapnel` | 30 | Shrapnel pieces per grenade and iteration |
//! | `initial_radius` (`R_0`) | 1.0 | Territory radius at the start, normalized units |
//! | `radius_reduction` | 100 | Factor by which `R_t` shrinks over the run |
//! | `m_min`, `m_max` | 0.1, 0.9 | Range of the radius mixing exponent |
//! | `territory_probability` (`T_w`) | 0.3 | Probability that shrapnel lands inside `R_t` |
//! | `seed` | random | RNG seed for reproducibility |
//!
//! # Examples
//!
//! ```
//! use blastopt::{Gem, GemParams, Optimizer, Problem};
//!
//! let problem = Problem::new(vec![-10.0; 2], vec![10.0; 2], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum::<f64>()
//! })
//! .unwrap();
//!
//! let params = GemParams::builder().max_iterations(100).seed(5).build().unwrap();
//! let best = Gem::with_params(params).unwrap().minimize(&problem).unwrap();
//! assert!(best.value() < 1.0);
//! ```

mod engine;
mod multi;
mod single;

pub use multi::MultiGem;
pub use single::Gem;

use crate::error::{Error, Result};

/// Parameters of [`Gem`] and [`MultiGem`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GemParams {
    /// Number of grenades.
    pub population_size: usize,
    /// Iterations per run.
    pub max_iterations: usize,
    /// Shrapnel pieces per grenade and iteration.
    pub shrapnel: usize,
    /// Territory radius at iteration 0, in normalized units.
    pub initial_radius: f64,
    /// Factor by which the territory radius shrinks over the run.
    pub radius_reduction: f64,
    /// Radius mixing exponent at the end of the run.
    pub m_min: f64,
    /// Radius mixing exponent at the start of the run.
    pub m_max: f64,
    /// Probability that a shrapnel piece lands within the territory radius.
    pub territory_probability: f64,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GemParams {
    fn default() -> Self {
        Self {
            population_size: 5,
            max_iterations: 300,
            shrapnel: 30,
            initial_radius: 1.0,
            radius_reduction: 100.0,
            m_min: 0.1,
            m_max: 0.9,
            territory_probability: 0.3,
            seed: None,
        }
    }
}

impl GemParams {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> GemParamsBuilder {
        GemParamsBuilder::new()
    }

    /// Checks every field that does not depend on the problem.
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
        if self.shrapnel == 0 {
            return Err(Error::invalid_parameter("shrapnel", "must be at least 1"));
        }
        if !(self.initial_radius.is_finite() && self.initial_radius > 0.0) {
            return Err(Error::invalid_parameter(
                "initial_radius",
                format!("must be positive and finite, got {}", self.initial_radius),
            ));
        }
        if !(self.radius_reduction.is_finite() && self.radius_reduction >= 1.0) {
            return Err(Error::invalid_parameter(
                "radius_reduction",
                format!("must be at least 1 and finite, got {}", self.radius_reduction),
            ));
        }
        if !(0.0 <= self.m_min && self.m_min <= self.m_max && self.m_max <= 1.0) {
            return Err(Error::invalid_parameter(
                "m_min",
                format!(
                    "must satisfy 0 <= m_min <= m_max <= 1, got m_min = {}, m_max = {}",
                    self.m_min, self.m_max
                ),
            ));
        }
        if !(self.territory_probability > 0.0 && self.territory_probability < 1.0) {
            return Err(Error::invalid_parameter(
                "territory_probability",
                format!("must be in (0, 1), got {}", self.territory_probability),
            ));
        }
        Ok(())
    }

    /// Checks the initial radius against the diagonal `2√dim` of the
    /// normalized cube.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the radius exceeds the
    /// diagonal.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate_for_dim(&self, dim: usize) -> Result<()> {
        let diagonal = 2.0 * (dim as f64).sqrt();
        if self.initial_radius > diagonal {
            return Err(Error::invalid_parameter(
                "initial_radius",
                format!(
                    "must not exceed the normalized diagonal {diagonal} for {dim} dimensions, got {}",
                    self.initial_radius
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for [`GemParams`].
///
/// ```
/// use blastopt::GemParams;
///
/// let params = GemParams::builder()
///     .population_size(8)
///     .shrapnel(50)
///     .initial_radius(0.5)
///     .mixing_exponents(0.2, 0.8)
///     .build()
///     .unwrap();
/// assert_eq!(params.shrapnel, 50);
///
/// assert!(GemParams::builder().territory_probability(1.0).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GemParamsBuilder {
    params: GemParams,
}

impl GemParamsBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of grenades.
    ///
    /// Default: 5.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.params.population_size = size;
        self
    }

    /// Sets the number of iterations per run.
    ///
    /// Default: 300.
    #[must_use]
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.params.max_iterations = n;
        self
    }

    /// Sets the shrapnel pieces thrown by each grenade per iteration.
    ///
    /// Default: 30.
    #[must_use]
    pub fn shrapnel(mut self, n: usize) -> Self {
        self.params.shrapnel = n;
        self
    }

    /// Sets the territory radius at iteration 0, in normalized units. It
    /// must not exceed `2√n` for an `n`-dimensional problem.
    ///
    /// Default: 1.0.
    #[must_use]
    pub fn initial_radius(mut self, radius: f64) -> Self {
        self.params.initial_radius = radius;
        self
    }

    /// Sets the factor by which the territory radius shrinks over the run.
    ///
    /// Default: 100.
    #[must_use]
    pub fn radius_reduction(mut self, factor: f64) -> Self {
        self.params.radius_reduction = factor;
        self
    }

    /// Sets the range of the radius mixing exponent, `0 ≤ min ≤ max ≤ 1`.
    ///
    /// Default: 0.1 and 0.9.
    #[must_use]
    pub fn mixing_exponents(mut self, min: f64, max: f64) -> Self {
        self.params.m_min = min;
        self.params.m_max = max;
        self
    }

    /// Sets the probability that shrapnel lands within the territory
    /// radius, in `(0, 1)`.
    ///
    /// Default: 0.3.
    #[must_use]
    pub fn territory_probability(mut self, p: f64) -> Self {
        self.params.territory_probability = p;
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
    pub fn build(self) -> Result<GemParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}
