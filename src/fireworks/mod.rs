//! Fireworks algorithm.
//!
//! Every firework (charge) explodes into a shower of debris around itself.
//! Good charges produce many debris within a small amplitude, poor charges
//! few debris scattered widely. The next generation keeps the best point
//! found and fills the rest with the most isolated survivors, which keeps
//! the population spread out.
//!
//! # Algorithm overview
//!
//! For charge `i` with fitness `fᵢ`:
//! - debris count `sᵢ = M·(f_worst − fᵢ + ε) / (Σⱼ(f_worst − fⱼ) + ε)`,
//!   clamped to `[round(α·M), round(β·M)]`;
//! - amplitude `Aᵢ = Â·(fᵢ − f_best + ε) / (Σⱼ(fⱼ − f_best) + ε)`.
//!
//! Each debris copies its charge and, on a fair coin, either shifts a random
//! subset of axes by `Aᵢ·U(−1, 1)` or scales them by `N(1, 1)`. A
//! coordinate that leaves its bounds is re-sampled uniformly inside them.
//!
//! [`MultiFireworks`] uses the Pareto front index of each charge as its
//! fitness and selects survivors front by front.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `population_size` (NP) | 5 | Charges per iteration |
//! | `max_iterations` | 200 | Iterations per run |
//! | `fecundity` (M) | 50 | Debris budget shared by all charges |
//! | `min_debris_ratio` (α) | 0.04 | Lower debris clamp as a fraction of M |
//! | `max_debris_ratio` (β) | 0.8 | Upper debris clamp as a fraction of M |
//! | `max_amplitude` (Â) | 40.0 | Amplitude budget |
//! | `seed` | random | RNG seed for reproducibility |
//!
//! # Examples
//!
//! ```
//! use blastopt::{Fireworks, FireworksParams, Optimizer, Problem};
//!
//! let problem = Problem::new(vec![-10.0; 2], vec![10.0; 2], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum::<f64>()
//! })
//! .unwrap();
//!
//! let params = FireworksParams::builder().max_iterations(100).seed(9).build().unwrap();
//! let best = Fireworks::with_params(params).unwrap().minimize(&problem).unwrap();
//! assert!(best.value() < 1.0);
//! ```

mod multi;
mod single;

pub use multi::MultiFireworks;
pub use single::Fireworks;

use crate::error::{Error, Result};
use crate::problem::Bounds;
use crate::random::{RandomSource, choose_indices};
use crate::summation::compensated_sum;

/// Keeps the debris and amplitude ratios finite when all charges tie.
pub(crate) const EXPLOSION_EPSILON: f64 = f64::EPSILON;

/// Parameters of [`Fireworks`] and [`MultiFireworks`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireworksParams {
    /// Number of charges.
    pub population_size: usize,
    /// Iterations per run.
    pub max_iterations: usize,
    /// Debris budget M.
    pub fecundity: usize,
    /// Lower debris clamp α, as a fraction of M.
    pub min_debris_ratio: f64,
    /// Upper debris clamp β, as a fraction of M.
    pub max_debris_ratio: f64,
    /// Amplitude budget Â.
    pub max_amplitude: f64,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FireworksParams {
    fn default() -> Self {
        Self {
            population_size: 5,
            max_iterations: 200,
            fecundity: 50,
            min_debris_ratio: 0.04,
            max_debris_ratio: 0.8,
            max_amplitude: 40.0,
            seed: None,
        }
    }
}

impl FireworksParams {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> FireworksParamsBuilder {
        FireworksParamsBuilder::new()
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
        if self.fecundity == 0 {
            return Err(Error::invalid_parameter("fecundity", "must be at least 1"));
        }
        if !(self.min_debris_ratio > 0.0 && self.min_debris_ratio < self.max_debris_ratio) {
            return Err(Error::invalid_parameter(
                "min_debris_ratio",
                format!(
                    "must be positive and below max_debris_ratio ({}), got {}",
                    self.max_debris_ratio, self.min_debris_ratio
                ),
            ));
        }
        if self.max_debris_ratio > 1.0 || self.max_debris_ratio.is_nan() {
            return Err(Error::invalid_parameter(
                "max_debris_ratio",
                format!("must be at most 1, got {}", self.max_debris_ratio),
            ));
        }
        if !(self.max_amplitude.is_finite() && self.max_amplitude > 0.0) {
            return Err(Error::invalid_parameter(
                "max_amplitude",
                format!("must be positive and finite, got {}", self.max_amplitude),
            ));
        }
        Ok(())
    }
}

/// Builder for [`FireworksParams`].
///
/// ```
/// use blastopt::FireworksParams;
///
/// let params = FireworksParams::builder()
///     .population_size(8)
///     .fecundity(80)
///     .debris_ratios(0.05, 0.5)
///     .build()
///     .unwrap();
/// assert_eq!(params.fecundity, 80);
///
/// assert!(FireworksParams::builder().debris_ratios(0.6, 0.5).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FireworksParamsBuilder {
    params: FireworksParams,
}

impl FireworksParamsBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of charges.
    ///
    /// Default: 5.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.params.population_size = size;
        self
    }

    /// Sets the number of iterations per run.
    ///
    /// Default: 200.
    #[must_use]
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.params.max_iterations = n;
        self
    }

    /// Sets the debris budget M shared by all charges of an iteration.
    ///
    /// Default: 50.
    #[must_use]
    pub fn fecundity(mut self, m: usize) -> Self {
        self.params.fecundity = m;
        self
    }

    /// Sets the debris clamps α and β as fractions of M, with
    /// `0 < α < β ≤ 1`.
    ///
    /// Default: 0.04 and 0.8.
    #[must_use]
    pub fn debris_ratios(mut self, min: f64, max: f64) -> Self {
        self.params.min_debris_ratio = min;
        self.params.max_debris_ratio = max;
        self
    }

    /// Sets the amplitude budget Â.
    ///
    /// Default: 40.0.
    #[must_use]
    pub fn max_amplitude(mut self, amplitude: f64) -> Self {
        self.params.max_amplitude = amplitude;
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
    pub fn build(self) -> Result<FireworksParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// How an unclamped debris count is turned into an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DebrisRounding {
    Round,
    Truncate,
}

/// Debris count per charge for the given `fitness` values (lower is
/// better), written into `counts`. The best charge gets at least one.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn debris_counts(
    fitness: &[f64],
    params: &FireworksParams,
    rounding: DebrisRounding,
    counts: &mut Vec<usize>,
) {
    counts.clear();
    let Some(best) = argmin(fitness) else {
        return;
    };
    let worst = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let total = compensated_sum(fitness.iter().map(|f| worst - f));

    let m = params.fecundity as f64;
    let low = params.min_debris_ratio * m;
    let high = params.max_debris_ratio * m;
    counts.extend(fitness.iter().map(|f| {
        let s = m * (worst - f + EXPLOSION_EPSILON) / (total + EXPLOSION_EPSILON);
        let s = if s < low {
            low.round()
        } else if s > high {
            high.round()
        } else {
            match rounding {
                DebrisRounding::Round => s.round(),
                DebrisRounding::Truncate => s.trunc(),
            }
        };
        s as usize
    }));
    counts[best] = counts[best].max(1);
}

/// Explosion amplitude per charge, written into `amplitudes`.
pub(crate) fn amplitudes(fitness: &[f64], params: &FireworksParams, amplitudes: &mut Vec<f64>) {
    amplitudes.clear();
    let best = fitness.iter().copied().fold(f64::INFINITY, f64::min);
    let total = compensated_sum(fitness.iter().map(|f| f - best));
    amplitudes.extend(fitness.iter().map(|f| {
        params.max_amplitude * (f - best + EXPLOSION_EPSILON) / (total + EXPLOSION_EPSILON)
    }));
}

/// Index of the lowest value, first on ties.
pub(crate) fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if best.is_none_or(|b| v < values[b]) {
            best = Some(i);
        }
    }
    best
}

/// Turns the copy of a charge in `x` into a debris point.
///
/// A fair coin picks the additive shift by `amplitude·U(−1, 1)` or the
/// multiplicative scale by `N(1, 1)`, applied to a random non-empty subset
/// of axes.
pub(crate) fn explode(
    rng: &mut fastrand::Rng,
    bounds: &Bounds,
    amplitude: f64,
    x: &mut [f64],
    axes: &mut Vec<usize>,
) {
    let n = x.len();
    let k = 1 + rng.index(n);
    let k = choose_indices(rng, n, k, axes);
    if rng.coin() {
        let shift = amplitude * rng.uniform(-1.0, 1.0);
        for &j in &axes[..k] {
            x[j] += shift;
        }
    } else {
        let scale = rng.normal(1.0, 1.0);
        for &j in &axes[..k] {
            x[j] *= scale;
        }
    }
    for &j in &axes[..k] {
        if !bounds.contains(j, x[j]) {
            x[j] = rng.uniform(bounds.lower()[j], bounds.upper()[j]).min(bounds.upper()[j]);
        }
    }
}
