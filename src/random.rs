//! Random-number source used by the optimizers.
//!
//! Every optimizer owns one [`fastrand::Rng`], seeded explicitly through its
//! parameter builder or from entropy. There is no ambient thread-local
//! generator: independent runs on several threads simply use independent
//! optimizer instances, and reproducible fan-out derives per-worker seeds
//! with [`derive_seeds`].

use core::f64::consts::TAU;

use crate::problem::Bounds;

/// Sampling primitives required by the optimizers.
pub trait RandomSource {
    /// Uniform sample in `[low, high)`. Requires `low < high`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Normal sample with the given mean and standard deviation
    /// (`std_dev > 0`).
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;

    /// Uniform index in `0..n`. Requires `n > 0`.
    fn index(&mut self, n: usize) -> usize;

    /// Fair coin: `true` when a uniform draw falls below `0.5`.
    fn coin(&mut self) -> bool {
        self.uniform(0.0, 1.0) < 0.5
    }
}

impl RandomSource for fastrand::Rng {
    #[inline]
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        debug_assert!(low < high);
        low + self.f64() * (high - low)
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        debug_assert!(std_dev > 0.0);
        // Box-Muller; 1 - u keeps the log argument in (0, 1].
        let u1 = 1.0 - self.f64();
        let u2 = self.f64();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }

    #[inline]
    fn index(&mut self, n: usize) -> usize {
        self.usize(0..n)
    }
}

/// Creates a generator from an optional seed.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

/// Derives `n` independent seeds from `seed`, one per worker.
///
/// ```
/// let seeds = blastopt::random::derive_seeds(42, 4);
/// assert_eq!(seeds.len(), 4);
/// assert_eq!(seeds, blastopt::random::derive_seeds(42, 4));
/// ```
#[must_use]
pub fn derive_seeds(seed: u64, n: usize) -> Vec<u64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n).map(|_| rng.u64(..)).collect()
}

/// Fills `out` with a uniformly distributed unit vector.
pub(crate) fn unit_vector(rng: &mut fastrand::Rng, out: &mut [f64]) {
    loop {
        let mut norm_sq = 0.0;
        for v in out.iter_mut() {
            *v = rng.normal(0.0, 1.0);
            norm_sq += *v * *v;
        }
        if norm_sq > f64::MIN_POSITIVE {
            let norm = norm_sq.sqrt();
            for v in out.iter_mut() {
                *v /= norm;
            }
            return;
        }
    }
}

/// Places `out` uniformly inside `bounds`.
pub(crate) fn scatter(rng: &mut fastrand::Rng, bounds: &Bounds, out: &mut [f64]) {
    for (j, x) in out.iter_mut().enumerate() {
        *x = rng.uniform(bounds.lower()[j], bounds.upper()[j]);
    }
    // `low + u·(high − low)` can round one ulp past `high`.
    bounds.clamp(out);
}

/// Picks `k` distinct indices from `0..n` into `out` (partial shuffle of
/// `scratch`).
pub(crate) fn choose_indices(
    rng: &mut fastrand::Rng,
    n: usize,
    k: usize,
    scratch: &mut Vec<usize>,
) -> usize {
    scratch.clear();
    scratch.extend(0..n);
    let k = k.min(n);
    for i in 0..k {
        let j = rng.usize(i..n);
        scratch.swap(i, j);
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_range() {
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..1000 {
            let v = rng.uniform(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = fastrand::Rng::with_seed(7);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| rng.normal(1.0, 2.0)).collect();
        let mean = samples.iter().sum::<f64>() / f64::from(n);
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / f64::from(n);
        assert!((mean - 1.0).abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std {}", var.sqrt());
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_unit_vector_has_unit_norm() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut v = [0.0; 5];
        for _ in 0..100 {
            unit_vector(&mut rng, &mut v);
            let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_choose_indices_distinct() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut scratch = Vec::new();
        let k = choose_indices(&mut rng, 6, 4, &mut scratch);
        let mut picked = scratch[..k].to_vec();
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|&i| i < 6));
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let mut a = rng_from_seed(Some(9));
        let mut b = rng_from_seed(Some(9));
        assert_eq!(a.u64(..), b.u64(..));
        assert_ne!(derive_seeds(1, 3), derive_seeds(2, 3));
    }
}
