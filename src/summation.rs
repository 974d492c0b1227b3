//! Compensated floating-point summation.
//!
//! [`CompensatedSum`] implements Neumaier's variant of Kahan summation. It
//! carries the low-order bits lost by each addition in a separate
//! compensation term, so sums of terms with wildly different magnitudes
//! (probability-weight denominators, for instance) do not cancel
//! catastrophically.
//!
//! ```
//! use blastopt::CompensatedSum;
//!
//! let s: CompensatedSum = [1.0, 1e100, 1.0, -1e100].into_iter().collect();
//! assert_eq!(s.value(), 2.0);
//! ```

use core::iter::Sum;
use core::ops::AddAssign;

/// Running sum with error compensation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    /// Creates an empty sum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the sum.
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// The compensated total.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }

    /// Resets to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl AddAssign<f64> for CompensatedSum {
    fn add_assign(&mut self, rhs: f64) {
        self.add(rhs);
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl Sum<f64> for CompensatedSum {
    fn sum<I: Iterator<Item = f64>>(iter: I) -> Self {
        iter.collect()
    }
}

/// Compensated sum of `values`.
pub(crate) fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().collect::<CompensatedSum>().value()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_large_cancellation() {
        let s: CompensatedSum = [1e10, 1.0, -1e10].into_iter().collect();
        assert!((s.value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_beats_naive_summation() {
        let values = [1.0, 1e100, 1.0, -1e100];
        let naive: f64 = values.iter().sum();
        assert_eq!(naive, 0.0);
        assert_eq!(compensated_sum(values), 2.0);
    }

    #[test]
    fn test_many_small_terms() {
        let mut s = CompensatedSum::new();
        for _ in 0..10_000_000 {
            s += 0.1;
        }
        assert!((s.value() - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut s: CompensatedSum = [3.0, 4.0].into_iter().sum();
        assert_eq!(s.value(), 7.0);
        s.reset();
        assert_eq!(s.value(), 0.0);
    }
}
