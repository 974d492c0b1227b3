//! Fixed-length real vectors.
//!
//! [`Point`] is the coordinate type shared by decision vectors and
//! objective vectors. Its dimension is fixed at creation; the arithmetic
//! operators work on references so inner loops can reuse buffers, and the
//! in-place forms (`+=`, `-=`, `*=`, [`Point::copy_from`]) never allocate.
//!
//! ```
//! use blastopt::Point;
//!
//! let a = Point::from(vec![3.0, 0.0]);
//! let b = Point::from(vec![0.0, 4.0]);
//! assert_eq!(a.distance(&b), 5.0);
//!
//! let mid = &(&a + &b) * 0.5;
//! assert_eq!(mid.as_slice(), &[1.5, 2.0]);
//! ```

use core::ops::{Add, AddAssign, Deref, DerefMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// An ordered sequence of `f64` with a fixed dimension.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Point(Vec<f64>);

impl Point {
    /// Creates a point of dimension `dim` with all coordinates zero.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    /// Returns the number of coordinates.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Returns the coordinates as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the coordinates as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// Consumes the point, returning its coordinates.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Euclidean distance to `other`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the dimensions differ.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        distance(&self.0, &other.0)
    }

    /// Copies the coordinates of `other` into `self` without reallocating
    /// when the dimensions match.
    pub fn copy_from(&mut self, other: &Self) {
        self.copy_from_slice_values(&other.0);
    }

    /// Copies `values` into `self`, resizing if needed.
    pub fn copy_from_slice_values(&mut self, values: &[f64]) {
        if self.0.len() == values.len() {
            self.0.copy_from_slice(values);
        } else {
            self.0.clear();
            self.0.extend_from_slice(values);
        }
    }

    /// Sets every coordinate to `value`.
    pub fn fill(&mut self, value: f64) {
        self.0.fill(value);
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// Euclidean distance between two equally sized slices.
pub(crate) fn distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

impl From<Vec<f64>> for Point {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for Point {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl From<Point> for Vec<f64> {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl FromIterator<f64> for Point {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for Point {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Point {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for Point {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl AddAssign<&Point> for Point {
    fn add_assign(&mut self, rhs: &Point) {
        debug_assert_eq!(self.dim(), rhs.dim());
        for (a, b) in self.0.iter_mut().zip(&rhs.0) {
            *a += b;
        }
    }
}

impl SubAssign<&Point> for Point {
    fn sub_assign(&mut self, rhs: &Point) {
        debug_assert_eq!(self.dim(), rhs.dim());
        for (a, b) in self.0.iter_mut().zip(&rhs.0) {
            *a -= b;
        }
    }
}

impl MulAssign<f64> for Point {
    fn mul_assign(&mut self, rhs: f64) {
        for a in &mut self.0 {
            *a *= rhs;
        }
    }
}

impl Add for &Point {
    type Output = Point;

    fn add(self, rhs: &Point) -> Point {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Sub for &Point {
    type Output = Point;

    fn sub(self, rhs: &Point) -> Point {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Mul<f64> for &Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        let mut out = self.clone();
        out *= rhs;
        out
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        self.0.iter().map(|v| -v).collect()
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(mut self) -> Point {
        for v in &mut self.0 {
            *v = -*v;
        }
        self
    }
}
