use itertools::Itertools;
use rand::Rng;
use std::fmt;
use std::ops;

use crate::scalar::Scalar;

/// Fixed-length, owned sequence of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T = f64> {
    entries: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// Zero-filled vector of dimension `n`.
    pub fn new(n: usize) -> Self {
        Self::filled(n, T::zero())
    }

    pub fn filled(n: usize, value: T) -> Self {
        assert!(n > 0, "Vector dimension must be positive");
        Vector {
            entries: vec![value; n],
        }
    }

    pub fn from_slice(entries: &[T]) -> Self {
        entries.to_vec().into()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.entries
    }

    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }

    pub fn dot(&self, rhs: &Vector<T>) -> T {
        assert_eq!(self.len(), rhs.len(), "Dimensions not compatible");
        self.iter()
            .zip(rhs.iter())
            .map(|(a, b)| a.clone() * b.clone())
            .sum()
    }

    pub fn approx_eq(&self, rhs: &Vector<T>, epsilon: f64) -> bool {
        self.len() == rhs.len()
            && self
                .iter()
                .zip(rhs.iter())
                .all(|(a, b)| a.approx_eq(b, epsilon))
    }

    /// Snaps near-integer entries to integers.
    pub fn round(&self, epsilon: f64) -> Vector<T> {
        self.iter().map(|x| x.snap_to_integer(epsilon)).collect()
    }

    /// `(x1, .., xn)` -> `(x1, .., xn, 1)`
    pub fn homogenize(&self) -> Vector<T> {
        self.iter().cloned().chain(std::iter::once(T::one())).collect()
    }

    /// `(x1, .., xn, w)` -> `(x1 / w, .., xn / w)`
    pub fn dehomogenize(&self) -> Vector<T> {
        let n = self.len();
        assert!(n > 1, "Cannot dehomogenize a vector of dimension {}", n);
        let w = self.entries[n - 1].clone();
        assert!(!w.is_zero(), "Homogeneous coordinate is zero");
        self.entries[..n - 1]
            .iter()
            .map(|x| x.clone() / w.clone())
            .collect()
    }
}

impl Vector<f64> {
    /// Entries drawn uniformly from `[lo, hi)`.
    pub fn random(n: usize, lo: f64, hi: f64) -> Self {
        Self::random_with(&mut rand::thread_rng(), n, lo, hi)
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R, n: usize, lo: f64, hi: f64) -> Self {
        assert!(n > 0, "Vector dimension must be positive");
        assert!(hi > lo, "Empty range [{}, {})", lo, hi);
        (0..n).map(|_| rng.gen_range(lo..hi)).collect()
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(entries: Vec<T>) -> Self {
        assert!(!entries.is_empty(), "Vector dimension must be positive");
        Vector { entries }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<T>>().into()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> ops::Index<usize> for Vector<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, i: usize) -> &T {
        &self.entries[i]
    }
}

impl<T> ops::IndexMut<usize> for Vector<T> {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.entries[i]
    }
}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.iter().join(", "))
    }
}

impl<T: Scalar> ops::AddAssign<&Vector<T>> for Vector<T> {
    fn add_assign(&mut self, rhs: &Vector<T>) {
        assert_eq!(self.len(), rhs.len(), "Dimensions not compatible");
        for (a, b) in self.entries.iter_mut().zip(rhs.iter()) {
            *a = a.clone() + b.clone();
        }
    }
}

impl<T: Scalar> ops::SubAssign<&Vector<T>> for Vector<T> {
    fn sub_assign(&mut self, rhs: &Vector<T>) {
        assert_eq!(self.len(), rhs.len(), "Dimensions not compatible");
        for (a, b) in self.entries.iter_mut().zip(rhs.iter()) {
            *a = a.clone() - b.clone();
        }
    }
}

impl<T: Scalar> ops::MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, rhs: T) {
        for a in self.entries.iter_mut() {
            *a = a.clone() * rhs.clone();
        }
    }
}

impl<T: Scalar> ops::Add<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: &Vector<T>) -> Vector<T> {
        let mut ret = self.clone();
        ret += rhs;
        ret
    }
}

impl<T: Scalar> ops::Add<Vector<T>> for Vector<T> {
    type Output = Vector<T>;

    fn add(mut self, rhs: Vector<T>) -> Vector<T> {
        self += &rhs;
        self
    }
}

impl<T: Scalar> ops::Sub<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: &Vector<T>) -> Vector<T> {
        let mut ret = self.clone();
        ret -= rhs;
        ret
    }
}

impl<T: Scalar> ops::Sub<Vector<T>> for Vector<T> {
    type Output = Vector<T>;

    fn sub(mut self, rhs: Vector<T>) -> Vector<T> {
        self -= &rhs;
        self
    }
}

impl<T: Scalar> ops::Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.entries.into_iter().map(|x| -x).collect()
    }
}

impl<T: Scalar> ops::Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: T) -> Vector<T> {
        let mut ret = self.clone();
        ret *= rhs;
        ret
    }
}

impl<T: Scalar> ops::Mul<T> for Vector<T> {
    type Output = Vector<T>;

    fn mul(mut self, rhs: T) -> Vector<T> {
        self *= rhs;
        self
    }
}

impl ops::Mul<Vector<f64>> for f64 {
    type Output = Vector<f64>;

    fn mul(self, rhs: Vector<f64>) -> Vector<f64> {
        rhs * self
    }
}

impl ops::Mul<&Vector<f64>> for f64 {
    type Output = Vector<f64>;

    fn mul(self, rhs: &Vector<f64>) -> Vector<f64> {
        rhs * self
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
