use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::utils;

/// Matrix / vector entry. Avoid repeating all the traits.
pub trait Scalar:
    Clone
    + Zero
    + One
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + std::iter::Sum<Self>
    + std::fmt::Display
    + std::fmt::Debug
{
    /// Absolute value.
    fn magnitude(&self) -> Self;

    /// Tolerance-based equality. Exact types ignore `epsilon`.
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;

    /// Closest integer, never negative zero.
    fn nearest_integer(&self) -> Self;

    fn approx_zero(&self, epsilon: f64) -> bool {
        self.approx_eq(&Self::zero(), epsilon)
    }

    /// Nearest integer when within tolerance of one, `self` otherwise.
    fn snap_to_integer(&self, epsilon: f64) -> Self {
        let rounded = self.nearest_integer();
        if self.approx_eq(&rounded, epsilon) {
            rounded
        } else {
            self.clone()
        }
    }
}

impl Scalar for f64 {
    #[inline(always)]
    fn magnitude(&self) -> f64 {
        self.abs()
    }

    #[inline(always)]
    fn approx_eq(&self, other: &f64, epsilon: f64) -> bool {
        utils::approx_equal(*self, *other, epsilon)
    }

    fn nearest_integer(&self) -> f64 {
        let rounded = self.round();
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}

impl Scalar for f32 {
    #[inline(always)]
    fn magnitude(&self) -> f32 {
        self.abs()
    }

    #[inline(always)]
    fn approx_eq(&self, other: &f32, epsilon: f64) -> bool {
        // f32 cannot resolve anything finer than its own epsilon
        let epsilon = epsilon.max(f32::EPSILON as f64);
        utils::approx_equal(*self as f64, *other as f64, epsilon)
    }

    fn nearest_integer(&self) -> f32 {
        let rounded = self.round();
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
