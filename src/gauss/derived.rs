use log::debug;

use crate::error::{LinalgError, Result};
use crate::gauss::eliminate::{eliminate, forward_pivots};
use crate::gauss::pivot::{PartialPivot, PivotSelector};
use crate::matrix::matrix::Matrix;
use crate::matrix::vector::Vector;
use crate::scalar::Scalar;

/// Determinant by cofactor expansion.
///
/// Expands along the row with the most exactly-zero entries and skips exactly
/// zero terms. Exponential in the size of `a`.
pub fn det<T: Scalar>(a: &Matrix<T>) -> T {
    assert!(a.is_square(), "Matrix is not square");

    match a.rows() {
        1 => a[(0, 0)].clone(),
        2 => a[(0, 0)].clone() * a[(1, 1)].clone() - a[(0, 1)].clone() * a[(1, 0)].clone(),
        n => {
            let row = (0..n)
                .max_by_key(|&i| {
                    // ties go to the first row
                    let zeros = a.columns().filter(|c| c[i].is_zero()).count();
                    (zeros, n - i)
                })
                .unwrap_or(0);

            (0..n)
                .filter(|&j| !a[(row, j)].is_zero())
                .map(|j| {
                    let minor = det(&Matrix::blacklist(a, &[row], &[j]));
                    let term = a[(row, j)].clone() * minor;
                    if (row + j) % 2 == 0 {
                        term
                    } else {
                        -term
                    }
                })
                .sum()
        }
    }
}

/// Gauss-Jordan inverse: reduces `[a | I]` with partial pivoting.
///
/// Returns `false` when `a` is singular (or numerically indistinguishable from
/// singular); `a_inv` is then left untouched.
pub fn inverse<T: Scalar>(a: &Matrix<T>, a_inv: &mut Matrix<T>) -> bool {
    inverse_with(a, &PartialPivot::default(), a_inv)
}

pub fn inverse_with<T, S>(a: &Matrix<T>, selector: &S, a_inv: &mut Matrix<T>) -> bool
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    assert!(a.is_square(), "Matrix is not square");
    assert_eq!(a_inv.size(), a.size(), "Dimensions not compatible");

    let n = a.rows();
    let mut aug = Matrix::augment(a, &Matrix::identity(n));
    eliminate(&mut aug, selector);

    let (left, right) = aug.partition(n);
    if !left.approx_eq(&Matrix::identity(n), selector.epsilon()) {
        debug!("singular {} x {} matrix", n, n);
        return false;
    }
    *a_inv = right;
    true
}

pub fn try_inverse<T: Scalar>(a: &Matrix<T>) -> Result<Matrix<T>> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    let mut a_inv = Matrix::new(a.rows(), a.cols());
    if inverse(a, &mut a_inv) {
        Ok(a_inv)
    } else {
        Err(LinalgError::Singular)
    }
}

pub fn is_invertible<T: Scalar>(a: &Matrix<T>) -> bool {
    a.is_square() && rank(a, &PartialPivot::default()) == a.rows()
}

/// Number of pivots of an echelon form of `a`.
pub fn rank<T, S>(a: &Matrix<T>, selector: &S) -> usize
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    let mut u = a.clone();
    forward_pivots(&mut u, selector).len()
}

/// Unique solution of `a x = b`, if any.
pub fn solve<T, S>(a: &Matrix<T>, b: &Vector<T>, selector: &S) -> Option<Vector<T>>
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    assert_eq!(a.rows(), b.len(), "Dimensions not compatible");
    if !a.is_square() {
        return None;
    }

    let n = a.cols();
    let mut aug = Matrix::augment_vector(a, b);
    eliminate(&mut aug, selector);

    let (left, x) = aug.partition(n);
    if left.approx_eq(&Matrix::identity(n), selector.epsilon()) {
        Some(x.col(0).clone())
    } else {
        None
    }
}

/// `a^k` by repeated multiplication; `a^0` is the identity.
pub fn pow<T: Scalar>(a: &Matrix<T>, k: u32) -> Matrix<T> {
    assert!(a.is_square(), "Matrix is not square");
    (0..k).fold(Matrix::identity(a.rows()), |acc, _| a * &acc)
}

pub fn transpose<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    a.transpose()
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
