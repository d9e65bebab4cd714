use log::debug;
use std::collections::BTreeSet;

use crate::gauss::pivot::PivotSelector;
use crate::matrix::matrix::Matrix;
use crate::scalar::Scalar;

/// Gaussian elimination in place: on return `a` is in reduced echelon form.
///
/// The backward pass reuses the pivots picked by `selector`, so a selector
/// may accept pivots smaller than its own `epsilon()`.
pub fn eliminate<T, S>(a: &mut Matrix<T>, selector: &S)
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    let pivots = forward_pivots(a, selector);
    reduce_above(a, &pivots);
}

/// Applies row operations to `a`; on return `a` is in echelon form.
///
/// The active submatrix has its top-left corner at `(r, c)`. A column without
/// an acceptable pivot advances `c` only; a pivot advances both.
pub fn forward_reduce<T, S>(a: &mut Matrix<T>, selector: &S)
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    forward_pivots(a, selector);
}

/// [`forward_reduce`], returning the `(row, col)` of every pivot in order.
pub(crate) fn forward_pivots<T, S>(a: &mut Matrix<T>, selector: &S) -> Vec<(usize, usize)>
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    let (m, n) = a.size();
    let (mut r, mut c) = (0, 0);
    let mut pivots = Vec::with_capacity(m.min(n));

    while r < m && c < n {
        let available: BTreeSet<usize> = (r..m).collect();
        let Some(p) = selector.select(a.col(c), &available) else {
            debug!("no pivot in column {}", c);
            c += 1;
            continue;
        };
        assert!(available.contains(&p), "Pivot row {} already used", p);
        assert!(!a[(p, c)].is_zero(), "Pivot at ({}, {}) is zero", p, c);
        debug!("pivot at ({}, {}), moved to row {}", p, c, r);

        a.swap_rows_from(r, p, c);

        // Use the pivot to create zeros below it.
        let pivot = a[(r, c)].clone();
        for k in r + 1..m {
            if a[(k, c)].is_zero() {
                continue;
            }
            let f = -(a[(k, c)].clone() / pivot.clone());
            a.replace_row_from(k, r, f, c);
            a[(k, c)] = T::zero();
        }

        pivots.push((r, c));
        r += 1;
        c += 1;
    }
    pivots
}

/// Applies row operations to the echelon matrix `u`; on return `u` is in
/// reduced echelon form.
///
/// Panics if `u` is not in echelon form.
pub fn backward_reduce<T: Scalar>(u: &mut Matrix<T>, epsilon: f64) {
    assert!(u.is_echelon(epsilon), "Matrix is not in echelon form");

    let pivots: Vec<(usize, usize)> = (0..u.rows())
        .filter_map(|i| u.leading_col(i, epsilon).map(|j| (i, j)))
        .collect();
    reduce_above(u, &pivots);
}

/// Zeros the entries above each pivot and scales pivot rows to a leading 1.
/// `pivots` lists `(row, col)` pairs of an echelon matrix, top to bottom.
fn reduce_above<T: Scalar>(u: &mut Matrix<T>, pivots: &[(usize, usize)]) {
    for &(i, j) in pivots.iter().rev() {
        // Use the pivot to create zeros above it.
        let pivot = u[(i, j)].clone();
        for k in (0..i).rev() {
            if u[(k, j)].is_zero() {
                continue;
            }
            let f = -(u[(k, j)].clone() / pivot.clone());
            u.replace_row_from(k, i, f, j);
            u[(k, j)] = T::zero();
        }

        u.scale_row_from(i, T::one() / pivot, j);
        u[(i, j)] = T::one();
    }
}

/// Scales every nonzero row so that its largest magnitude entry is 1.
pub fn normalize_rows<T: Scalar>(a: &mut Matrix<T>, epsilon: f64) {
    for i in 0..a.rows() {
        let max_val = a
            .columns()
            .map(|c| c[i].magnitude())
            .fold(T::zero(), |acc, x| if x > acc { x } else { acc });
        if !max_val.approx_zero(epsilon) {
            a.scale_row(i, T::one() / max_val);
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauss::pivot::{FirstNonzeroPivot, PartialPivot};
    use crate::rings::rational::Rational;
    use crate::utils::{init_test_logger, DEFAULT_EPSILON};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn m(lines: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(lines)
    }

    #[test]
    fn test_eliminate_two_pivots() {
        init_test_logger();
        let mut a = m(vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![4.0, 5.0, 6.0, 7.0],
            vec![6.0, 7.0, 8.0, 9.0],
        ]);
        eliminate(&mut a, &PartialPivot::default());
        assert_eq!(
            a.round(1e-6),
            m(vec![
                vec![1.0, 0.0, -1.0, -2.0],
                vec![0.0, 1.0, 2.0, 3.0],
                vec![0.0, 0.0, 0.0, 0.0],
            ])
        );
        assert!(a.is_rref(DEFAULT_EPSILON));
    }

    #[test]
    fn test_eliminate_three_pivots() {
        let mut a = m(vec![
            vec![36.0, 51.0, 13.0, 33.0],
            vec![52.0, 34.0, 74.0, 45.0],
            vec![0.0, 7.0, 1.1, 3.0],
        ]);
        eliminate(&mut a, &PartialPivot::default());
        assert!(a.approx_eq(
            &m(vec![
                vec![1.0, 0.0, 0.0, 0.277223],
                vec![0.0, 1.0, 0.0, 0.391921],
                vec![0.0, 0.0, 1.0, 0.233231],
            ]),
            1e-5
        ));
    }

    #[test]
    fn test_eliminate_four_pivots() {
        let mut a = m(vec![
            vec![12.0, -7.0, 0.0, -4.0, 40.0],
            vec![-7.0, 15.0, -6.0, 0.0, 30.0],
            vec![0.0, -6.0, 14.0, -5.0, 20.0],
            vec![-4.0, 0.0, -5.0, 13.0, -10.0],
        ]);
        eliminate(&mut a, &FirstNonzeroPivot::default());
        assert!(a.approx_eq(
            &m(vec![
                vec![1.0, 0.0, 0.0, 0.0, 11.4342],
                vec![0.0, 1.0, 0.0, 0.0, 10.5502],
                vec![0.0, 0.0, 1.0, 0.0, 8.03566],
                vec![0.0, 0.0, 0.0, 1.0, 5.83961],
            ]),
            1e-5
        ));
    }

    #[test]
    fn test_forward_reduce_skips_zero_column() {
        let mut a = m(vec![
            vec![0.0, 2.0, 4.0],
            vec![0.0, 1.0, 3.0],
            vec![0.0, 0.0, 0.0],
        ]);
        forward_reduce(&mut a, &PartialPivot::default());
        assert_eq!(
            a,
            m(vec![
                vec![0.0, 2.0, 4.0],
                vec![0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ])
        );
        backward_reduce(&mut a, DEFAULT_EPSILON);
        assert_eq!(
            a,
            m(vec![
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ])
        );
    }

    #[test]
    fn test_forward_reduce_exact() {
        let q = |n: i64| Rational::from(n);
        let mut a = Matrix::from_rows(vec![
            vec![q(2), q(1), q(-1)],
            vec![q(-3), q(-1), q(2)],
            vec![q(-2), q(1), q(2)],
        ]);
        forward_reduce(&mut a, &FirstNonzeroPivot::default());
        assert_eq!(
            a.to_list(),
            vec![
                vec![q(2), q(1), q(-1)],
                vec![q(0), "1/2".parse().unwrap(), "1/2".parse().unwrap()],
                vec![q(0), q(0), q(-1)],
            ]
        );
        backward_reduce(&mut a, 0.0);
        assert_eq!(a, Matrix::identity(3));
    }

    #[test]
    fn test_eliminate_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(42);
        for (rows, cols) in [(3, 5), (5, 3), (4, 4)] {
            let mut a = Matrix::random_with(&mut rng, rows, cols, -10.0, 10.0);
            // force rank deficiency
            let dup = a.row(0);
            for j in 0..cols {
                a[(rows - 1, j)] = dup[j] * 2.0;
            }

            eliminate(&mut a, &PartialPivot::default());
            assert!(a.is_rref(1e-9), "{}", a);

            let mut b = a.clone();
            eliminate(&mut b, &PartialPivot::default());
            assert!(b.approx_eq(&a, 1e-9));
        }
    }

    #[test]
    fn test_user_defined_selector() {
        let last_nonzero = |c: &crate::matrix::vector::Vector<f64>, rows: &BTreeSet<usize>| {
            rows.iter().rev().copied().find(|&i| c[i] != 0.0)
        };
        let mut a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        eliminate(&mut a, &last_nonzero);
        assert!(a.approx_eq(&Matrix::identity(2), 1e-12));
    }

    #[test]
    fn test_user_defined_selector_accepts_tiny_pivot() {
        let first_nonzero = |c: &crate::matrix::vector::Vector<f64>, rows: &BTreeSet<usize>| {
            rows.iter().copied().find(|&i| c[i] != 0.0)
        };
        let mut a = m(vec![vec![1e-12, 1.0], vec![1.0, 1.0]]);
        eliminate(&mut a, &first_nonzero);
        assert_eq!(a, Matrix::identity(2));
    }

    #[test]
    #[should_panic(expected = "is zero")]
    fn test_selector_must_pick_nonzero_pivot() {
        let zero = |_: &crate::matrix::vector::Vector<f64>, rows: &BTreeSet<usize>| {
            rows.iter().copied().next()
        };
        let mut a = m(vec![vec![0.0, 1.0], vec![1.0, 1.0]]);
        forward_reduce(&mut a, &zero);
    }

    #[test]
    #[should_panic(expected = "already used")]
    fn test_selector_must_pick_available_row() {
        let cheat = |_: &crate::matrix::vector::Vector<f64>, _: &BTreeSet<usize>| Some(0usize);
        let mut a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        forward_reduce(&mut a, &cheat);
    }

    #[test]
    #[should_panic(expected = "not in echelon form")]
    fn test_backward_reduce_rejects_non_echelon() {
        let mut a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        backward_reduce(&mut a, DEFAULT_EPSILON);
    }

    #[test]
    fn test_normalize_rows() {
        let mut a = m(vec![vec![2.0, -8.0], vec![0.0, 0.0], vec![0.5, 0.25]]);
        normalize_rows(&mut a, DEFAULT_EPSILON);
        assert_eq!(
            a,
            m(vec![vec![0.25, -1.0], vec![0.0, 0.0], vec![1.0, 0.5]])
        );
    }
}
