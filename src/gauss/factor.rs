use log::debug;
use std::collections::BTreeSet;

use crate::gauss::pivot::PivotSelector;
use crate::matrix::matrix::Matrix;
use crate::scalar::Scalar;

/// LU factorization of the `m x n` matrix `a`.
///
/// On return `l` (`m x m`) is a row-permuted unit lower triangular matrix, `u`
/// (`m x n`) is an echelon form of `a`, and `a = l * u`. Never fails: rank
/// deficiency shows up as zero rows in `u` and identity columns in `l`.
pub fn factor<T, S>(a: &Matrix<T>, selector: &S, l: &mut Matrix<T>, u: &mut Matrix<T>)
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    let (m, n) = a.size();
    assert_eq!(l.size(), (m, m), "L must be {} x {}", m, m);
    assert_eq!(u.size(), (m, n), "U must be {} x {}", m, n);

    l.fill(T::zero());
    let mut v = a.clone();
    // row i of v becomes row row_map[i] of u
    let mut row_map: Vec<Option<usize>> = vec![None; m];
    // rows not yet used as a pivot
    let mut available: BTreeSet<usize> = (0..m).collect();

    // Reduce v to a permuted echelon form of a while filling in l.
    let mut pivot_count = 0;
    for j in 0..n {
        if pivot_count == m.min(n) {
            break;
        }
        let Some(p) = selector.select(v.col(j), &available) else {
            debug!("zero column {}", j);
            continue;
        };
        assert!(available.remove(&p), "Pivot row {} already used", p);
        debug!("pivot {} at ({}, {})", pivot_count, p, j);

        row_map[p] = Some(pivot_count);
        l[(p, pivot_count)] = T::one();

        let pivot = v[(p, j)].clone();
        for &i in &available {
            let ratio = v[(i, j)].clone() / pivot.clone();
            if ratio.is_zero() {
                continue;
            }
            l[(i, pivot_count)] = ratio.clone();
            v.replace_row_from(i, p, -ratio, j);
            v[(i, j)] = T::zero();
        }
        pivot_count += 1;
    }

    // Non-pivot (zero) rows keep their input order at the bottom.
    for &i in &available {
        l[(i, pivot_count)] = T::one();
        row_map[i] = Some(pivot_count);
        pivot_count += 1;
    }

    let row_map: Vec<usize> = row_map.into_iter().flatten().collect();
    permute(&v, &row_map, u);
}

/// `u[row_map[i]] = v[i]` for every row `i`. `row_map` must be a bijection
/// over `0..rows`.
pub fn permute<T: Scalar>(v: &Matrix<T>, row_map: &[usize], u: &mut Matrix<T>) {
    assert_eq!(v.size(), u.size(), "Dimensions not compatible");
    assert_eq!(row_map.len(), v.rows(), "Row map must cover every row");
    let targets: BTreeSet<usize> = row_map.iter().copied().collect();
    assert!(
        targets.len() == v.rows() && targets.iter().all(|&t| t < v.rows()),
        "Row map is not a permutation"
    );

    for (i, &target) in row_map.iter().enumerate() {
        for j in 0..v.cols() {
            u[(target, j)] = v[(i, j)].clone();
        }
    }
}

/// Allocating form of [`factor`]: returns `(L, U)`.
pub fn lu<T, S>(a: &Matrix<T>, selector: &S) -> (Matrix<T>, Matrix<T>)
where
    T: Scalar,
    S: PivotSelector<T> + ?Sized,
{
    let mut l = Matrix::new(a.rows(), a.rows());
    let mut u = Matrix::new(a.rows(), a.cols());
    factor(a, selector, &mut l, &mut u);
    (l, u)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
