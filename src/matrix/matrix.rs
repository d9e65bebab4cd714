use itertools::Itertools;
use log::trace;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;
use std::ops;

use crate::error::{LinalgError, Result};
use crate::matrix::vector::Vector;
use crate::scalar::Scalar;

/// Dense `rows x cols` grid, stored as `cols` column vectors of length `rows`.
///
/// Every column has the same length and both dimensions are positive. The
/// matrix owns its columns exclusively: views such as [`Matrix::col`] borrow
/// into its storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    rows: usize,
    columns: Vec<Vector<T>>,
}

impl<T: Scalar> Matrix<T> {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        assert!(rows > 0 && cols > 0, "Matrix dimensions must be positive");
        Matrix {
            rows,
            columns: vec![Vector::filled(rows, value); cols],
        }
    }

    pub fn from_rows(lines: Vec<Vec<T>>) -> Self {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);
        assert!(
            lines.iter().all(|l| l.len() == cols),
            "All rows must have the same length"
        );
        assert!(rows > 0 && cols > 0, "Matrix dimensions must be positive");

        let mut ret = Matrix::new(rows, cols);
        for (i, line) in lines.into_iter().enumerate() {
            for (j, x) in line.into_iter().enumerate() {
                ret.columns[j][i] = x;
            }
        }
        ret
    }

    /// Checked form of [`Matrix::from_rows`].
    pub fn try_from_rows(lines: Vec<Vec<T>>) -> Result<Self> {
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);
        if cols == 0 {
            return Err(LinalgError::Empty);
        }
        if let Some(bad) = lines.iter().find(|l| l.len() != cols) {
            return Err(LinalgError::DimensionMismatch {
                expected: (lines.len(), cols),
                found: (lines.len(), bad.len()),
            });
        }
        Ok(Self::from_rows(lines))
    }

    pub fn try_identity(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(LinalgError::Empty);
        }
        Ok(Self::identity(n))
    }

    pub fn from_cols(lines: Vec<Vec<T>>) -> Self {
        Self::from_columns(lines.into_iter().map(Vector::from).collect())
    }

    pub fn from_columns(columns: Vec<Vector<T>>) -> Self {
        let rows = columns.first().map(|c| c.len()).unwrap_or(0);
        assert!(!columns.is_empty(), "Matrix dimensions must be positive");
        assert!(
            columns.iter().all(|c| c.len() == rows),
            "All columns must have the same length"
        );
        Matrix { rows, columns }
    }

    pub fn identity(n: usize) -> Self {
        let mut ret = Matrix::new(n, n);
        for k in 0..n {
            ret[(k, k)] = T::one();
        }
        ret
    }

    /// Square matrix with `diag` on its main diagonal.
    pub fn diagonal(diag: &Vector<T>) -> Self {
        let mut ret = Matrix::new(diag.len(), diag.len());
        for (k, x) in diag.iter().enumerate() {
            ret[(k, k)] = x.clone();
        }
        ret
    }

    /// `[a | b]`
    pub fn augment(a: &Matrix<T>, b: &Matrix<T>) -> Self {
        assert_eq!(a.rows, b.rows, "Dimensions not compatible");
        Matrix {
            rows: a.rows,
            columns: a.columns.iter().chain(b.columns.iter()).cloned().collect(),
        }
    }

    /// `[a | b]` where `b` becomes the last column.
    pub fn augment_vector(a: &Matrix<T>, b: &Vector<T>) -> Self {
        assert_eq!(a.rows, b.len(), "Dimensions not compatible");
        let mut ret = a.clone();
        ret.columns.push(b.clone());
        ret
    }

    /// Submatrix keeping only the listed rows and columns, in ascending order.
    pub fn whitelist(a: &Matrix<T>, rows: &[usize], cols: &[usize]) -> Self {
        let rows: BTreeSet<usize> = rows.iter().copied().collect();
        let cols: BTreeSet<usize> = cols.iter().copied().collect();
        assert!(
            rows.iter().all(|&i| i < a.rows) && cols.iter().all(|&j| j < a.cols()),
            "Index out of range"
        );
        Matrix::from_columns(
            cols.iter()
                .map(|&j| rows.iter().map(|&i| a[(i, j)].clone()).collect())
                .collect(),
        )
    }

    /// Submatrix dropping the listed rows and columns.
    pub fn blacklist(a: &Matrix<T>, rows: &[usize], cols: &[usize]) -> Self {
        let keep_rows: Vec<usize> = (0..a.rows).filter(|i| !rows.contains(i)).collect();
        let keep_cols: Vec<usize> = (0..a.cols()).filter(|j| !cols.contains(j)).collect();
        Self::whitelist(a, &keep_rows, &keep_cols)
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols())
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols()
    }

    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols() == 1
    }

    pub fn check_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols(),
            })
        }
    }

    /// `Ok` when `self + rhs` and `self - rhs` are defined.
    pub fn check_same_size(&self, rhs: &Matrix<T>) -> Result<()> {
        if self.size() == rhs.size() {
            Ok(())
        } else {
            Err(LinalgError::DimensionMismatch {
                expected: self.size(),
                found: rhs.size(),
            })
        }
    }

    /// `Ok` when `self * rhs` is defined.
    pub fn check_product(&self, rhs: &Matrix<T>) -> Result<()> {
        if self.cols() == rhs.rows {
            Ok(())
        } else {
            Err(LinalgError::DimensionMismatch {
                expected: (self.cols(), rhs.cols()),
                found: rhs.size(),
            })
        }
    }

    #[inline(always)]
    pub fn col(&self, j: usize) -> &Vector<T> {
        &self.columns[j]
    }

    #[inline(always)]
    pub fn col_mut(&mut self, j: usize) -> &mut Vector<T> {
        &mut self.columns[j]
    }

    pub fn row(&self, i: usize) -> Vector<T> {
        assert!(i < self.rows, "Row {} out of range", i);
        self.columns.iter().map(|c| c[i].clone()).collect()
    }

    pub fn columns(&self) -> std::slice::Iter<'_, Vector<T>> {
        self.columns.iter()
    }

    pub fn transpose(&self) -> Matrix<T> {
        Matrix::from_columns((0..self.rows).map(|i| self.row(i)).collect())
    }

    /// Splits into columns `[0, j)` and `[j, cols)`.
    pub fn partition(&self, j: usize) -> (Matrix<T>, Matrix<T>) {
        assert!(0 < j && j < self.cols(), "Partition column {} out of range", j);
        (
            Matrix::from_columns(self.columns[..j].to_vec()),
            Matrix::from_columns(self.columns[j..].to_vec()),
        )
    }

    pub fn delete_row(&self, i: usize) -> Matrix<T> {
        assert!(i < self.rows && self.rows > 1, "Cannot delete row {}", i);
        Self::blacklist(self, &[i], &[])
    }

    pub fn delete_col(&self, j: usize) -> Matrix<T> {
        assert!(j < self.cols() && self.cols() > 1, "Cannot delete column {}", j);
        Self::blacklist(self, &[], &[j])
    }

    pub fn map<U: Scalar>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        Matrix::from_columns(
            self.columns
                .iter()
                .map(|c| c.iter().map(&f).collect())
                .collect(),
        )
    }

    pub fn fill(&mut self, value: T) {
        for c in self.columns.iter_mut() {
            for x in c.iter_mut() {
                *x = value.clone();
            }
        }
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|i| self.row(i).into_vec()).collect()
    }

    pub fn approx_eq(&self, rhs: &Matrix<T>, epsilon: f64) -> bool {
        self.size() == rhs.size()
            && self
                .columns
                .iter()
                .zip(rhs.columns.iter())
                .all(|(a, b)| a.approx_eq(b, epsilon))
    }

    /// Snaps near-integer entries to integers.
    pub fn round(&self, epsilon: f64) -> Matrix<T> {
        self.map(|x| x.snap_to_integer(epsilon))
    }

    /// Column of the first entry of row `i` that is not approximately zero.
    pub fn leading_col(&self, i: usize, epsilon: f64) -> Option<usize> {
        (0..self.cols()).find(|&j| !self[(i, j)].approx_zero(epsilon))
    }

    /// Echelon form check: leading entries strictly move right and zero rows
    /// come last.
    pub fn is_echelon(&self, epsilon: f64) -> bool {
        let mut lead: Option<usize> = None;
        let mut seen_zero_row = false;

        for i in 0..self.rows {
            match self.leading_col(i, epsilon) {
                None => seen_zero_row = true,
                Some(j) => {
                    if seen_zero_row || lead.is_some_and(|l| j <= l) {
                        return false;
                    }
                    lead = Some(j);
                }
            }
        }
        true
    }

    /// Reduced echelon form check: echelon, every leading entry is 1 and is
    /// alone in its column.
    pub fn is_rref(&self, epsilon: f64) -> bool {
        self.is_echelon(epsilon)
            && (0..self.rows).all(|i| match self.leading_col(i, epsilon) {
                None => true,
                Some(j) => {
                    self[(i, j)].approx_eq(&T::one(), epsilon)
                        && (0..self.rows).all(|r| r == i || self[(r, j)].approx_zero(epsilon))
                }
            })
    }

    // Elementary row operations. The `_from` variants only touch columns `>= lo`.

    pub fn scale_row(&mut self, i: usize, f: T) {
        self.scale_row_from(i, f, 0);
    }

    pub fn scale_row_from(&mut self, i: usize, f: T, lo: usize) {
        assert!(i < self.rows, "Row {} out of range", i);
        if f.is_one() {
            return;
        }
        trace!("scale R{} by {}", i, f);
        for c in self.columns.iter_mut().skip(lo) {
            c[i] = c[i].clone() * f.clone();
        }
    }

    pub fn swap_rows(&mut self, i1: usize, i2: usize) {
        self.swap_rows_from(i1, i2, 0);
    }

    pub fn swap_rows_from(&mut self, i1: usize, i2: usize, lo: usize) {
        assert!(i1 < self.rows && i2 < self.rows, "Row out of range");
        if i1 == i2 {
            return;
        }
        trace!("swap R{} and R{}", i1, i2);
        for c in self.columns.iter_mut().skip(lo) {
            c.as_mut_slice().swap(i1, i2);
        }
    }

    /// `R[i1] <- R[i1] + f * R[i2]`
    pub fn replace_row(&mut self, i1: usize, i2: usize, f: T) {
        self.replace_row_from(i1, i2, f, 0);
    }

    pub fn replace_row_from(&mut self, i1: usize, i2: usize, f: T, lo: usize) {
        assert!(i1 < self.rows && i2 < self.rows, "Row out of range");
        trace!("replace R{} with R{} + ({} * R{})", i1, i1, f, i2);
        for c in self.columns.iter_mut().skip(lo) {
            c[i1] = c[i1].clone() + f.clone() * c[i2].clone();
        }
    }
}

impl Matrix<f64> {
    /// Entries drawn uniformly from `[lo, hi)`.
    pub fn random(rows: usize, cols: usize, lo: f64, hi: f64) -> Self {
        Self::random_with(&mut rand::thread_rng(), rows, cols, lo, hi)
    }

    pub fn random_with<R: Rng + ?Sized>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        lo: f64,
        hi: f64,
    ) -> Self {
        assert!(cols > 0, "Matrix dimensions must be positive");
        Matrix::from_columns(
            (0..cols)
                .map(|_| Vector::random_with(rng, rows, lo, hi))
                .collect(),
        )
    }
}

impl<T> ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(i < self.rows, "Row {} out of range", i);
        &self.columns[j][i]
    }
}

impl<T> ops::IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(i < self.rows, "Row {} out of range", i);
        &mut self.columns[j][i]
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            writeln!(
                f,
                "{}({}){}",
                if i == 0 { "(" } else { " " },
                self.columns.iter().map(|c| &c[i]).join(", "),
                if i == self.rows - 1 { ")" } else { "" }
            )?;
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn m(lines: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(lines)
    }

    #[test]
    fn test_construction() {
        let mut a = Matrix::filled(4, 4, 0.0);
        for i in 0..4 {
            a[(i, 1)] = i as f64;
        }
        let b = m(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 2.0, 0.0, 0.0],
            vec![0.0, 3.0, 0.0, 0.0],
        ]);
        let c = Matrix::from_cols(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
        let d = c.clone();

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c, d);
        assert_eq!(c.col(1), &Vector::from(vec![0.0, 1.0, 2.0, 3.0]));
        assert_eq!(c.row(2), Vector::from(vec![0.0, 2.0, 0.0, 0.0]));
    }

    #[test]
    fn test_size() {
        let a = Matrix::<f64>::new(6, 4);
        let c = Matrix::<f64>::new(4, 6);
        let d = Matrix::<f64>::new(4, 4);

        assert_eq!(a.rows(), 6);
        assert_eq!(a.cols(), 4);
        assert_eq!(a.size(), (6, 4));
        assert_ne!(a.size(), c.size());
        assert!(!a.is_square());
        assert!(d.is_square());
        assert!(!d.is_vector());
        assert!(Matrix::<f64>::new(6, 1).is_vector());
        assert!(Matrix::<f64>::new(1, 6).is_vector());
    }

    #[test]
    fn test_row_operations() {
        let a = m(vec![
            vec![2.0, 2.0, 2.0],
            vec![1.0, 1.0, 1.0],
            vec![3.0, 3.0, 3.0],
        ]);

        let mut scaled = a.clone();
        scaled.scale_row(0, 0.5);
        assert_eq!(
            scaled,
            m(vec![
                vec![1.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
                vec![3.0, 3.0, 3.0]
            ])
        );

        let mut swapped = a.clone();
        swapped.swap_rows(0, 1);
        assert_eq!(
            swapped,
            m(vec![
                vec![1.0, 1.0, 1.0],
                vec![2.0, 2.0, 2.0],
                vec![3.0, 3.0, 3.0]
            ])
        );
        swapped.swap_rows(2, 2);
        assert_eq!(swapped.row(2), a.row(2));

        let mut replaced = a.clone();
        replaced.replace_row(2, 0, -1.5);
        assert_eq!(
            replaced,
            m(vec![
                vec![2.0, 2.0, 2.0],
                vec![1.0, 1.0, 1.0],
                vec![0.0, 0.0, 0.0]
            ])
        );
    }

    #[test]
    fn test_row_operations_low_column() {
        let mut a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        a.scale_row_from(0, 10.0, 1);
        assert_eq!(a.row(0), Vector::from(vec![1.0, 20.0, 30.0]));
        a.swap_rows_from(0, 1, 2);
        assert_eq!(a.row(0), Vector::from(vec![1.0, 20.0, 6.0]));
        a.replace_row_from(1, 0, -1.0, 1);
        assert_eq!(a.row(1), Vector::from(vec![4.0, -15.0, 24.0]));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_row_operation_out_of_range() {
        Matrix::<f64>::new(2, 2).replace_row(0, 2, 1.0);
    }

    #[test]
    fn test_transpose() {
        let a = m(vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]);
        let b = a.transpose();

        assert_eq!(a.rows(), b.cols());
        assert_eq!(a.cols(), b.rows());
        for i in 0..a.rows() {
            for j in 0..a.cols() {
                assert_eq!(a[(i, j)], b[(j, i)]);
            }
        }
        assert_eq!(b.transpose(), a);
    }

    #[test]
    fn test_factories() {
        let d = Matrix::diagonal(&Vector::from(vec![1.0, 2.0]));
        assert_eq!(d, m(vec![vec![1.0, 0.0], vec![0.0, 2.0]]));
        assert_eq!(
            Matrix::identity(2),
            m(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        );

        let aug = Matrix::augment(&d, &Matrix::identity(2));
        assert_eq!(aug.size(), (2, 4));
        assert_eq!(aug.partition(2), (d.clone(), Matrix::identity(2)));

        let aug = Matrix::augment_vector(&d, &Vector::from(vec![7.0, 8.0]));
        assert_eq!(aug.col(2), &Vector::from(vec![7.0, 8.0]));

        let mut rng = StdRng::seed_from_u64(1);
        let r = Matrix::random_with(&mut rng, 3, 5, 0.0, 1.0);
        assert_eq!(r.size(), (3, 5));
        assert!(r.columns().all(|c| c.iter().all(|x| (0.0..1.0).contains(x))));
    }

    #[test]
    fn test_whitelist_blacklist() {
        let a = m(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        assert_eq!(
            Matrix::whitelist(&a, &[2, 0], &[1, 2]),
            m(vec![vec![2.0, 3.0], vec![8.0, 9.0]])
        );
        assert_eq!(
            Matrix::blacklist(&a, &[1], &[0]),
            m(vec![vec![2.0, 3.0], vec![8.0, 9.0]])
        );
        assert_eq!(a.delete_row(0), m(vec![vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]));
        assert_eq!(a.delete_col(2).row(0), Vector::from(vec![1.0, 2.0]));
    }

    #[test]
    fn test_round_and_rref() {
        let a = m(vec![vec![1.0, 1e-12, -0.9999999999], vec![0.0, 0.0, 0.0]]);
        let r = a.round(1e-9);
        assert_eq!(r, m(vec![vec![1.0, 0.0, -1.0], vec![0.0, 0.0, 0.0]]));
        assert!(r.is_rref(1e-9));
        assert!(m(vec![vec![2.0, 3.0], vec![0.0, 1.0]]).is_echelon(1e-9));
        assert!(!m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).is_echelon(1e-9));
        assert!(!m(vec![vec![2.0, 0.0], vec![0.0, 1.0]]).is_rref(1e-9));
        assert!(!m(vec![vec![0.0, 0.0], vec![0.0, 1.0]]).is_rref(1e-9));
        assert!(!m(vec![vec![1.0, 1.0], vec![0.0, 1.0]]).is_rref(1e-9));
    }

    #[test]
    fn test_display() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.5]]);
        assert_eq!(format!("{}", a), "((1, 2)\n (3, 4.5))\n");
    }

    #[test]
    fn test_checked_construction() {
        assert_eq!(
            Matrix::try_from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
            Ok(m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]))
        );
        assert_eq!(
            Matrix::try_from_rows(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(LinalgError::DimensionMismatch {
                expected: (2, 2),
                found: (2, 1)
            })
        );
        assert_eq!(Matrix::<f64>::try_from_rows(vec![]), Err(LinalgError::Empty));
        assert_eq!(
            Matrix::<f64>::try_from_rows(vec![vec![], vec![]]),
            Err(LinalgError::Empty)
        );
        assert_eq!(Matrix::<f64>::try_identity(0), Err(LinalgError::Empty));
        assert_eq!(Matrix::<f64>::try_identity(2), Ok(Matrix::identity(2)));
    }

    #[test]
    fn test_dimension_checks() {
        let a = Matrix::<f64>::new(2, 3);
        let b = Matrix::<f64>::new(3, 2);

        assert_eq!(a.check_same_size(&a), Ok(()));
        assert_eq!(
            a.check_same_size(&b),
            Err(LinalgError::DimensionMismatch {
                expected: (2, 3),
                found: (3, 2)
            })
        );
        assert_eq!(a.check_product(&b), Ok(()));
        assert_eq!(
            a.check_product(&a),
            Err(LinalgError::DimensionMismatch {
                expected: (3, 3),
                found: (2, 3)
            })
        );
        assert_eq!(
            a.check_square(),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        );
        assert_eq!((&a * &b).check_square(), Ok(()));
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_ragged_rows() {
        m(vec![vec![1.0, 2.0], vec![3.0]]);
    }
}
