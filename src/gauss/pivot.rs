use std::collections::BTreeSet;

use crate::matrix::vector::Vector;
use crate::scalar::Scalar;
use crate::utils::DEFAULT_EPSILON;

/// Policy choosing the pivot row of a column.
///
/// `available` holds the rows not yet used as a pivot; the returned row must
/// belong to it. `None` means the column has no acceptable pivot (every
/// candidate is approximately zero).
pub trait PivotSelector<T> {
    fn select(&self, column: &Vector<T>, available: &BTreeSet<usize>) -> Option<usize>;

    /// Tolerance of the zero tests following this selector's choices.
    fn epsilon(&self) -> f64 {
        DEFAULT_EPSILON
    }
}

/// Largest magnitude entry; ties go to the lowest row.
#[derive(Debug, Clone, Copy)]
pub struct PartialPivot {
    pub epsilon: f64,
}

/// First entry, by row index, that is not approximately zero.
#[derive(Debug, Clone, Copy)]
pub struct FirstNonzeroPivot {
    pub epsilon: f64,
}

impl Default for PartialPivot {
    fn default() -> Self {
        PartialPivot {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Default for FirstNonzeroPivot {
    fn default() -> Self {
        FirstNonzeroPivot {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl<T: Scalar> PivotSelector<T> for PartialPivot {
    fn select(&self, column: &Vector<T>, available: &BTreeSet<usize>) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for &i in available {
            let val = column[i].magnitude();
            if val.approx_zero(self.epsilon) {
                continue;
            }
            match &best {
                Some((_, max_val)) if val <= *max_val => {}
                _ => best = Some((i, val)),
            }
        }
        best.map(|(i, _)| i)
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl<T: Scalar> PivotSelector<T> for FirstNonzeroPivot {
    fn select(&self, column: &Vector<T>, available: &BTreeSet<usize>) -> Option<usize> {
        available
            .iter()
            .copied()
            .find(|&i| !column[i].approx_zero(self.epsilon))
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl<T, F> PivotSelector<T> for F
where
    F: Fn(&Vector<T>, &BTreeSet<usize>) -> Option<usize>,
{
    fn select(&self, column: &Vector<T>, available: &BTreeSet<usize>) -> Option<usize> {
        self(column, available)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn all(n: usize) -> BTreeSet<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_partial_pivot() {
        let c = Vector::from(vec![1.0, -4.0, 4.0, 2.0]);
        assert_eq!(PartialPivot::default().select(&c, &all(4)), Some(1));
        assert_eq!(
            PartialPivot::default().select(&c, &[0, 2, 3].into_iter().collect()),
            Some(2)
        );
        assert_eq!(
            PartialPivot::default().select(&c, &[0, 3].into_iter().collect()),
            Some(3)
        );
    }

    #[test]
    fn test_first_nonzero_pivot() {
        let c = Vector::from(vec![0.0, 1e-12, -3.0, 9.0]);
        assert_eq!(FirstNonzeroPivot::default().select(&c, &all(4)), Some(2));
        assert_eq!(
            FirstNonzeroPivot::default().select(&c, &[3].into_iter().collect()),
            Some(3)
        );
        assert_eq!(
            FirstNonzeroPivot { epsilon: 1e-15 }.select(&c, &all(4)),
            Some(1)
        );
    }

    #[test]
    fn test_zero_column_has_no_pivot() {
        let c = Vector::from(vec![0.0, 1e-13, -1e-14]);
        assert_eq!(PartialPivot::default().select(&c, &all(3)), None);
        assert_eq!(FirstNonzeroPivot::default().select(&c, &all(3)), None);
        assert_eq!(
            PartialPivot::default().select(&Vector::from(vec![5.0, 0.0]), &[1].into_iter().collect()),
            None
        );
    }

    #[test]
    fn test_closure_selector() {
        let last = |c: &Vector<f64>, rows: &BTreeSet<usize>| {
            rows.iter().rev().copied().find(|&i| c[i] != 0.0)
        };
        let c = Vector::from(vec![1.0, 2.0, 0.0]);
        assert_eq!(last.select(&c, &all(3)), Some(1));
        assert_eq!(PivotSelector::<f64>::epsilon(&last), DEFAULT_EPSILON);
    }
}
