use std::ops;

use crate::matrix::matrix::Matrix;
use crate::matrix::vector::Vector;
use crate::scalar::Scalar;

impl<T: Scalar> ops::AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        assert_eq!(self.size(), rhs.size(), "Dimensions not compatible");
        for j in 0..self.cols() {
            *self.col_mut(j) += rhs.col(j);
        }
    }
}

impl<T: Scalar> ops::SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        assert_eq!(self.size(), rhs.size(), "Dimensions not compatible");
        for j in 0..self.cols() {
            *self.col_mut(j) -= rhs.col(j);
        }
    }
}

impl<T: Scalar> ops::MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for j in 0..self.cols() {
            *self.col_mut(j) *= rhs.clone();
        }
    }
}

impl<T: Scalar> ops::MulAssign<&Matrix<T>> for Matrix<T> {
    fn mul_assign(&mut self, rhs: &Matrix<T>) {
        *self = &*self * rhs;
    }
}

impl<T: Scalar> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        let mut ret = self.clone();
        ret += rhs;
        ret
    }
}

impl<T: Scalar> ops::Add<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn add(mut self, rhs: Matrix<T>) -> Matrix<T> {
        self += &rhs;
        self
    }
}

impl<T: Scalar> ops::Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        let mut ret = self.clone();
        ret -= rhs;
        ret
    }
}

impl<T: Scalar> ops::Sub<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn sub(mut self, rhs: Matrix<T>) -> Matrix<T> {
        self -= &rhs;
        self
    }
}

impl<T: Scalar> ops::Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|x| -x.clone())
    }
}

impl<T: Scalar> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(self.cols(), rhs.rows(), "Dimensions not compatible");

        // column j of the product is self * (column j of rhs)
        Matrix::from_columns(rhs.columns().map(|c| self * c).collect())
    }
}

impl<T: Scalar> ops::Mul<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        &self * &rhs
    }
}

impl<T: Scalar> ops::Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        assert_eq!(self.cols(), rhs.len(), "Dimensions not compatible");

        let mut ret = Vector::new(self.rows());
        for (c, x) in self.columns().zip(rhs.iter()) {
            if x.is_zero() {
                continue;
            }
            ret += &(c * x.clone());
        }
        ret
    }
}

impl<T: Scalar> ops::Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        let mut ret = self.clone();
        ret *= rhs;
        ret
    }
}

impl<T: Scalar> ops::Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, rhs: T) -> Matrix<T> {
        self *= rhs;
        self
    }
}

impl ops::Mul<&Matrix<f64>> for f64 {
    type Output = Matrix<f64>;

    fn mul(self, rhs: &Matrix<f64>) -> Matrix<f64> {
        rhs * self
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
